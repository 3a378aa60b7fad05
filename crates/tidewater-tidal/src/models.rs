// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response of the sessions endpoint for a valid access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: Option<String>,
    pub user_id: u64,
    pub country_code: String,
}

/// The account that owns playlists created during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHandle {
    pub id: u64,
    pub country_code: String,
}

/// Minimal artist reference embedded in track payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRef {
    pub id: u64,
    pub name: String,
}

/// Track entry from a search page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackItem {
    pub id: u64,
    pub title: String,
    /// Version suffix shown next to the title (e.g. "Remastered 2009").
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub artist: Option<ArtistRef>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl TrackItem {
    /// Main credited artist, falling back to the first entry of `artists`.
    pub fn primary_artist_name(&self) -> &str {
        self.artist
            .as_ref()
            .or_else(|| self.artists.first())
            .map(|artist| artist.name.as_str())
            .unwrap_or_default()
    }
}

/// One page of search results. Item order is the catalog's relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage<T> {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total_number_of_items: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub uuid: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_of_tracks: Option<u32>,
}
