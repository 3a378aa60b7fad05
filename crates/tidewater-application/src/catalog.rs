// SPDX-License-Identifier: GPL-3.0-or-later

//! Seam between the import workflow and the remote catalog.

use async_trait::async_trait;
use thiserror::Error;
use tidewater_domain::{PlaylistHandle, PlaylistId, RemoteTrackCandidate, TrackId};
use tidewater_tidal::{TidalError, TidalSession, TrackItem};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Tidal(#[from] TidalError),
    #[error("invalid track id: {0}")]
    InvalidTrackId(String),
    #[error("{0}")]
    Unavailable(String),
}

/// Operations the importer needs from a music catalog.
///
/// Calls are issued strictly one at a time; implementations need not be
/// safe for concurrent use beyond `Send + Sync`.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn search_tracks(&self, query: &str) -> Result<Vec<RemoteTrackCandidate>, CatalogError>;

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<PlaylistHandle, CatalogError>;

    async fn add_tracks(
        &self,
        playlist: &PlaylistHandle,
        tracks: &[TrackId],
    ) -> Result<(), CatalogError>;
}

fn to_candidate(track: TrackItem) -> RemoteTrackCandidate {
    let artist_name = track.primary_artist_name().to_string();
    RemoteTrackCandidate::new(TrackId::new(track.id.to_string()), track.title, artist_name)
}

#[async_trait]
impl RemoteCatalog for TidalSession {
    async fn search_tracks(&self, query: &str) -> Result<Vec<RemoteTrackCandidate>, CatalogError> {
        let tracks = TidalSession::search_tracks(self, query).await?;
        Ok(tracks.into_iter().map(to_candidate).collect())
    }

    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<PlaylistHandle, CatalogError> {
        let playlist = TidalSession::create_playlist(self, name, description).await?;
        Ok(PlaylistHandle {
            id: PlaylistId::from_uuid(playlist.uuid),
            name: playlist.title,
        })
    }

    async fn add_tracks(
        &self,
        playlist: &PlaylistHandle,
        tracks: &[TrackId],
    ) -> Result<(), CatalogError> {
        let ids = tracks
            .iter()
            .map(|id| {
                id.as_str()
                    .parse::<u64>()
                    .map_err(|_| CatalogError::InvalidTrackId(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        TidalSession::add_tracks(self, playlist.id.0, &ids).await?;
        Ok(())
    }
}
