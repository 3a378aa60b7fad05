// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

// ============================================================================
// Value Objects & IDs
// ============================================================================

/// Opaque identifier of a track in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(pub Uuid);

impl PlaylistId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Local metadata
// ============================================================================

/// Title/artist/album triple read from a local file's embedded tags.
///
/// A record only exists when both `title` and `artist` are non-empty;
/// `album` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    title: String,
    artist: String,
    album: String,
}

impl MetadataRecord {
    /// Build a usable record, or `None` when title or artist is missing.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Option<Self> {
        let title = title.into();
        let artist = artist.into();
        if title.is_empty() || artist.is_empty() {
            return None;
        }

        Some(Self {
            title,
            artist,
            album: album.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn has_album(&self) -> bool {
        !self.album.is_empty()
    }
}

// ============================================================================
// Remote catalog
// ============================================================================

/// A track returned by the remote catalog for a text query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrackCandidate {
    pub id: TrackId,
    pub name: String,
    pub artist_name: String,
}

impl RemoteTrackCandidate {
    pub fn new(id: TrackId, name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            artist_name: artist_name.into(),
        }
    }
}

/// Playlist created at the start of a run; every matched track lands here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistHandle {
    pub id: PlaylistId,
    pub name: String,
}

// ============================================================================
// Outcomes & run statistics
// ============================================================================

pub const READ_FAILURE_REASON: &str = "Could not read metadata";
pub const NO_MATCH_REASON: &str = "No match found on Tidal";

/// Terminal classification of one processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched(TrackId),
    NoMatch,
    ReadFailure(String),
    SearchFailure(String),
    InsertFailure(String),
}

impl MatchOutcome {
    pub fn read_failure() -> Self {
        Self::ReadFailure(READ_FAILURE_REASON.to_string())
    }

    pub fn search_failure(message: impl std::fmt::Display) -> Self {
        Self::SearchFailure(format!("Error searching Tidal: {message}"))
    }

    pub fn insert_failure(message: impl std::fmt::Display) -> Self {
        Self::InsertFailure(format!("Error adding to playlist: {message}"))
    }

    /// Reason text shared by console output and the failure log.
    /// `None` for [`MatchOutcome::Matched`].
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Matched(_) => None,
            Self::NoMatch => Some(NO_MATCH_REASON),
            Self::ReadFailure(reason)
            | Self::SearchFailure(reason)
            | Self::InsertFailure(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Counters and failure list for one import run.
///
/// `matched` never exceeds `processed`: a match can only be recorded for a
/// file that has already been counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    processed: usize,
    matched: usize,
    failures: Vec<FailureEntry>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self {
            processed: 0,
            matched: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn failures(&self) -> &[FailureEntry] {
        &self.failures
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_match(&mut self) {
        if self.matched < self.processed {
            self.matched += 1;
        }
    }

    pub fn record_failure(&mut self, path: impl AsRef<Path>, reason: impl Into<String>) {
        self.failures.push(FailureEntry {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}
