// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory stand-ins for the catalog, the tag reader and the timer.

use crate::catalog::{CatalogError, RemoteCatalog};
use crate::pacing::Sleeper;
use crate::tags::{EmbeddedTags, TagError, TagExtractor};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tidewater_domain::{PlaylistHandle, PlaylistId, RemoteTrackCandidate, TrackId};
use uuid::Uuid;

pub fn candidate(id: &str, name: &str, artist: &str) -> RemoteTrackCandidate {
    RemoteTrackCandidate::new(TrackId::new(id), name, artist)
}

/// Records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Catalog with canned search responses keyed by exact query text.
/// Unknown queries return an empty result list.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    responses: HashMap<String, Result<Vec<RemoteTrackCandidate>, String>>,
    insert_error: Option<String>,
    queries: Mutex<Vec<String>>,
    added: Mutex<Vec<TrackId>>,
}

impl FakeCatalog {
    pub fn with_results(mut self, query: &str, candidates: Vec<RemoteTrackCandidate>) -> Self {
        self.responses.insert(query.to_string(), Ok(candidates));
        self
    }

    pub fn with_search_error(mut self, query: &str, message: &str) -> Self {
        self.responses
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub fn failing_inserts(mut self, message: &str) -> Self {
        self.insert_error = Some(message.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<TrackId> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteCatalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<RemoteTrackCandidate>, CatalogError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.responses.get(query) {
            Some(Ok(candidates)) => Ok(candidates.clone()),
            Some(Err(message)) => Err(CatalogError::Unavailable(message.clone())),
            None => Ok(Vec::new()),
        }
    }

    async fn create_playlist(
        &self,
        name: &str,
        _description: &str,
    ) -> Result<PlaylistHandle, CatalogError> {
        Ok(PlaylistHandle {
            id: PlaylistId::from_uuid(Uuid::new_v4()),
            name: name.to_string(),
        })
    }

    async fn add_tracks(
        &self,
        _playlist: &PlaylistHandle,
        tracks: &[TrackId],
    ) -> Result<(), CatalogError> {
        if let Some(message) = &self.insert_error {
            return Err(CatalogError::Unavailable(message.clone()));
        }
        self.added.lock().unwrap().extend_from_slice(tracks);
        Ok(())
    }
}

/// Tag reader backed by a path → tags map; unknown paths fail to read.
#[derive(Debug, Default)]
pub struct FakeTagExtractor {
    tags: HashMap<PathBuf, EmbeddedTags>,
}

impl FakeTagExtractor {
    pub fn with_tags(mut self, path: impl AsRef<Path>, tags: EmbeddedTags) -> Self {
        self.tags.insert(path.as_ref().to_path_buf(), tags);
        self
    }
}

impl TagExtractor for FakeTagExtractor {
    fn extract(&self, path: &Path) -> Result<EmbeddedTags, TagError> {
        self.tags
            .get(path)
            .cloned()
            .ok_or_else(|| TagError::NoTags(path.display().to_string()))
    }
}
