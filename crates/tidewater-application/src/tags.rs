// SPDX-License-Identifier: GPL-3.0-or-later

//! Embedded tag extraction.
//!
//! `lofty` detects the container (MP4, FLAC/Vorbis, ID3 and friends) and
//! exposes a unified tag view, so one code path covers every supported
//! extension.

use lofty::error::LoftyError;
use lofty::prelude::{ItemKey, TaggedFileExt};
use std::path::Path;
use thiserror::Error;
use tidewater_domain::MetadataRecord;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read tags: {0}")]
    Read(#[from] LoftyError),

    #[error("no tags found in {0}")]
    NoTags(String),
}

/// Raw title/artist/album values as found in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl EmbeddedTags {
    /// Usable record, or `None` when title or artist is missing.
    pub fn into_record(self) -> Option<MetadataRecord> {
        MetadataRecord::new(
            self.title.unwrap_or_default(),
            self.artist.unwrap_or_default(),
            self.album.unwrap_or_default(),
        )
    }
}

pub trait TagExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<EmbeddedTags, TagError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagExtractor;

impl TagExtractor for LoftyTagExtractor {
    fn extract(&self, path: &Path) -> Result<EmbeddedTags, TagError> {
        let tagged_file = lofty::read_from_path(path)?;
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| TagError::NoTags(path.display().to_string()))?;

        Ok(EmbeddedTags {
            title: tag.get_string(&ItemKey::TrackTitle).map(str::to_string),
            artist: tag.get_string(&ItemKey::TrackArtist).map(str::to_string),
            album: tag.get_string(&ItemKey::AlbumTitle).map(str::to_string),
        })
    }
}
