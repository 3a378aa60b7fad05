// SPDX-License-Identifier: GPL-3.0-or-later

use crate::catalog::{CatalogError, RemoteCatalog};
use crate::matching::{CandidateMatcher, MatchTier};
use crate::pacing::Pacer;
use tidewater_domain::{MetadataRecord, RemoteTrackCandidate};
use tracing::{debug, warn};

/// Result of resolving one local record against the catalog.
#[derive(Debug)]
pub enum Resolution {
    Matched {
        candidate: RemoteTrackCandidate,
        tier: MatchTier,
    },
    NoMatch,
    /// A catalog query failed; no further query was issued for this record.
    Failed(CatalogError),
}

/// Query text for the first lookup: `"<artist> <title>"`.
pub fn primary_query(record: &MetadataRecord) -> String {
    format!("{} {}", record.artist(), record.title())
}

/// Query text for the album-augmented retry: `"<artist> <title> <album>"`.
pub fn album_query(record: &MetadataRecord) -> String {
    format!("{} {} {}", record.artist(), record.title(), record.album())
}

/// Drives at most two paced catalog queries per record and hands the
/// results to the [`CandidateMatcher`].
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    pacer: Pacer,
    matcher: CandidateMatcher,
    album_retry: bool,
}

impl SearchOrchestrator {
    pub fn new(pacer: Pacer, album_retry: bool) -> Self {
        Self {
            pacer,
            matcher: CandidateMatcher,
            album_retry,
        }
    }

    pub async fn resolve<C>(&self, catalog: &C, record: &MetadataRecord) -> Resolution
    where
        C: RemoteCatalog + ?Sized,
    {
        let candidates = match self.query(catalog, &primary_query(record)).await {
            Ok(candidates) => candidates,
            Err(error) => return Resolution::Failed(error),
        };

        if let Some(hit) = self.matcher.select(record, &candidates) {
            return Resolution::Matched {
                candidate: hit.candidate.clone(),
                tier: hit.tier,
            };
        }

        if !self.album_retry || !record.has_album() {
            return Resolution::NoMatch;
        }

        debug!(
            target: "search",
            artist = record.artist(),
            title = record.title(),
            album = record.album(),
            "no match on primary query, retrying with album"
        );

        let candidates = match self.query(catalog, &album_query(record)).await {
            Ok(candidates) => candidates,
            Err(error) => return Resolution::Failed(error),
        };

        match self
            .matcher
            .select_with(&MatchTier::ALBUM_RETRY, record, &candidates)
        {
            Some(hit) => Resolution::Matched {
                candidate: hit.candidate.clone(),
                tier: hit.tier,
            },
            None => Resolution::NoMatch,
        }
    }

    async fn query<C>(
        &self,
        catalog: &C,
        query: &str,
    ) -> Result<Vec<RemoteTrackCandidate>, CatalogError>
    where
        C: RemoteCatalog + ?Sized,
    {
        self.pacer.before_query().await;

        match catalog.search_tracks(query).await {
            Ok(candidates) => {
                debug!(target: "search", query, returned = candidates.len(), "catalog search");
                Ok(candidates)
            }
            Err(error) => {
                warn!(target: "search", query, error = %error, "catalog search failed");
                Err(error)
            }
        }
    }
}
