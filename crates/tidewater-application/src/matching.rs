// SPDX-License-Identifier: GPL-3.0-or-later

//! Tiered candidate selection for catalog search results.
//!
//! Tiers are tried in a fixed order and the first candidate accepted by a
//! tier wins. There is no scoring: ties are broken by catalog order.
//!
//! 1. [`MatchTier::Exact`]: case-insensitive equality of title and artist
//!    over the whole result list, skipping anything named like a remix.
//! 2. [`MatchTier::Fuzzy`]: substring containment in either direction for
//!    both title and artist, over the first [`CANDIDATE_WINDOW`] results.
//! 3. [`MatchTier::AlbumAugmented`]: one-directional containment (record
//!    inside candidate) over the first [`CANDIDATE_WINDOW`] results. Only
//!    used against the album-augmented retry query.

use tidewater_domain::{MetadataRecord, RemoteTrackCandidate};
use tracing::trace;

/// Number of leading results the substring tiers look at.
pub const CANDIDATE_WINDOW: usize = 5;

const REMIX_MARKER: &str = "remix";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Fuzzy,
    AlbumAugmented,
}

impl MatchTier {
    /// Tiers applied to the primary `"<artist> <title>"` query.
    pub const PRIMARY: [MatchTier; 2] = [MatchTier::Exact, MatchTier::Fuzzy];

    /// Tiers applied to the `"<artist> <title> <album>"` retry query.
    pub const ALBUM_RETRY: [MatchTier; 1] = [MatchTier::AlbumAugmented];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::AlbumAugmented => "album-augmented",
        }
    }

    fn window(&self) -> Option<usize> {
        match self {
            Self::Exact => None,
            Self::Fuzzy | Self::AlbumAugmented => Some(CANDIDATE_WINDOW),
        }
    }

    fn accepts(&self, record: &FoldedRecord, candidate: &FoldedCandidate) -> bool {
        match self {
            Self::Exact => {
                !candidate.name.contains(REMIX_MARKER)
                    && candidate.name == record.title
                    && candidate.artist == record.artist
            }
            Self::Fuzzy => {
                contains_either_way(&record.artist, &candidate.artist)
                    && contains_either_way(&record.title, &candidate.name)
            }
            Self::AlbumAugmented => {
                candidate.artist.contains(record.artist.as_str())
                    && candidate.name.contains(record.title.as_str())
            }
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected candidate together with the tier that accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch<'a> {
    pub candidate: &'a RemoteTrackCandidate,
    pub tier: MatchTier,
}

/// Picks the catalog track that corresponds to a local metadata record.
///
/// Stateless; the same inputs always produce the same selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct CandidateMatcher;

impl CandidateMatcher {
    /// Run the exact tier, then the fuzzy tier, over one result list.
    pub fn select<'a>(
        &self,
        record: &MetadataRecord,
        candidates: &'a [RemoteTrackCandidate],
    ) -> Option<TierMatch<'a>> {
        self.select_with(&MatchTier::PRIMARY, record, candidates)
    }

    /// Run the given tiers in order; the first accepted candidate wins.
    pub fn select_with<'a>(
        &self,
        tiers: &[MatchTier],
        record: &MetadataRecord,
        candidates: &'a [RemoteTrackCandidate],
    ) -> Option<TierMatch<'a>> {
        let record = FoldedRecord::new(record);
        let folded: Vec<FoldedCandidate> = candidates.iter().map(FoldedCandidate::new).collect();

        for tier in tiers {
            let limit = tier.window().unwrap_or(candidates.len());
            let hit = candidates
                .iter()
                .zip(&folded)
                .take(limit)
                .find(|(_, candidate)| tier.accepts(&record, candidate));

            if let Some((candidate, _)) = hit {
                trace!(
                    target: "matching",
                    tier = tier.as_str(),
                    track_id = %candidate.id,
                    "candidate accepted"
                );
                return Some(TierMatch {
                    candidate,
                    tier: *tier,
                });
            }
        }

        None
    }
}

struct FoldedRecord {
    title: String,
    artist: String,
}

impl FoldedRecord {
    fn new(record: &MetadataRecord) -> Self {
        Self {
            title: record.title().to_lowercase(),
            artist: record.artist().to_lowercase(),
        }
    }
}

struct FoldedCandidate {
    name: String,
    artist: String,
}

impl FoldedCandidate {
    fn new(candidate: &RemoteTrackCandidate) -> Self {
        Self {
            name: candidate.name.to_lowercase(),
            artist: candidate.artist_name.to_lowercase(),
        }
    }
}

fn contains_either_way(left: &str, right: &str) -> bool {
    left.contains(right) || right.contains(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    fn record(title: &str, artist: &str) -> MetadataRecord {
        MetadataRecord::new(title, artist, "").expect("usable record")
    }

    #[test]
    fn exact_tier_matches_case_insensitively() {
        let candidates = vec![candidate("1", "YESTERDAY", "the beatles")];
        let hit = CandidateMatcher
            .select(&record("Yesterday", "The Beatles"), &candidates)
            .expect("exact match");

        assert_eq!(hit.tier, MatchTier::Exact);
        assert_eq!(hit.candidate.id.as_str(), "1");
    }

    #[test]
    fn exact_tier_scans_past_the_window() {
        let mut candidates: Vec<_> = (0..8)
            .map(|i| candidate(&i.to_string(), "Something Else", "Nobody"))
            .collect();
        candidates.push(candidate("8", "Yesterday", "The Beatles"));

        let hit = CandidateMatcher
            .select(&record("Yesterday", "The Beatles"), &candidates)
            .expect("exact match beyond the first five");
        assert_eq!(hit.tier, MatchTier::Exact);
        assert_eq!(hit.candidate.id.as_str(), "8");
    }

    #[test]
    fn exact_tier_wins_over_earlier_fuzzy_candidate() {
        let candidates = vec![
            candidate("1", "Yesterday (Live)", "The Beatles"),
            candidate("2", "Yesterday", "The Beatles"),
        ];
        let hit = CandidateMatcher
            .select(&record("Yesterday", "The Beatles"), &candidates)
            .expect("match");
        assert_eq!(hit.candidate.id.as_str(), "2");
        assert_eq!(hit.tier, MatchTier::Exact);
    }

    #[test]
    fn remix_only_blocks_the_exact_tier() {
        // Exact title equality would hold, but the remix marker rules it out
        // of the exact tier; the fuzzy tier still accepts it.
        let candidates = vec![candidate("1", "Remix", "DJ Remix")];
        let hit = CandidateMatcher
            .select(&record("Remix", "DJ Remix"), &candidates)
            .expect("fuzzy match");
        assert_eq!(hit.tier, MatchTier::Fuzzy);
    }

    #[test]
    fn fuzzy_tier_accepts_remix_with_partial_artist() {
        let candidates = vec![candidate("1", "Let It Be (Remix)", "The Beatles")];
        let hit = CandidateMatcher
            .select(&record("Let It Be", "Beatles"), &candidates)
            .expect("fuzzy match");

        assert_eq!(hit.tier, MatchTier::Fuzzy);
        assert_eq!(hit.candidate.name, "Let It Be (Remix)");
    }

    #[test]
    fn fuzzy_tier_checks_containment_both_ways() {
        let candidates = vec![candidate("1", "Heroes", "Bowie")];
        let hit = CandidateMatcher
            .select(&record("Heroes (2017 Remaster)", "David Bowie"), &candidates)
            .expect("reverse containment");
        assert_eq!(hit.tier, MatchTier::Fuzzy);
    }

    #[test]
    fn fuzzy_tier_ignores_candidates_past_the_window() {
        let mut candidates: Vec<_> = (0..CANDIDATE_WINDOW)
            .map(|i| candidate(&i.to_string(), "Unrelated", "Nobody"))
            .collect();
        candidates.push(candidate("late", "Let It Be (Remix)", "The Beatles"));

        assert!(CandidateMatcher
            .select(&record("Let It Be", "Beatles"), &candidates)
            .is_none());
    }

    #[test]
    fn album_tier_ignores_candidates_past_the_window() {
        let mut candidates: Vec<_> = (0..CANDIDATE_WINDOW)
            .map(|i| candidate(&i.to_string(), "Unrelated", "Nobody"))
            .collect();
        candidates.push(candidate("late", "Obscure Song (Remix)", "Unknown Artist"));

        assert!(CandidateMatcher
            .select_with(
                &MatchTier::ALBUM_RETRY,
                &record("Obscure Song", "Unknown Artist"),
                &candidates,
            )
            .is_none());
    }

    #[test]
    fn album_tier_is_one_directional() {
        let candidates = vec![candidate("1", "Heroes", "Bowie")];
        let hit = CandidateMatcher.select_with(
            &MatchTier::ALBUM_RETRY,
            &record("Heroes (2017 Remaster)", "David Bowie"),
            &candidates,
        );
        assert!(hit.is_none());

        let candidates = vec![candidate("2", "Obscure Song - Remix", "Unknown Artist & Friends")];
        let hit = CandidateMatcher
            .select_with(
                &MatchTier::ALBUM_RETRY,
                &record("Obscure Song", "Unknown Artist"),
                &candidates,
            )
            .expect("record inside candidate");
        assert_eq!(hit.tier, MatchTier::AlbumAugmented);
    }

    #[test]
    fn empty_candidate_list_has_no_match() {
        assert!(CandidateMatcher.select(&record("Yesterday", "The Beatles"), &[]).is_none());
    }

    #[test]
    fn selection_is_repeatable() {
        let candidates = vec![
            candidate("1", "Let It Be (Remix)", "The Beatles"),
            candidate("2", "Let It Be", "Beatles Tribute Band"),
        ];
        let rec = record("Let It Be", "Beatles");

        let first = CandidateMatcher.select(&rec, &candidates);
        let second = CandidateMatcher.select(&rec, &candidates);
        assert_eq!(first, second);
        assert_eq!(first.map(|hit| hit.candidate.id.as_str()), Some("1"));
    }
}
