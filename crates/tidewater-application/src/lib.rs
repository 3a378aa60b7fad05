// SPDX-License-Identifier: GPL-3.0-or-later
pub mod catalog;
pub mod failure_log;
pub mod import;
pub mod matching;
pub mod pacing;
pub mod scan;
pub mod search;
pub mod tags;
#[cfg(test)]
mod test_support;

pub use catalog::{CatalogError, RemoteCatalog};
pub use failure_log::FailureLog;
pub use import::{log_summary, run_import, summary_lines, ImportPipeline, PipelineError};
pub use matching::{CandidateMatcher, MatchTier, TierMatch, CANDIDATE_WINDOW};
pub use pacing::{Pacer, Sleeper, TokioSleeper};
pub use scan::{scan_audio_files, ScanError};
pub use search::{album_query, primary_query, Resolution, SearchOrchestrator};
pub use tags::{EmbeddedTags, LoftyTagExtractor, TagError, TagExtractor};
