// SPDX-License-Identifier: GPL-3.0-or-later

//! Import run: local files in, playlist entries out.
//!
//! Every file is processed to completion (tags, search, playlist insert)
//! before the next one starts, and each file ends with exactly one
//! [`MatchOutcome`]. Per-file problems are recorded and never abort the run;
//! only the checks made before the first file (failure log, music root,
//! authentication, playlist creation, scan) are fatal.

use crate::catalog::{CatalogError, RemoteCatalog};
use crate::failure_log::FailureLog;
use crate::pacing::Pacer;
use crate::scan::{scan_audio_files, ScanError};
use crate::search::{Resolution, SearchOrchestrator};
use crate::tags::TagExtractor;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tidewater_config::AppConfig;
use tidewater_domain::{MatchOutcome, PlaylistHandle, RunStatistics};
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to reset failure log {path}: {source}")]
    FailureLog {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Directory {0} does not exist or is not accessible")]
    MusicRootMissing(String),

    #[error("authentication failed: {0}")]
    Authentication(#[source] CatalogError),

    #[error("failed to create playlist: {0}")]
    Playlist(#[source] CatalogError),

    #[error("failed to scan music folder: {0}")]
    Scan(#[from] ScanError),
}

/// Per-file import workflow bound to one catalog session and playlist.
pub struct ImportPipeline<'a, C: ?Sized, T> {
    catalog: &'a C,
    extractor: T,
    orchestrator: SearchOrchestrator,
    pacer: Pacer,
    failure_log: FailureLog,
    playlist: PlaylistHandle,
}

impl<'a, C, T> ImportPipeline<'a, C, T>
where
    C: RemoteCatalog + ?Sized,
    T: TagExtractor,
{
    pub fn new(
        catalog: &'a C,
        extractor: T,
        orchestrator: SearchOrchestrator,
        pacer: Pacer,
        failure_log: FailureLog,
        playlist: PlaylistHandle,
    ) -> Self {
        Self {
            catalog,
            extractor,
            orchestrator,
            pacer,
            failure_log,
            playlist,
        }
    }

    pub fn failure_log(&self) -> &FailureLog {
        &self.failure_log
    }

    /// Process every file in order, pausing between files.
    pub async fn run(&self, files: &[PathBuf]) -> RunStatistics {
        let mut stats = RunStatistics::new();

        for path in files {
            self.process(path, &mut stats).await;
            self.pacer.between_files().await;
        }

        stats.finish();
        stats
    }

    /// Classify one file and record the outcome in `stats` and, for any
    /// failure, in the failure log.
    pub async fn process(&self, path: &Path, stats: &mut RunStatistics) -> MatchOutcome {
        stats.record_processed();
        info!(
            target: "import",
            processed = stats.processed(),
            path = %path.display(),
            "processing file"
        );

        let outcome = self.classify(path, stats).await;

        if let Some(reason) = outcome.failure_reason() {
            warn!(target: "import", path = %path.display(), reason, "file not imported");
            stats.record_failure(path, reason);
            if let Err(error) = self.failure_log.append(path, reason) {
                warn!(
                    target: "import",
                    log = %self.failure_log.path().display(),
                    error = %error,
                    "failed to append to failure log"
                );
            }
        }

        outcome
    }

    async fn classify(&self, path: &Path, stats: &mut RunStatistics) -> MatchOutcome {
        let record = match self.extractor.extract(path) {
            Ok(tags) => tags.into_record(),
            Err(error) => {
                warn!(target: "import", path = %path.display(), error = %error, "error reading metadata");
                None
            }
        };

        let Some(record) = record else {
            return MatchOutcome::read_failure();
        };

        info!(
            target: "import",
            "looking for: {} - {}",
            record.artist(),
            record.title()
        );

        let (candidate, tier) = match self.orchestrator.resolve(self.catalog, &record).await {
            Resolution::Matched { candidate, tier } => (candidate, tier),
            Resolution::NoMatch => return MatchOutcome::NoMatch,
            Resolution::Failed(error) => return MatchOutcome::search_failure(error),
        };

        if let Err(error) = self
            .catalog
            .add_tracks(&self.playlist, std::slice::from_ref(&candidate.id))
            .await
        {
            return MatchOutcome::insert_failure(error);
        }

        stats.record_match();
        info!(
            target: "import",
            tier = tier.as_str(),
            track_id = %candidate.id,
            "added: {} - {}",
            candidate.artist_name,
            candidate.name
        );
        info!(
            target: "import",
            "progress: {}/{} songs matched",
            stats.matched(),
            stats.processed()
        );

        MatchOutcome::Matched(candidate.id)
    }
}

/// Run a complete import.
///
/// Order of the fatal checks: the failure log is reset, the music root must
/// exist, then `authenticate` opens the catalog session and the target
/// playlist is created. Only after that are files scanned and processed.
pub async fn run_import<C, F, Fut, T>(
    config: &AppConfig,
    authenticate: F,
    extractor: T,
    pacer: Pacer,
) -> Result<RunStatistics, PipelineError>
where
    C: RemoteCatalog,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C, CatalogError>>,
    T: TagExtractor,
{
    let import = &config.import;

    let failure_log =
        FailureLog::create(&import.log_file).map_err(|source| PipelineError::FailureLog {
            path: import.log_file.display().to_string(),
            source,
        })?;

    if !import.music_root.is_dir() {
        return Err(PipelineError::MusicRootMissing(
            import.music_root.display().to_string(),
        ));
    }

    let catalog = authenticate().await.map_err(PipelineError::Authentication)?;

    let playlist = catalog
        .create_playlist(&config.playlist.name, &config.playlist.description)
        .await
        .map_err(PipelineError::Playlist)?;
    info!(target: "import", playlist = %playlist.id, name = %playlist.name, "playlist created");

    let files = scan_audio_files(&import.music_root, &import.supported_extensions)?;
    info!(target: "import", count = files.len(), root = %import.music_root.display(), "audio files found");

    let orchestrator = SearchOrchestrator::new(pacer.clone(), import.metadata_search_retry);
    let pipeline = ImportPipeline::new(&catalog, extractor, orchestrator, pacer, failure_log, playlist);

    let stats = pipeline.run(&files).await;
    log_summary(&stats, pipeline.failure_log().path());
    Ok(stats)
}

/// End-of-run summary text: the matched/processed total, then (only when
/// something failed) a header, one `- <path>: <reason>` line per failure in
/// processing order, and the failure log location.
pub fn summary_lines(stats: &RunStatistics, log_path: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "finished! added {} out of {} songs to playlist",
        stats.matched(),
        stats.processed()
    )];

    if stats.failures().is_empty() {
        return lines;
    }

    lines.push("failed songs:".to_string());
    lines.extend(
        stats
            .failures()
            .iter()
            .map(|failure| format!("- {}: {}", failure.path.display(), failure.reason)),
    );
    lines.push(format!("see details in: {}", log_path.display()));
    lines
}

/// Log [`summary_lines`]; failure lines go out at `warn`.
pub fn log_summary(stats: &RunStatistics, log_path: &Path) {
    let lines = summary_lines(stats, log_path);
    let last = lines.len() - 1;
    for (index, line) in lines.iter().enumerate() {
        if index == 0 {
            info!(target: "import", elapsed_secs = stats.elapsed().num_seconds(), "{}", line);
        } else if index == last {
            info!(target: "import", "{}", line);
        } else {
            warn!(target: "import", "{}", line);
        }
    }
}
