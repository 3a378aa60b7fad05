// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tidewater_config::ImportConfig;

/// Something that can wait. Swapped for a recording fake in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Request pacing for the catalog.
///
/// Two delays shape the request pattern of a run: a fixed wait before every
/// search query, and a uniformly random wait between consecutive files.
#[derive(Clone)]
pub struct Pacer {
    sleeper: Arc<dyn Sleeper>,
    query_delay: Duration,
    min_file_delay: Duration,
    max_file_delay: Duration,
}

impl Pacer {
    /// Create a pacer. An inverted file-delay range collapses to `min_file_delay`.
    pub fn new(
        sleeper: Arc<dyn Sleeper>,
        query_delay: Duration,
        min_file_delay: Duration,
        max_file_delay: Duration,
    ) -> Self {
        Self {
            sleeper,
            query_delay,
            min_file_delay,
            max_file_delay: max_file_delay.max(min_file_delay),
        }
    }

    /// Pacer backed by the tokio timer with the configured delays.
    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            Arc::new(TokioSleeper),
            config.query_delay(),
            config.min_sleep(),
            config.max_sleep(),
        )
    }

    /// Wait the fixed pre-query delay.
    pub async fn before_query(&self) {
        tracing::trace!(target: "search", "pacing: waiting {:?} before query", self.query_delay);
        self.sleeper.sleep(self.query_delay).await;
    }

    /// Wait a random delay within the file-delay bounds; returns the delay used.
    pub async fn between_files(&self) -> Duration {
        let delay = self.next_file_delay();
        tracing::debug!(target: "import", "pacing: waiting {:?} before next file", delay);
        self.sleeper.sleep(delay).await;
        delay
    }

    fn next_file_delay(&self) -> Duration {
        if self.min_file_delay >= self.max_file_delay {
            return self.min_file_delay;
        }
        let secs = rand::thread_rng()
            .gen_range(self.min_file_delay.as_secs_f64()..=self.max_file_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer")
            .field("query_delay", &self.query_delay)
            .field("min_file_delay", &self.min_file_delay)
            .field("max_file_delay", &self.max_file_delay)
            .finish()
    }
}
