// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub music_root: PathBuf,
    pub log_file: PathBuf,
    pub supported_extensions: Vec<String>,
    pub min_sleep_secs: f64,
    pub max_sleep_secs: f64,
    pub query_delay_ms: u64,
    /// Retry a failed lookup with the album appended to the query.
    pub metadata_search_retry: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            music_root: PathBuf::new(),
            log_file: PathBuf::from("failed_tracks.log"),
            supported_extensions: vec!["mp3".to_string(), "flac".to_string(), "m4a".to_string()],
            min_sleep_secs: 1.0,
            max_sleep_secs: 4.0,
            query_delay_ms: 500,
            metadata_search_retry: true,
        }
    }
}

impl ImportConfig {
    pub fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }

    pub fn min_sleep(&self) -> Duration {
        Duration::from_secs_f64(self.min_sleep_secs)
    }

    pub fn max_sleep(&self) -> Duration {
        Duration::from_secs_f64(self.max_sleep_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    pub name: String,
    pub description: String,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            name: "Imported from Local".to_string(),
            description: "Songs matched by metadata from local files".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub search_limit: u32,
    pub timeout_secs: u64,
}

impl Default for TidalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tidal.com/v1".to_string(),
            access_token: None,
            search_limit: 25,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub import: ImportConfig,
    pub playlist: PlaylistConfig,
    pub tidal: TidalConfig,
}

impl AppConfig {
    /// Reject settings the import run cannot work with.
    pub fn validate(&self) -> Result<()> {
        let import = &self.import;
        if !import.min_sleep_secs.is_finite() || !import.max_sleep_secs.is_finite() {
            bail!("sleep bounds must be finite numbers");
        }
        if import.min_sleep_secs < 0.0 {
            bail!("min_sleep_secs must not be negative (got {})", import.min_sleep_secs);
        }
        for (name, secs) in [
            ("min_sleep_secs", import.min_sleep_secs),
            ("max_sleep_secs", import.max_sleep_secs),
        ] {
            if Duration::try_from_secs_f64(secs).is_err() {
                bail!("{name} ({secs}) is too large to represent as a duration");
            }
        }
        if import.min_sleep_secs > import.max_sleep_secs {
            bail!(
                "min_sleep_secs ({}) is greater than max_sleep_secs ({})",
                import.min_sleep_secs,
                import.max_sleep_secs
            );
        }
        if import.supported_extensions.is_empty() {
            bail!("supported_extensions must list at least one extension");
        }
        Ok(())
    }
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: TIDEWATER_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TIDEWATER_").split("__"));

    let config: AppConfig = figment.extract()?;
    config.validate()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
