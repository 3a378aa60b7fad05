// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tidewater_application::{run_import, CatalogError, LoftyTagExtractor, Pacer};
use tidewater_config::{load as load_config, TidalConfig};
use tidewater_tidal::TidalClient;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let client = build_client(&config.tidal)?;
    let pacer = Pacer::from_config(&config.import);

    let stats = run_import(
        &config,
        || async move { client.authenticate().await.map_err(CatalogError::from) },
        LoftyTagExtractor,
        pacer,
    )
    .await?;

    info!(
        target: "cli",
        matched = stats.matched(),
        processed = stats.processed(),
        failed = stats.failures().len(),
        "import complete"
    );
    Ok(())
}

fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(tidal: &TidalConfig) -> Result<TidalClient> {
    let mut builder = TidalClient::builder()
        .base_url(&tidal.base_url)
        .timeout(Duration::from_secs(tidal.timeout_secs))
        .search_limit(tidal.search_limit);

    if let Some(token) = &tidal.access_token {
        builder = builder.access_token(token);
    }

    Ok(builder.build()?)
}
