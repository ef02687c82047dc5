//! geozip - prints which states the GeoNames US postal code dataset covers.
//!
//! The dataset is downloaded once and cached locally; later runs work
//! offline from the cache.

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use geozip_core::{load_dataset, CacheManager, Config, DatasetClient, Summary};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run() -> Result<Summary> {
    let config = Config::load().context("Failed to load config")?;

    let cache_dir = config.cache_dir()?;
    let cache = CacheManager::new(cache_dir)
        .context("Failed to open cache directory")?
        .with_max_age_minutes(config.cache_max_age_minutes);
    let client = DatasetClient::new(config.dataset_source())?;

    let dataset = load_dataset(&cache, &client)
        .await
        .with_context(|| format!("Failed to load dataset from {}", client.source().url))?;

    Ok(Summary::from_lines(&dataset, config.summary_column))
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    match run().await {
        Ok(summary) => {
            info!(values = summary.values.len(), total = summary.total, "Summary ready");
            println!("{}", summary);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
