//! # Menu Catalog Runtime
//!
//! Serves catalog ordering commands as newline-delimited JSON.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (stderr; stdout carries responses)
//! 2. Load configuration from the environment
//! 3. Build the catalog container
//! 4. Serve stdin until EOF or Ctrl+C

use anyhow::{Context, Result};
use catalog_runtime::{driver, CatalogContainer, RuntimeConfig};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting menu catalog runtime v{}", env!("CARGO_PKG_VERSION"));

    let config = RuntimeConfig::from_env().context("invalid configuration")?;
    let container = CatalogContainer::new(config);
    let handler = container.handler();

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = driver::run(&handler, stdin, stdout) => {
            let stats = result.context("command stream failed")?;
            info!(processed = stats.processed, failed = stats.failed, "Input closed, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
    }

    Ok(())
}
