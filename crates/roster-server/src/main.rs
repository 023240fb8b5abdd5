//! roster server binary.
//!
//! Reads `roster.toml` (or the path given with `--config`) plus `ROSTER_*`
//! environment variables, builds an in-memory store and a ViaCEP client, and
//! serves the JSON API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_postal::ViaCepClient;
use roster_server::{ServerConfig, seed::seed_samples};
use roster_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster people registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store = Arc::new(MemoryStore::new().with_latency(cfg.simulated_latency()));
  if cfg.seed_samples {
    let created = seed_samples(&*store)
      .await
      .context("failed to seed sample people")?;
    tracing::info!(created, "seeded sample people");
  }

  let postal = Arc::new(
    ViaCepClient::new(cfg.postal_base_url.clone(), cfg.postal_timeout())
      .context("failed to build postal-code client")?,
  );

  let app = roster_server::app(store, postal);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
