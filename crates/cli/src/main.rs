//! # notedigest: Notion Summary & Keyword Backfill
//!
//! Thin entrypoint for the `notedigest` binary. All logic lives in the
//! `notedigest_cli` library crate.

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use notedigest_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load `.env` before clap reads its `env` fallbacks
    dotenv().ok();

    // 2. Setup logging
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("notedigest=info".parse()?))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 3. Parse CLI arguments
    let cli = Cli::parse();

    // 4. Run and report the failure chain on error
    if let Err(e) = run(cli).await {
        eprintln!("[notedigest error] Failed to execute command: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
