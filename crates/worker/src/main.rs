//! swcache entry point.
//!
//! Loads layered configuration, hosts one worker instance over the SQLite
//! cache and the HTTP client, and prints one JSON report per line on stdout.
//! Logging goes to stderr so stdout stays machine-readable.

use anyhow::Result;
use clap::Parser;
use swcache_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod host;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = cli::Cli::parse();
    let config = AppConfig::load()?;

    tracing::info!(cache = %config.cache_name, scope = %config.scope, db = %config.db_path.display(), "starting swcache");

    let host = host::Host::from_config(&config).await?;
    for report in host.run(cli.command).await? {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
