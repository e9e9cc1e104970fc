#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::path::Path;

use clap::Parser;
use europarl_attendance::{
    config::Config,
    europarl::HttpEuroparlClient,
    export::{write_events, write_member_stats},
    pipeline,
    term::TermWindow,
};
use tracing_subscriber::EnvFilter;

/// Compute plenary attendance statistics for current Members of the
/// European Parliament over the 9th term.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = match &cli.config {
        Some(path) => Config::load_required(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "europarl-attendance starting up"
    );

    let client = HttpEuroparlClient::new(&config.api.base_url);
    let today = chrono::Local::now().date_naive();
    let report = pipeline::run(&client, &TermWindow::NINTH, today).await?;

    write_member_stats(Path::new(&config.export.members_path), &report.members)?;
    if let Some(events_path) = &config.export.events_path {
        write_events(Path::new(events_path), &report.events)?;
    }

    Ok(())
}
