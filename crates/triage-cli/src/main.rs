use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod tui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("triage error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = bootstrap::load_config(&cli)?;

    let log_path = bootstrap::log_path(&cli, &config);
    init_tracing(&log_path, cli.quiet, cli.verbose)?;
    tracing::info!(db = %config.general.db_path, "starting triage");

    let store = bootstrap::open_store(&config).await?;
    let classifier = bootstrap::build_classifier(&config, cli.offline);
    let mode = bootstrap::classifier_mode(&config, cli.offline, &classifier);

    let app = tui::App::new(store, classifier, mode).await;
    tui::run(app).await
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stderr once it starts.
fn init_tracing(log_path: &Path, quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TRIAGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file at {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
