use std::path::PathBuf;

use clap::Parser;

/// Launch flags for the `triage` binary.
#[derive(Debug, Parser)]
#[command(name = "triage", version, about = "Triage - AI-assisted to-do manager")]
pub struct Cli {
    /// Task database file (overrides `general.db_path`)
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Never call the remote classifier; use keyword prioritization only
    #[arg(long)]
    pub offline: bool,

    /// Log file (defaults to triage.log next to the database)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
