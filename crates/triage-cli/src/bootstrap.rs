use std::path::{Path, PathBuf};

use anyhow::Context;

use triage_classifier::PriorityClassifier;
use triage_config::TriageConfig;
use triage_db::service::TaskStore;

use crate::cli::Cli;
use crate::tui::ClassifierMode;

const LOG_FILE_NAME: &str = "triage.log";

/// Load layered config (reading `.env` first) and apply launch flags.
pub fn load_config(cli: &Cli) -> anyhow::Result<TriageConfig> {
    let mut config = TriageConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_flags(&mut config, cli)?;
    Ok(config)
}

fn apply_flags(config: &mut TriageConfig, cli: &Cli) -> anyhow::Result<()> {
    if let Some(db) = &cli.db {
        config.general.db_path = db.to_string_lossy().into_owned();
        config.validate().context("invalid --db path")?;
    }
    Ok(())
}

/// `--log-file` if given, else `triage.log` beside the database file.
pub fn log_path(cli: &Cli, config: &TriageConfig) -> PathBuf {
    if let Some(path) = &cli.log_file {
        return path.clone();
    }
    let db_path = config.general.db_path.as_str();
    if db_path == ":memory:" {
        return PathBuf::from(LOG_FILE_NAME);
    }
    Path::new(db_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from(LOG_FILE_NAME), |dir| dir.join(LOG_FILE_NAME))
}

pub async fn open_store(config: &TriageConfig) -> anyhow::Result<TaskStore> {
    TaskStore::new_local(&config.general.db_path)
        .await
        .with_context(|| {
            format!(
                "failed to open task database at {}",
                config.general.db_path
            )
        })
}

pub fn build_classifier(config: &TriageConfig, offline: bool) -> PriorityClassifier {
    if offline {
        tracing::info!("--offline given; remote classifier disabled");
        return PriorityClassifier::offline();
    }
    PriorityClassifier::from_config(&config.openai)
}

/// Why the session will or will not use the remote classifier.
pub fn classifier_mode(
    config: &TriageConfig,
    offline: bool,
    classifier: &PriorityClassifier,
) -> ClassifierMode {
    if classifier.is_remote_enabled() {
        ClassifierMode::Remote
    } else if offline {
        ClassifierMode::Offline
    } else if config.openai.is_configured() {
        ClassifierMode::Unavailable
    } else {
        ClassifierMode::NoKey
    }
}
