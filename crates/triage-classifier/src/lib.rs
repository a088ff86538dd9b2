//! # triage-classifier
//!
//! Suggests a [`Priority`] for a task description.
//!
//! Two stages share the [`Classify`] contract:
//! - [`remote::OpenAiClassifier`] asks an OpenAI-compatible completions API
//!   for exactly one label, with bounded retries on transient failures.
//! - [`keyword::KeywordClassifier`] matches a fixed list of urgency
//!   substrings.
//!
//! [`fallback::Fallback`] composes them: the remote stage is tried when a
//! credential is configured, and any failure or absence falls through to the
//! keywords. [`PriorityClassifier`] is that composition built from config.

pub mod error;
pub mod fallback;
mod http;
pub mod keyword;
pub mod remote;

pub use error::ClassifyError;

use std::fmt;
use std::future::Future;

use triage_config::OpenAiConfig;
use triage_core::enums::Priority;

use fallback::Fallback;
use keyword::{KeywordClassifier, classify_keywords};
use remote::OpenAiClassifier;

/// Which stage produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionSource {
    Remote,
    Keywords,
}

impl SuggestionSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Keywords => "keywords",
        }
    }
}

impl fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggested priority and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub priority: Priority,
    pub source: SuggestionSource,
}

/// A classification stage.
pub trait Classify {
    /// Suggest a priority for `description`.
    fn classify(
        &self,
        description: &str,
    ) -> impl Future<Output = Result<Suggestion, ClassifyError>> + Send;
}

/// Remote stage with keyword fallback, as configured for the application.
pub struct PriorityClassifier {
    chain: Fallback<OpenAiClassifier, KeywordClassifier>,
}

impl PriorityClassifier {
    /// Build from config. A missing key, or a client that fails to build,
    /// yields a keyword-only classifier rather than an error.
    #[must_use]
    pub fn from_config(config: &OpenAiConfig) -> Self {
        let primary = match OpenAiClassifier::from_config(config) {
            Ok(client) => Some(client),
            Err(ClassifyError::NotConfigured) => {
                tracing::info!("no API key configured; using keyword prioritization");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "remote classifier unavailable; using keyword prioritization");
                None
            }
        };
        Self {
            chain: Fallback::new(primary, KeywordClassifier),
        }
    }

    /// Keyword-only classifier.
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            chain: Fallback::new(None, KeywordClassifier),
        }
    }

    /// Wrap an already-built remote stage.
    #[must_use]
    pub const fn with_remote(remote: OpenAiClassifier) -> Self {
        Self {
            chain: Fallback::new(Some(remote), KeywordClassifier),
        }
    }

    /// Whether the remote stage will be attempted.
    #[must_use]
    pub const fn is_remote_enabled(&self) -> bool {
        self.chain.has_primary()
    }

    /// Suggest a priority. Never fails: the keyword stage always answers.
    pub async fn suggest(&self, description: &str) -> Suggestion {
        match self.chain.classify(description).await {
            Ok(suggestion) => suggestion,
            Err(error) => {
                tracing::warn!(%error, "keyword stage failed; defaulting to keywords directly");
                Suggestion {
                    priority: classify_keywords(description),
                    source: SuggestionSource::Keywords,
                }
            }
        }
    }
}

impl Classify for PriorityClassifier {
    async fn classify(&self, description: &str) -> Result<Suggestion, ClassifyError> {
        Ok(self.suggest(description).await)
    }
}
