//! Remote stage: one chat-completions call per description.
//!
//! Talks to any server implementing the OpenAI chat completions API. The
//! request carries a fixed system instruction and asks for a single word;
//! anything other than "Urgent" or "Normal" in the reply is an error, which
//! the fallback chain turns into a keyword answer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use triage_config::OpenAiConfig;
use triage_core::enums::Priority;

use crate::error::ClassifyError;
use crate::http::check_response;
use crate::{Classify, Suggestion, SuggestionSource};

pub const SYSTEM_PROMPT: &str = "You are an AI assistant that analyzes tasks and determines their priority. Respond with only 'Urgent' or 'Normal'.";

/// Build the user turn for `description`.
#[must_use]
pub fn user_prompt(description: &str) -> String {
    format!(
        "Analyze this task: '{description}'. Determine if it is Urgent or Normal priority. Respond with only one word: Urgent or Normal."
    )
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Retry policy ───────────────────────────────────────────────────

/// Bounded retry with exponential backoff for transient remote failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Cap on the delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Pause before the next attempt. A 429 waits for the server's
    /// `Retry-After`, capped at `max_delay`; anything else uses `backoff`.
    #[must_use]
    pub fn wait_for(&self, error: &ClassifyError, backoff: Duration) -> Duration {
        match error {
            ClassifyError::RateLimited { retry_after_secs } => {
                Duration::from_secs(*retry_after_secs).min(self.max_delay)
            }
            _ => backoff,
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Remote classifier backed by an OpenAI-compatible endpoint.
pub struct OpenAiClassifier {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    retry: RetryPolicy,
}

impl OpenAiClassifier {
    /// Build the remote stage from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NotConfigured`] when no API key is set, or
    /// [`ClassifyError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, ClassifyError> {
        if !config.is_configured() {
            return Err(ClassifyError::NotConfigured);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("triage/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            retry: RetryPolicy {
                max_attempts: config.max_attempts.max(1),
                ..RetryPolicy::default()
            },
        })
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// One request, no retry.
    async fn request_once(&self, description: &str) -> Result<Priority, ClassifyError> {
        let user = user_prompt(description);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let text = resp.text().await?;
        let data: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ClassifyError::Parse(format!("invalid completion body: {e}")))?;
        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ClassifyError::Parse("completion has no content".into()))?;

        parse_label(&content)
    }
}

impl Classify for OpenAiClassifier {
    async fn classify(&self, description: &str) -> Result<Suggestion, ClassifyError> {
        let mut delay = self.retry.base_delay;
        let mut attempt = 1;
        loop {
            match self.request_once(description).await {
                Ok(priority) => {
                    tracing::debug!(%priority, attempt, "remote classification succeeded");
                    return Ok(Suggestion {
                        priority,
                        source: SuggestionSource::Remote,
                    });
                }
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    let wait = self.retry.wait_for(&e, delay);
                    tracing::debug!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        ?wait,
                        error = %e,
                        "remote classification failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    delay = std::cmp::min(delay * 2, self.retry.max_delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Canonicalize a model reply into a priority.
///
/// Tolerates surrounding whitespace, quotes and a trailing period.
///
/// # Errors
///
/// Returns [`ClassifyError::UnexpectedLabel`] for anything else.
pub fn parse_label(reply: &str) -> Result<Priority, ClassifyError> {
    let cleaned = reply
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim_end_matches('.')
        .trim();
    Priority::from_label(cleaned).ok_or_else(|| ClassifyError::UnexpectedLabel(reply.to_string()))
}
