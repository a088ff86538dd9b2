//! Deterministic keyword heuristic.
//!
//! A description is Urgent when its lower-cased text contains any of
//! [`URGENT_KEYWORDS`] as a substring. Substring, not word, matching: "now"
//! also fires on "snow" and "known".

use triage_core::enums::Priority;

use crate::error::ClassifyError;
use crate::{Classify, Suggestion, SuggestionSource};

/// Substrings that mark a description as urgent.
pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "emergency",
    "critical",
    "today",
    "now",
    "deadline",
    "crucial",
    "important",
    "meeting",
    "due",
    "expire",
    "cancel",
    "call",
    "response",
];

/// Classify `description` by keyword alone.
#[must_use]
pub fn classify_keywords(description: &str) -> Priority {
    let lowered = description.to_lowercase();
    if URGENT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Priority::Urgent
    } else {
        Priority::Normal
    }
}

/// The keyword heuristic as a [`Classify`] stage. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classify for KeywordClassifier {
    async fn classify(&self, description: &str) -> Result<Suggestion, ClassifyError> {
        Ok(Suggestion {
            priority: classify_keywords(description),
            source: SuggestionSource::Keywords,
        })
    }
}
