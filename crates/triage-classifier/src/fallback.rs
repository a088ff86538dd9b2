//! Two-stage strategy: a primary stage tried first, a secondary stage used
//! only when the primary is absent or fails.

use crate::error::ClassifyError;
use crate::{Classify, Suggestion};

/// Primary-then-secondary classifier.
///
/// A `None` primary means "not configured" and goes straight to the
/// secondary. Primary errors are logged at `warn` and never returned.
#[derive(Debug, Clone)]
pub struct Fallback<P, S> {
    primary: Option<P>,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    #[must_use]
    pub const fn new(primary: Option<P>, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Whether a primary stage is present.
    #[must_use]
    pub const fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}

impl<P, S> Classify for Fallback<P, S>
where
    P: Classify + Sync,
    S: Classify + Sync,
{
    async fn classify(&self, description: &str) -> Result<Suggestion, ClassifyError> {
        if let Some(primary) = &self.primary {
            match primary.classify(description).await {
                Ok(suggestion) => return Ok(suggestion),
                Err(error) => {
                    tracing::warn!(%error, "primary classifier failed; using fallback");
                }
            }
        }
        self.secondary.classify(description).await
    }
}
