//! Outcome model: what happened to one message or one save.
//!
//! Write-path failures are absorbed and logged where they happen. These
//! values let callers (the worker loop, tests) see what was absorbed without
//! turning best-effort enrichment into a hard failure.

use serde::{Deserialize, Serialize};

use super::ids::RecordId;

/// Classification of a processed queue message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessOutcome {
    /// A record was written (inserted or replaced) with this id.
    Stored(RecordId),

    /// The API could not be reached or answered with an error status.
    ApiUnavailable(String),

    /// The API answered, but without a usable type/score/ratio.
    InvalidResult,

    /// The result was valid but the message carried no review id.
    MissingReviewId,

    /// The store rejected the record.
    SaveFailed(String),
}

impl ProcessOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, ProcessOutcome::Stored(_))
    }

    /// Only transport failures are worth another attempt; a malformed reply
    /// or message will be malformed again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProcessOutcome::ApiUnavailable(_))
    }
}

/// Result of `ReviewSentimentService::save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveOutcome {
    Saved(RecordId),
    Failed(String),
}

/// Result of the review-submitted hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookOutcome {
    Published,
    Skipped,
}
