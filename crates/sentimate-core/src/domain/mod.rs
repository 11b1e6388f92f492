//! Domain model (IDs, review messages, sentiment results, records, outcomes).

pub mod errors;
pub mod ids;
pub mod outcome;
pub mod record;
pub mod review;
pub mod sentiment;

pub use self::errors::{ApiError, ConfigError, QueueError, SentimateError, StoreError};
pub use self::ids::{RecordId, ReviewId};
pub use self::outcome::{HookOutcome, ProcessOutcome, SaveOutcome};
pub use self::record::{NewReviewSentiment, ReviewSentimentRecord};
pub use self::review::{Review, ReviewMessage};
pub use self::sentiment::{RawSentiment, SentimentResult, describe_values, is_valid_sentiment};
