//! Retry policy: how often an unreachable sentiment API is retried.

use std::time::Duration;

/// Upper bound for a single backoff delay.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(3600);

/// Retry policy for messages whose API call failed in transport.
///
/// The API client itself never retries; the worker applies this policy
/// around `ReviewConsumer::process` and drops the message once
/// `max_attempts` is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per message, including the first one.
    pub max_attempts: u32,

    /// Base delay for the first retry.
    pub base_delay: Duration,

    /// Backoff multiplier for exponential backoff.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Calculate delay for the next retry based on attempt number.
    ///
    /// delay = base_delay * multiplier^(attempts - 1)
    ///
    /// Example with base_delay=2s, multiplier=2.0:
    /// - attempt 1 (first failure): 2s
    /// - attempt 2: 4s
    /// - attempt 3: 8s
    ///
    /// 負数・NaN・オーバーフローは `MAX_RETRY_DELAY` に丸める
    pub fn next_delay(&self, attempts: u32) -> Duration {
        let base_secs = self.base_delay.as_secs_f64();
        let exponent = i32::try_from(attempts.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay_secs = base_secs * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(delay_secs)
            .unwrap_or(MAX_RETRY_DELAY)
            .min(MAX_RETRY_DELAY)
    }

    /// May another attempt follow the `attempts` already made?
    pub fn allows_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_policy_has_reasonable_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(2));
        assert_eq!(policy.multiplier, 2.0);
    }

    #[rstest]
    #[case::first(1, 2)]
    #[case::second(2, 4)]
    #[case::third(3, 8)]
    #[case::zero_uses_base(0, 2)]
    fn exponential_backoff(#[case] attempts: u32, #[case] expected_secs: u64) {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(attempts), Duration::from_secs(expected_secs));
    }

    #[rstest]
    #[case::negative(-2.0)]
    #[case::nan(f64::NAN)]
    #[case::overflowing(1e300)]
    fn unusable_multipliers_fall_back_to_the_cap(#[case] multiplier: f64) {
        let policy = RetryPolicy {
            multiplier,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.next_delay(3), MAX_RETRY_DELAY);
    }

    #[test]
    fn retries_stop_at_max_attempts() {
        let policy = RetryPolicy::default();
        assert!(policy.allows_retry(1));
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));

        assert!(!RetryPolicy::none().allows_retry(1));
    }
}
