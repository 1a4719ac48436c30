//! Retry policy

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_DELAY_MS, DEFAULT_RETRY_DELAY_MS,
    NON_RETRYABLE_STATUSES, RETRYABLE_STATUSES, RETRY_AFTER_STATUSES,
};

/// Attempt count and backoff bounds for one call
///
/// A call makes at most `max_retries + 1` transport attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries beyond the first attempt
    pub max_retries: u64,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Total number of attempts allowed
    pub fn max_attempts(&self) -> u64 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_RETRY_DELAY_MS),
        }
    }
}

/// Whether a non-2xx status should be retried while attempts remain
///
/// Any listed retryable status or any 5xx status qualifies, except the
/// explicitly non-retryable ones.
pub fn is_retryable_status(status: u16) -> bool {
    !NON_RETRYABLE_STATUSES.contains(&status)
        && (RETRYABLE_STATUSES.contains(&status) || status >= 500)
}

/// Whether a `Retry-After` header is honoured for this status
pub fn honours_retry_after(status: u16) -> bool {
    RETRY_AFTER_STATUSES.contains(&status)
}
