//! Backoff delays
//!
//! Exponential backoff with full jitter, `Retry-After` parsing and sleeps
//! that end early when the call is cancelled.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use relay_domain::error::Result;

use super::cancel::CancelHandle;

fn as_millis_u64(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Exponential backoff delay with jitter
///
/// The nominal delay is `base * 2^attempt`; the result is drawn uniformly
/// from the upper half of it and capped at `cap`.
pub fn exponential_jitter_delay(base: Duration, cap: Duration, attempt: u64) -> Duration {
    let base_ms = as_millis_u64(base);
    let cap_ms = as_millis_u64(cap);
    if base_ms == 0 || cap_ms == 0 {
        return Duration::ZERO;
    }
    let shift = u32::try_from(attempt.min(32)).unwrap_or(32);
    let exp_ms = base_ms.saturating_mul(1_u64 << shift);
    let jittered_ms = rand::rng().random_range(exp_ms / 2..=exp_ms);
    Duration::from_millis(jittered_ms.min(cap_ms))
}

/// Delay requested by a `Retry-After` header value
///
/// Accepts delta-seconds (fractions allowed) or an HTTP date; a date in the
/// past yields zero. The result is capped at `cap`. Returns `None` when the
/// value is blank or unparseable.
pub fn parse_retry_after(value: &str, cap: Duration) -> Option<Duration> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let delay = if let Ok(seconds) = trimmed.parse::<f64>() {
        if !seconds.is_finite() {
            return None;
        }
        Duration::from_secs_f64(seconds.max(0.0).min(cap.as_secs_f64()))
    } else {
        let at = DateTime::parse_from_rfc2822(trimmed).ok()?;
        (at.with_timezone(&Utc) - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    };
    Some(delay.min(cap))
}

/// Sleep for `delay` unless the call is cancelled first
///
/// # Errors
///
/// The abort error of `cancel` when it has already fired or fires mid-wait.
pub async fn sleep_with_cancel(delay: Duration, cancel: Option<&CancelHandle>) -> Result<()> {
    if let Some(cancel) = cancel
        && let Some(reason) = cancel.reason()
    {
        return Err(cancel.abort_error(reason));
    }
    if delay.is_zero() {
        return Ok(());
    }

    match cancel {
        Some(cancel) => {
            tokio::select! {
                () = tokio::time::sleep(delay) => Ok(()),
                reason = cancel.aborted() => Err(cancel.abort_error(reason)),
            }
        }
        None => {
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }
}
