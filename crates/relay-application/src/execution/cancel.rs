//! Cancellation handles

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use relay_domain::error::Error;
use relay_domain::value_objects::AbortReason;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation signal for one call
///
/// Cloning shares the signal. A handle derived with
/// [`CancelHandle::with_timeout`] fires when its parent fires or when its own
/// deadline passes, whichever comes first; firing the derived handle does not
/// affect the parent.
#[derive(Clone)]
pub struct CancelHandle {
    inner: Arc<Inner>,
}

struct Inner {
    token: CancellationToken,
    reason: OnceLock<AbortReason>,
    parent: Option<CancelHandle>,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl CancelHandle {
    /// Create a handle that only fires when cancelled explicitly
    pub fn new() -> Self {
        Self::from_parts(CancellationToken::new(), None, None)
    }

    fn from_parts(
        token: CancellationToken,
        parent: Option<CancelHandle>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                token,
                reason: OnceLock::new(),
                parent,
                deadline: timeout.map(|t| Instant::now() + t),
                timeout,
            }),
        }
    }

    /// Derive a child handle that also fires after `timeout`
    ///
    /// With no timeout the child fires only when the parent does.
    #[must_use]
    pub fn with_timeout(&self, timeout: Option<Duration>) -> Self {
        Self::from_parts(self.inner.token.child_token(), Some(self.clone()), timeout)
    }

    /// Create a handle that fires after `timeout`, if one is given
    pub fn timeout(timeout: Option<Duration>) -> Self {
        Self::from_parts(CancellationToken::new(), None, timeout)
    }

    /// Cancel explicitly
    pub fn cancel(&self) {
        self.abort(AbortReason::Cancelled);
    }

    /// Fire with the given reason; the first reason wins
    pub fn abort(&self, reason: AbortReason) {
        let _ = self.inner.reason.set(reason);
        self.inner.token.cancel();
    }

    /// Why the handle fired, or `None` while it is still active
    pub fn reason(&self) -> Option<AbortReason> {
        if let Some(reason) = self.inner.reason.get() {
            return Some(*reason);
        }
        if let Some(reason) = self.inner.parent.as_ref().and_then(Self::reason) {
            return Some(reason);
        }
        if self.inner.deadline.is_some_and(|d| Instant::now() >= d) {
            self.abort(AbortReason::Timeout);
            return Some(AbortReason::Timeout);
        }
        self.inner
            .token
            .is_cancelled()
            .then_some(AbortReason::Cancelled)
    }

    /// Whether the handle has fired
    pub fn is_aborted(&self) -> bool {
        self.reason().is_some()
    }

    /// Timeout this handle was derived with, searching parents
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.inner
            .timeout
            .or_else(|| self.inner.parent.as_ref().and_then(Self::timeout_duration))
    }

    /// Earliest deadline of this handle and its parents
    fn earliest_deadline(&self) -> Option<Instant> {
        let inherited = self
            .inner
            .parent
            .as_ref()
            .and_then(Self::earliest_deadline);
        match (self.inner.deadline, inherited) {
            (Some(own), Some(parent)) => Some(own.min(parent)),
            (own, parent) => own.or(parent),
        }
    }

    /// Timeout of the handle whose deadline fired, searching parents
    fn fired_timeout(&self) -> Option<Duration> {
        if self.inner.reason.get() == Some(&AbortReason::Timeout) {
            return self.inner.timeout;
        }
        self.inner.parent.as_ref().and_then(Self::fired_timeout)
    }

    /// Wait until the handle fires
    ///
    /// Deadlines of parent handles count as well as this handle's own.
    pub async fn aborted(&self) -> AbortReason {
        loop {
            match self.earliest_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        () = self.inner.token.cancelled() => {}
                        () = tokio::time::sleep_until(deadline) => {}
                    }
                }
                None => self.inner.token.cancelled().await,
            }
            if let Some(reason) = self.reason() {
                return reason;
            }
        }
    }

    /// Error describing an abort for `reason`
    ///
    /// A timeout abort on a handle with a known timeout becomes
    /// [`Error::RequestTimedOut`]; anything else is [`Error::Aborted`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn abort_error(&self, reason: AbortReason) -> Error {
        let timeout = self.fired_timeout().or_else(|| self.timeout_duration());
        match (reason, timeout) {
            (AbortReason::Timeout, Some(timeout)) => Error::timed_out(timeout.as_millis() as u64),
            (reason, _) => Error::aborted(reason),
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("reason", &self.reason())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}
