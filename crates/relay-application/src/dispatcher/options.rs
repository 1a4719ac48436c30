use std::fmt;
use std::sync::Arc;

use relay_domain::error::Error;

use crate::execution::CancelHandle;

/// Fallback notification: `(error, from_identifier, to_identifier)`
pub type FallbackHook = Arc<dyn Fn(&Error, &str, &str) + Send + Sync>;

/// Per-call options that are not part of the JSON configuration
///
/// A per-call fallback hook replaces the dispatcher-wide one.
#[derive(Clone, Default)]
pub struct CallOptions {
    /// Caller-supplied cancellation handle
    pub cancel: Option<CancelHandle>,
    /// Fallback notification for this call
    pub on_fallback: Option<FallbackHook>,
}

impl CallOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a cancellation handle
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Attach a fallback notification
    #[must_use]
    pub fn with_on_fallback<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Error, &str, &str) + Send + Sync + 'static,
    {
        self.on_fallback = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("cancel", &self.cancel)
            .field("on_fallback", &self.on_fallback.is_some())
            .finish()
    }
}
