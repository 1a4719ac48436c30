//! Request execution
//!
//! The innermost pipeline layer: a cancellation-aware retry controller
//! around the transport call, followed by the handler's response
//! transformers.

/// Backoff delays and cancellable sleeps
pub mod backoff;
/// Cancellation handles
pub mod cancel;
/// Innermost pipeline layer
pub mod request;
/// Retry controller
pub mod retry;

pub use backoff::{exponential_jitter_delay, parse_retry_after, sleep_with_cancel};
pub use cancel::CancelHandle;
pub use request::RequestInterceptor;
pub use retry::RetryController;
