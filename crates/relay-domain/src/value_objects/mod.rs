//! Domain Value Objects
//!
//! Immutable values that flow through a single call. They carry no identity
//! and no behaviour beyond simple accessors.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ParsedIdentifier`] | A target identifier split into provider and model |
//! | [`Capability`] | Kind of operation a call performs |
//! | [`RetryPolicy`] | Attempt count and backoff bounds |
//! | [`RequestConfig`] | Provider-built HTTP request descriptor |
//! | [`TransportResponse`] | Raw response returned by a transport |
//! | [`ResponseData`] | Decoded response payload |
//! | [`AbortReason`] | Why a call was cancelled |

/// Cancellation reasons
pub mod abort;
/// Capability kinds
pub mod capability;
/// Parsed target identifiers
pub mod identifier;
/// Outbound request descriptors
pub mod request;
/// Transport responses and decoded payloads
pub mod response;
/// Retry policy
pub mod retry;

pub use abort::AbortReason;
pub use capability::Capability;
pub use identifier::ParsedIdentifier;
pub use request::{FormPart, FormValue, RequestBody, RequestConfig};
pub use response::{ByteStream, PayloadStream, ResponseData, ResponseHolder, TransportResponse};
pub use retry::{RetryPolicy, honours_retry_after, is_retryable_status};
