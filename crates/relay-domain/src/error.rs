//! Error handling types

use thiserror::Error;

use crate::value_objects::AbortReason;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for relay
///
/// Every failure surfaced by a call is one of these variants, so callers can
/// match broadly (any `Error`) or narrowly (a single variant).
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed target identifier, raised before any network activity
    #[error("Invalid identifier \"{identifier}\": {reason}")]
    InvalidIdentifier {
        /// The identifier as supplied by the caller
        identifier: String,
        /// Which rule the identifier broke
        reason: String,
    },

    /// The route chain was exhausted without binding a provider
    #[error("No provider found for \"{identifier}\"")]
    NoProviderFound {
        /// The identifier that could not be routed
        identifier: String,
    },

    /// A provider matched but has no handler for the requested capability
    #[error("Provider \"{provider}\" does not support capability \"{capability}\"")]
    UnsupportedCapability {
        /// Name of the matched provider
        provider: String,
        /// The capability that was requested
        capability: String,
    },

    /// The upstream answered with a terminal non-2xx response
    #[error("[{provider}] HTTP {status}: {body}")]
    ProviderRejected {
        /// Name of the provider that rejected the request
        provider: String,
        /// HTTP status code of the final response
        status: u16,
        /// Response body text of the final response
        body: String,
    },

    /// The configured call timeout elapsed
    #[error("Request timed out after {timeout_ms}ms")]
    RequestTimedOut {
        /// The configured limit in milliseconds
        timeout_ms: u64,
    },

    /// An interceptor invoked its continuation more than once
    #[error("Continuation called multiple times")]
    ReentrantContinuation,

    /// The call was cancelled
    #[error("Request aborted: {reason}")]
    Aborted {
        /// Why the cancellation handle fired
        reason: AbortReason,
    },

    /// Transport-level failure (connection, body read, TLS, ...)
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Taxonomy constructors
impl Error {
    /// Create an invalid identifier error
    pub fn invalid_identifier<I: Into<String>, R: Into<String>>(identifier: I, reason: R) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-provider-found error
    pub fn no_provider_found<S: Into<String>>(identifier: S) -> Self {
        Self::NoProviderFound {
            identifier: identifier.into(),
        }
    }

    /// Create an unsupported capability error
    pub fn unsupported_capability<P: Into<String>, C: Into<String>>(
        provider: P,
        capability: C,
    ) -> Self {
        Self::UnsupportedCapability {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Create a provider rejection error
    pub fn provider_rejected<P: Into<String>, B: Into<String>>(
        provider: P,
        status: u16,
        body: B,
    ) -> Self {
        Self::ProviderRejected {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a timeout error
    pub fn timed_out(timeout_ms: u64) -> Self {
        Self::RequestTimedOut { timeout_ms }
    }

    /// Create an abort error
    pub fn aborted(reason: AbortReason) -> Self {
        Self::Aborted { reason }
    }
}

// Ambient constructors
impl Error {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source
    pub fn transport_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether the error is an already-classified terminal outcome
    ///
    /// The retry controller rethrows these unchanged instead of retrying.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::ProviderRejected { .. } | Self::RequestTimedOut { .. }
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
