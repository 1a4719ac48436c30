//! Cancellation reasons

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a call's cancellation handle fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The caller cancelled explicitly
    Cancelled,
    /// The configured call timeout elapsed
    Timeout,
}

impl AbortReason {
    /// Whether the abort was caused by the call timeout
    pub fn is_timeout(self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::Timeout => f.write_str("timeout"),
        }
    }
}
