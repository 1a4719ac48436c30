//! # relay domain layer
//!
//! Core types shared by every relay crate: the error taxonomy, the constants
//! that define routing and retry behaviour, and the value objects that flow
//! through one call (parsed identifiers, request descriptors, transport
//! responses and decoded payloads).
//!
//! This crate has no runtime dependencies beyond serialization, HTTP type
//! definitions and the `futures` stream traits.

/// Domain constants
pub mod constants;
/// Error taxonomy
pub mod error;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
