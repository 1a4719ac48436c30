//! Routing
//!
//! Turns a target identifier into a bound provider and handler:
//!
//! 1. [`parse_identifier`] splits and normalizes the identifier, inferring a
//!    provider key for bare model names
//! 2. [`resolve_route`] walks the route chain, first match wins
//! 3. [`AutoLoader`] backs `Auto` entries with a cached provider lookup

/// Auto-discovery cache
pub mod auto_loader;
/// Identifier parsing
pub mod identifier;
/// Provider inference for bare model names
pub mod inference;
/// Match specifications and route conditions
pub mod matcher;
/// Route chain resolution
pub mod resolver;

pub use auto_loader::AutoLoader;
pub use identifier::parse_identifier;
pub use inference::infer_provider;
pub use matcher::{MatchSpec, RouteCondition, match_pattern};
pub use resolver::{RouteEntry, RouteResolver, resolve_route};
