//! Parsed target identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::IDENTIFIER_SEPARATOR;

/// Value Object: Parsed Target Identifier
///
/// A `provider/model` identifier split into its parts, with lowercased
/// copies used for case-insensitive route matching.
///
/// ## Business Rules
///
/// - `id` is always `provider_key/model`, even when the caller supplied a
///   bare model name and the provider was inferred
/// - `model` keeps everything after the first separator, so it may itself
///   contain further separators
/// - The `norm_*` fields are the lowercase forms of their counterparts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedIdentifier {
    /// Canonical `provider/model` form
    pub id: String,
    /// Provider prefix
    pub provider_key: String,
    /// Model suffix
    pub model: String,
    /// Lowercased provider prefix
    pub norm_provider: String,
    /// Lowercased model suffix
    pub norm_model: String,
    /// Lowercased canonical identifier
    pub norm_id: String,
}

impl ParsedIdentifier {
    /// Build from an already-validated provider key and model
    pub fn new<P: Into<String>, M: Into<String>>(provider_key: P, model: M) -> Self {
        let provider_key = provider_key.into();
        let model = model.into();
        let id = format!("{provider_key}{IDENTIFIER_SEPARATOR}{model}");
        Self {
            norm_provider: provider_key.to_lowercase(),
            norm_model: model.to_lowercase(),
            norm_id: id.to_lowercase(),
            id,
            provider_key,
            model,
        }
    }
}

impl fmt::Display for ParsedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
