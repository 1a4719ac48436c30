use relay_domain::constants::IDENTIFIER_SEPARATOR;
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::ParsedIdentifier;

use super::inference::infer_provider;

/// Parse a target identifier
///
/// `"provider/model"` splits on the first separator. A bare `"model"` gets
/// an inferred provider key and is re-composed as `"inferred/model"`.
///
/// # Errors
///
/// [`Error::InvalidIdentifier`] when the identifier is empty, starts or
/// ends with the separator, or contains two consecutive separators.
pub fn parse_identifier(raw: &str) -> Result<ParsedIdentifier> {
    if raw.is_empty() {
        return Err(Error::invalid_identifier(raw, "identifier cannot be empty"));
    }
    if raw.starts_with(IDENTIFIER_SEPARATOR) {
        return Err(Error::invalid_identifier(
            raw,
            "provider component cannot be empty",
        ));
    }
    if raw.ends_with(IDENTIFIER_SEPARATOR) {
        return Err(Error::invalid_identifier(
            raw,
            "model component cannot be empty",
        ));
    }
    let doubled: String = [IDENTIFIER_SEPARATOR; 2].iter().collect();
    if raw.contains(doubled.as_str()) {
        return Err(Error::invalid_identifier(
            raw,
            "empty component found in identifier",
        ));
    }

    Ok(match raw.split_once(IDENTIFIER_SEPARATOR) {
        Some((provider_key, model)) => ParsedIdentifier::new(provider_key, model),
        None => ParsedIdentifier::new(infer_provider(raw), raw),
    })
}
