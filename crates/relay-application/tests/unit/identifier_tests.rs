//! Unit tests for identifier parsing

use relay_application::parse_identifier;
use relay_domain::Error;

#[test]
fn test_parse_prefixed_identifier() {
    let parsed = parse_identifier("OpenAI/GPT-4o").unwrap();

    assert_eq!(parsed.provider_key, "OpenAI");
    assert_eq!(parsed.model, "GPT-4o");
    assert_eq!(parsed.norm_provider, "openai");
    assert_eq!(parsed.norm_model, "gpt-4o");
    assert_eq!(parsed.norm_id, "openai/gpt-4o");
    assert_eq!(parsed.id, "OpenAI/GPT-4o");
}

#[test]
fn test_parse_splits_on_first_separator() {
    let parsed = parse_identifier("openrouter/meta-llama/llama-3").unwrap();

    assert_eq!(parsed.provider_key, "openrouter");
    assert_eq!(parsed.model, "meta-llama/llama-3");
}

#[test]
fn test_parse_bare_known_model_infers_provider() {
    let parsed = parse_identifier("gpt-4o").unwrap();

    assert_eq!(parsed.provider_key, "openai");
    assert_eq!(parsed.model, "gpt-4o");
    assert_eq!(parsed.id, "openai/gpt-4o");
}

#[test]
fn test_parse_bare_model_uses_prefix_rule() {
    let parsed = parse_identifier("text-embedding-4-huge").unwrap();

    assert_eq!(parsed.provider_key, "openai");
}

#[test]
fn test_parse_bare_unknown_model_uses_default_key() {
    let parsed = parse_identifier("Mistral-Large").unwrap();

    assert_eq!(parsed.provider_key, "custom");
    assert_eq!(parsed.id, "custom/Mistral-Large");
    assert_eq!(parsed.norm_id, "custom/mistral-large");
}

#[test]
fn test_parse_is_deterministic() {
    assert_eq!(
        parse_identifier("claude-x").unwrap(),
        parse_identifier("claude-x").unwrap()
    );
}

#[test]
fn test_parse_rejects_malformed_identifiers() {
    for raw in ["", "/m", "p/", "p//m", "a/b//c"] {
        let err = parse_identifier(raw).unwrap_err();
        assert!(
            matches!(err, Error::InvalidIdentifier { ref identifier, .. } if identifier == raw),
            "{raw:?} should be rejected, got {err:?}"
        );
    }
}
