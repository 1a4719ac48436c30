//! API setting resolution tests

use relay_application::config::{ResolvedConfig, config_map};
use relay_application::{CallContext, parse_identifier};
use relay_domain::value_objects::Capability;
use relay_providers::{resolve_api_base, resolve_api_key, resolve_api_path};
use serde_json::{Value, json};

fn context(config: Value) -> CallContext {
    CallContext::new(
        Capability::COMPLETION,
        ResolvedConfig::new(config_map(config).unwrap()),
        parse_identifier("acme/rocket").unwrap(),
    )
}

#[test]
fn test_top_level_value_wins() {
    let ctx = context(json!({
        "api_key": "top",
        "providers": {"acme": {"api_key": "nested"}},
    }));

    assert_eq!(resolve_api_key(&ctx, "acme", None).as_deref(), Some("top"));
}

#[test]
fn test_provider_settings_are_consulted() {
    let ctx = context(json!({
        "providers": {"acme": {"api_key": "nested", "api_base": "https://acme.test"}},
    }));

    assert_eq!(resolve_api_key(&ctx, "acme", None).as_deref(), Some("nested"));
    assert_eq!(
        resolve_api_base(&ctx, "acme", None, Some("https://default.test")).as_deref(),
        Some("https://acme.test")
    );
    assert_eq!(resolve_api_key(&ctx, "other", None), None);
}

#[test]
fn test_defaults_apply_last() {
    let ctx = context(json!({"api_key": ""}));

    assert_eq!(resolve_api_key(&ctx, "acme", None), None);
    assert_eq!(
        resolve_api_base(&ctx, "acme", None, Some("https://default.test")).as_deref(),
        Some("https://default.test")
    );
    assert_eq!(
        resolve_api_path(&ctx, "acme", Some("/v1/chat")).as_deref(),
        Some("/v1/chat")
    );
}

#[test]
fn test_path_override() {
    let ctx = context(json!({"api_path": "/custom"}));

    assert_eq!(
        resolve_api_path(&ctx, "acme", Some("/v1/chat")).as_deref(),
        Some("/custom")
    );
}
