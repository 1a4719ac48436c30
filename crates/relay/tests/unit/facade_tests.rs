//! Facade wiring tests

use relay::application::list_providers;
use relay::{RelayConfig, build_dispatcher};
use serde_json::json;

#[test]
fn test_linked_providers_are_registered() {
    let names: Vec<&str> = list_providers().into_iter().map(|(name, _)| name).collect();

    assert!(names.contains(&"openai"));
}

#[test]
fn test_parse_identifier_is_exported() {
    let parsed = relay::parse_identifier("openai/gpt-4o").unwrap();

    assert_eq!(parsed.provider_key, "openai");
    assert_eq!(parsed.model, "gpt-4o");
}

#[tokio::test]
async fn test_dispatcher_from_default_config_rejects_missing_model() {
    let dispatcher = build_dispatcher(&RelayConfig::default()).unwrap();

    let err = dispatcher
        .completion(json!({"messages": []}), relay::CallOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, relay::Error::Config { .. }));
}
