//! Unit tests for route chain resolution

use std::sync::Arc;

use relay_application::routing::{AutoLoader, resolve_route};
use relay_application::{CallContext, Provider, RouteCondition, RouteEntry};
use relay_domain::Error;
use relay_domain::value_objects::Capability;
use serde_json::json;

use crate::support::{CountingLoader, StubProvider, context};

fn condition(spec: RouteCondition, provider: Arc<dyn Provider>) -> RouteEntry {
    RouteEntry::Condition {
        condition: spec,
        provider,
    }
}

fn empty_loader() -> AutoLoader {
    AutoLoader::new(CountingLoader::new(Vec::new()))
}

#[tokio::test]
async fn test_matching_condition_binds_provider_and_handler() {
    let mut ctx = context(Capability::COMPLETION, "acme/rocket", json!({}));
    let entries = vec![condition(
        RouteCondition::provider("acme"),
        StubProvider::completion("acme"),
    )];

    resolve_route(&mut ctx, &entries, &empty_loader()).await.unwrap();

    assert_eq!(ctx.provider_name(), "acme");
    assert!(ctx.handler.is_some());
}

#[tokio::test]
async fn test_matched_condition_without_handler_commits() {
    let mut ctx = context(Capability::SPEECH, "acme/rocket", json!({}));
    let entries = vec![
        condition(RouteCondition::provider("acme"), StubProvider::completion("acme")),
        condition(
            RouteCondition::provider("acme"),
            StubProvider::new("speechy", &[Capability::SPEECH]),
        ),
    ];

    let err = resolve_route(&mut ctx, &entries, &empty_loader())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::UnsupportedCapability { ref provider, ref capability }
            if provider == "acme" && capability == "speech"
    ));
}

#[tokio::test]
async fn test_resolver_returning_none_skips() {
    let mut ctx = context(Capability::COMPLETION, "acme/rocket", json!({}));
    let entries = vec![
        RouteEntry::Resolver(Arc::new(|_: &CallContext| -> Option<Arc<dyn Provider>> {
            None
        })),
        condition(RouteCondition::model("rocket"), StubProvider::completion("second")),
    ];

    resolve_route(&mut ctx, &entries, &empty_loader()).await.unwrap();

    assert_eq!(ctx.provider_name(), "second");
}

#[tokio::test]
async fn test_resolver_provider_without_handler_commits() {
    let mut ctx = context(Capability::EMBEDDING, "acme/rocket", json!({}));
    let fixed: Arc<dyn Provider> = StubProvider::completion("fixed");
    let entries = vec![
        RouteEntry::Resolver(Arc::new(move |_: &CallContext| Some(Arc::clone(&fixed)))),
        RouteEntry::Auto,
    ];

    let err = resolve_route(&mut ctx, &entries, &empty_loader())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedCapability { .. }));
}

#[tokio::test]
async fn test_exhausted_chain_reports_identifier() {
    let mut ctx = context(Capability::COMPLETION, "acme/rocket", json!({}));
    let entries = vec![condition(
        RouteCondition::provider("other"),
        StubProvider::completion("other"),
    )];

    let err = resolve_route(&mut ctx, &entries, &empty_loader())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoProviderFound { ref identifier } if identifier == "acme/rocket"));
}

#[tokio::test]
async fn test_auto_maps_default_key_to_default_backend() {
    let loader = CountingLoader::new(vec![("openai", StubProvider::completion("openai"))]);
    let auto = AutoLoader::new(loader.clone());
    let mut ctx = context(Capability::COMPLETION, "some-local-model", json!({}));
    assert_eq!(ctx.target.provider_key, "custom");

    resolve_route(&mut ctx, &[RouteEntry::Auto], &auto).await.unwrap();

    assert_eq!(ctx.provider_name(), "openai");
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_auto_provider_without_handler_is_skipped() {
    let loader = CountingLoader::new(vec![("acme", StubProvider::completion("acme"))]);
    let auto = AutoLoader::new(loader);
    let mut ctx = context(Capability::SPEECH, "acme/voice", json!({}));
    let entries = vec![
        RouteEntry::Auto,
        condition(
            RouteCondition::model_id("acme/voice"),
            StubProvider::new("voice", &[Capability::SPEECH]),
        ),
    ];

    resolve_route(&mut ctx, &entries, &auto).await.unwrap();

    assert_eq!(ctx.provider_name(), "voice");
}

#[tokio::test]
async fn test_auto_failure_continues_chain() {
    let auto = AutoLoader::new(CountingLoader::with_broken(Vec::new(), &["acme"]));
    let mut ctx = context(Capability::COMPLETION, "acme/rocket", json!({}));
    let entries = vec![
        RouteEntry::Auto,
        condition(RouteCondition::provider("acme"), StubProvider::completion("manual")),
    ];

    resolve_route(&mut ctx, &entries, &auto).await.unwrap();

    assert_eq!(ctx.provider_name(), "manual");
}
