//! Unit tests for the dispatcher: configuration, fallback and streaming

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::TryStreamExt;
use http::header;
use relay_application::config::config_map;
use relay_application::routing::AutoLoader;
use relay_application::transformers::BytesTransformer;
use relay_application::{
    CallContext, CallOptions, CancelHandle, Dispatcher, DispatcherBuilder, ResponseTransformer,
    RouteCondition, interceptor_fn,
};
use relay_domain::error::Error;
use relay_domain::value_objects::{AbortReason, Capability, RequestBody, ResponseData};
use serde_json::{Value, json};

use crate::support::{CountingLoader, MockTransport, Reply, StalledTransport, StubProvider};

type Fallbacks = Arc<Mutex<Vec<(Option<u16>, String, String)>>>;

/// Transport that rejects anything addressed to the `bad` provider
fn split_transport() -> Arc<MockTransport> {
    MockTransport::with(|request, _| {
        if request.url.contains("bad.test") {
            Reply::Text(400, "denied")
        } else {
            Reply::Json(200, json!({"id": "ok"}))
        }
    })
}

fn builder(transport: &Arc<MockTransport>) -> DispatcherBuilder {
    DispatcherBuilder::new(transport.clone())
        .route(RouteCondition::provider("bad"), StubProvider::completion("bad"))
        .route(RouteCondition::provider("good"), StubProvider::completion("good"))
        .configure(config_map(json!({"retry_delay": 0})).unwrap())
        .auto_loader(Arc::new(AutoLoader::new(CountingLoader::new(Vec::new()))))
}

fn recorder() -> (Fallbacks, impl Fn(&Error, &str, &str) + Send + Sync + 'static) {
    let log: Fallbacks = Arc::default();
    let sink = Arc::clone(&log);
    let hook = move |err: &Error, from: &str, to: &str| {
        sink.lock()
            .unwrap()
            .push((err.status(), from.to_owned(), to.to_owned()));
    };
    (log, hook)
}

fn json_payload(data: Option<ResponseData>) -> Value {
    data.and_then(|d| d.as_json().cloned()).unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_fallback_moves_to_next_candidate() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();
    let (log, hook) = recorder();

    let data = dispatcher
        .completion(
            json!({"model": ["bad/m1", "good/m2"]}),
            CallOptions::new().with_on_fallback(hook),
        )
        .await
        .unwrap();

    assert_eq!(json_payload(data), json!({"id": "ok"}));
    assert_eq!(
        transport.urls(),
        ["https://bad.test/m1", "https://good.test/m2"]
    );
    assert_eq!(
        *log.lock().unwrap(),
        [(Some(400), "bad/m1".to_owned(), "good/m2".to_owned())]
    );
}

#[tokio::test]
async fn test_all_candidates_failing_returns_last_error() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();
    let (log, hook) = recorder();

    let err = dispatcher
        .completion(
            json!({"model": ["bad/a", "bad/b", "nobody/c"]}),
            CallOptions::new().with_on_fallback(hook),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoProviderFound { ref identifier } if identifier == "nobody/c"));
    assert_eq!(transport.calls(), 2);
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_identifier_falls_back() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();

    let data = dispatcher
        .completion(json!({"model": ["good/", "good/m"]}), CallOptions::new())
        .await
        .unwrap();

    assert_eq!(json_payload(data), json!({"id": "ok"}));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_missing_model_fails_before_any_request() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();

    let err = dispatcher
        .completion(json!({}), CallOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_per_call_hook_replaces_global_hook() {
    let transport = split_transport();
    let (global_log, global_hook) = recorder();
    let (call_log, call_hook) = recorder();
    let dispatcher = builder(&transport).on_fallback(global_hook).build();

    dispatcher
        .completion(
            json!({"model": ["bad/x", "good/y"]}),
            CallOptions::new().with_on_fallback(call_hook),
        )
        .await
        .unwrap();
    assert_eq!(call_log.lock().unwrap().len(), 1);
    assert!(global_log.lock().unwrap().is_empty());

    dispatcher
        .completion(json!({"model": ["bad/x", "good/y"]}), CallOptions::new())
        .await
        .unwrap();
    assert_eq!(global_log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_configuration_layers() {
    let transport = MockTransport::always(Reply::Json(200, json!({})));
    let dispatcher = DispatcherBuilder::new(transport.clone())
        .route(
            RouteCondition::provider("acme"),
            StubProvider::new("acme", &[Capability::COMPLETION, Capability::EMBEDDING]),
        )
        .configure(config_map(json!({"model": "acme/global"})).unwrap())
        .configure_for(
            Capability::EMBEDDING,
            config_map(json!({"model": "acme/embed"})).unwrap(),
        )
        .build();

    dispatcher.completion(Value::Null, CallOptions::new()).await.unwrap();
    dispatcher.embedding(json!({}), CallOptions::new()).await.unwrap();
    dispatcher
        .embedding(json!({"model": "acme/call"}), CallOptions::new())
        .await
        .unwrap();

    assert_eq!(
        transport.urls(),
        [
            "https://acme.test/global",
            "https://acme.test/embed",
            "https://acme.test/call",
        ]
    );
}

#[tokio::test]
async fn test_json_body_is_serialized_with_default_content_type() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();

    dispatcher
        .completion(json!({"model": "good/m"}), CallOptions::new())
        .await
        .unwrap();

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(
        request.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(request.body, Some(RequestBody::Text(r#"{"model":"m"}"#.to_owned())));
}

#[tokio::test]
async fn test_auto_route_discovers_inferred_provider() {
    let transport = MockTransport::always(Reply::Json(200, json!({"auto": true})));
    let loader = CountingLoader::new(vec![("openai", StubProvider::completion("openai"))]);
    let dispatcher = DispatcherBuilder::new(transport.clone())
        .auto_route()
        .auto_loader(Arc::new(AutoLoader::new(loader.clone())))
        .build();

    for _ in 0..2 {
        dispatcher
            .completion(json!({"model": "gpt-4o"}), CallOptions::new())
            .await
            .unwrap();
    }

    assert_eq!(transport.urls()[0], "https://openai.test/gpt-4o");
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_interceptors_see_bound_context() {
    let transport = split_transport();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let dispatcher = builder(&transport)
        .intercept(interceptor_fn::<CallContext, _>(move |ctx, next| {
            sink.lock().unwrap().push(ctx.provider_name().to_owned());
            Box::pin(async move { next.run(ctx).await })
        }))
        .build();

    dispatcher
        .completion(json!({"model": ["bad/a", "good/b"]}), CallOptions::new())
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), ["bad", "good"]);
}

#[tokio::test]
async fn test_cancelled_call_is_aborted() {
    let transport = split_transport();
    let dispatcher = builder(&transport).build();
    let cancel = CancelHandle::new();
    cancel.cancel();

    let err = dispatcher
        .completion(
            json!({"model": "good/m"}),
            CallOptions::new().with_cancel(cancel),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Aborted { .. }));
}

fn stalled_dispatcher() -> Dispatcher {
    DispatcherBuilder::new(Arc::new(StalledTransport))
        .route(RouteCondition::provider("good"), StubProvider::completion("good"))
        .configure(config_map(json!({"retry_delay": 0})).unwrap())
        .auto_loader(Arc::new(AutoLoader::new(CountingLoader::new(Vec::new()))))
        .build()
}

#[tokio::test]
async fn test_caller_deadline_aborts_in_flight_call() {
    let dispatcher = stalled_dispatcher();
    let cancel = CancelHandle::timeout(Some(Duration::from_millis(20)));

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        dispatcher.completion(
            json!({"model": "good/m"}),
            CallOptions::new().with_cancel(cancel),
        ),
    )
    .await
    .expect("call should end at the caller's deadline");

    assert!(matches!(
        outcome.unwrap_err(),
        Error::RequestTimedOut { timeout_ms: 20 }
    ));
}

#[tokio::test]
async fn test_configured_timeout_aborts_in_flight_call() {
    let dispatcher = stalled_dispatcher();

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        dispatcher.completion(json!({"model": "good/m", "timeout": 20}), CallOptions::new()),
    )
    .await
    .expect("call should end at the configured timeout");

    assert!(matches!(
        outcome.unwrap_err(),
        Error::RequestTimedOut { timeout_ms: 20 }
    ));
}

#[tokio::test]
async fn test_caller_cancel_reaches_in_flight_call() {
    let dispatcher = stalled_dispatcher();
    let cancel = CancelHandle::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        dispatcher.completion(
            json!({"model": "good/m"}),
            CallOptions::new().with_cancel(cancel.clone()),
        ),
    )
    .await
    .expect("call should end when cancelled");

    assert!(matches!(
        outcome.unwrap_err(),
        Error::Aborted {
            reason: AbortReason::Cancelled
        }
    ));
    assert!(cancel.is_aborted());
}

#[tokio::test]
async fn test_server_error_without_retries_falls_back() {
    let transport = MockTransport::with(|request, _| {
        if request.url.contains("bad.test") {
            Reply::Text(500, "boom")
        } else {
            Reply::Json(200, json!({"id": "ok"}))
        }
    });
    let dispatcher = builder(&transport).build();
    let (log, hook) = recorder();

    let data = dispatcher
        .completion(
            json!({"model": ["bad/m1", "good/m2"], "max_retries": 0}),
            CallOptions::new().with_on_fallback(hook),
        )
        .await
        .unwrap();

    assert_eq!(json_payload(data), json!({"id": "ok"}));
    assert_eq!(transport.calls(), 2);
    assert_eq!(
        *log.lock().unwrap(),
        [(Some(500), "bad/m1".to_owned(), "good/m2".to_owned())]
    );
}

#[tokio::test]
async fn test_bytes_transformer_returns_binary() {
    let transport = MockTransport::always(Reply::Binary(b"ID3audio"));
    let dispatcher = DispatcherBuilder::new(transport.clone())
        .route(
            RouteCondition::provider("voice"),
            StubProvider::with_transformers(
                "voice",
                &[Capability::SPEECH],
                vec![Arc::new(BytesTransformer) as Arc<dyn ResponseTransformer>],
            ),
        )
        .build();

    let data = dispatcher
        .speech(json!({"model": "voice/tts"}), CallOptions::new())
        .await
        .unwrap();

    assert!(matches!(data, Some(ResponseData::Bytes(ref b)) if b.as_ref() == b"ID3audio"));
}

fn stream_dispatcher(transport: &Arc<MockTransport>) -> Dispatcher {
    builder(transport).build()
}

#[tokio::test]
async fn test_stream_is_lazy_and_decodes_frames() {
    let transport = MockTransport::always(Reply::EventStream(vec![
        "data: {\"delta\":\"he\"}\n\n",
        "data: {\"delta\":\"llo\"}\n\ndata: [DONE]\n\n",
    ]));
    let dispatcher = stream_dispatcher(&transport);

    let payloads = dispatcher
        .completion_stream(json!({"model": "good/chat"}), CallOptions::new())
        .unwrap();
    assert_eq!(transport.calls(), 0);

    let items: Vec<Value> = payloads.try_collect().await.unwrap();
    assert_eq!(items, [json!({"delta": "he"}), json!({"delta": "llo"})]);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_stream_config_error_is_immediate() {
    let transport = split_transport();
    let dispatcher = stream_dispatcher(&transport);

    let result = dispatcher.completion_stream(json!({"model": []}), CallOptions::new());

    assert!(matches!(result, Err(Error::Config { .. })));
}

#[tokio::test]
async fn test_stream_routing_failure_is_an_item() {
    let transport = split_transport();
    let dispatcher = stream_dispatcher(&transport);

    let payloads = dispatcher
        .completion_stream(json!({"model": "nobody/x"}), CallOptions::new())
        .unwrap();
    let err = payloads.try_collect::<Vec<Value>>().await.unwrap_err();

    assert!(matches!(err, Error::NoProviderFound { .. }));
}

#[tokio::test]
async fn test_stream_of_json_response_yields_single_item() {
    let transport = split_transport();
    let dispatcher = stream_dispatcher(&transport);

    let items: Vec<Value> = dispatcher
        .completion_stream(json!({"model": "good/m"}), CallOptions::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(items, [json!({"id": "ok"})]);
}
