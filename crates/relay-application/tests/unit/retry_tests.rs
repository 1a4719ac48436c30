//! Unit tests for the retry controller

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use relay_application::execution::RetryController;
use relay_application::{CallContext, CancelHandle, Transport};
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{
    AbortReason, Capability, RequestConfig, ResponseData, RetryPolicy,
};
use serde_json::json;

use crate::support::{MockTransport, Reply, StalledTransport, StubProvider, context};

fn policy(max_retries: u64) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::ZERO,
        max_delay: Duration::from_secs(5),
    }
}

fn bound_context() -> CallContext {
    let mut ctx = context(Capability::COMPLETION, "acme/rocket", json!({}));
    let provider = StubProvider::completion("acme");
    ctx.handler = provider.handler(&ctx);
    ctx.provider = Some(provider);
    ctx.request = RequestConfig::post("https://acme.test/rocket");
    ctx
}

/// Run with a continuation that counts invocations and stores a marker
async fn run_counted(
    controller: &RetryController,
    ctx: &mut CallContext,
    transport: &dyn Transport,
) -> (Result<()>, usize) {
    let successes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&successes);
    let result = controller
        .run(ctx, transport, move |ctx| {
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                ctx.response.data = Some(ResponseData::Json(json!({"done": true})));
                Ok(())
            })
        })
        .await;
    (result, successes.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_retryable_statuses_then_success() {
    let transport = MockTransport::scripted(vec![
        Reply::Text(429, "slow down"),
        Reply::Text(429, "slow down"),
        Reply::Json(200, json!({"ok": true})),
    ]);
    let mut ctx = bound_context();

    let (result, successes) =
        run_counted(&RetryController::new(policy(2), None), &mut ctx, transport.as_ref()).await;

    result.unwrap();
    assert_eq!(transport.calls(), 3);
    assert_eq!(successes, 1);
    assert_eq!(ctx.response.raw.as_ref().map(|r| r.status.as_u16()), Some(200));
}

#[tokio::test]
async fn test_exhausted_retries_report_last_response() {
    let transport = MockTransport::scripted(vec![
        Reply::Text(500, "first"),
        Reply::Text(502, "second"),
        Reply::Text(503, "third"),
    ]);
    let mut ctx = bound_context();

    let (result, successes) =
        run_counted(&RetryController::new(policy(2), None), &mut ctx, transport.as_ref()).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        Error::ProviderRejected { ref provider, status: 503, ref body }
            if provider == "acme" && body == "third"
    ));
    assert_eq!(err.to_string(), "[acme] HTTP 503: third");
    assert_eq!(transport.calls(), 3);
    assert_eq!(successes, 0);
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    for status in [400, 401, 404, 501, 505] {
        let transport = MockTransport::always(Reply::Text(status, "nope"));
        let mut ctx = bound_context();

        let (result, _) =
            run_counted(&RetryController::new(policy(3), None), &mut ctx, transport.as_ref())
                .await;

        assert_eq!(result.unwrap_err().status(), Some(status));
        assert_eq!(transport.calls(), 1, "status {status}");
    }
}

#[tokio::test]
async fn test_zero_retries_means_single_attempt() {
    let transport = MockTransport::always(Reply::Text(503, "busy"));
    let mut ctx = bound_context();

    let (result, _) =
        run_counted(&RetryController::new(policy(0), None), &mut ctx, transport.as_ref()).await;

    assert_eq!(result.unwrap_err().status(), Some(503));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_retry_after_header_sets_delay() {
    let transport = MockTransport::scripted(vec![
        Reply::RetryAfter(429, "0.05"),
        Reply::Json(200, json!({})),
    ]);
    let mut ctx = bound_context();
    let started = Instant::now();

    let (result, _) =
        run_counted(&RetryController::new(policy(1), None), &mut ctx, transport.as_ref()).await;

    result.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_transport_failure_is_retried() {
    let transport = MockTransport::scripted(vec![
        Reply::Fail("connection reset"),
        Reply::Json(200, json!({})),
    ]);
    let mut ctx = bound_context();

    let (result, successes) =
        run_counted(&RetryController::new(policy(1), None), &mut ctx, transport.as_ref()).await;

    result.unwrap();
    assert_eq!(successes, 1);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_transport_failure_on_last_attempt_propagates() {
    let transport = MockTransport::always(Reply::Fail("connection refused"));
    let mut ctx = bound_context();

    let (result, _) =
        run_counted(&RetryController::new(policy(1), None), &mut ctx, transport.as_ref()).await;

    assert!(matches!(result.unwrap_err(), Error::Transport { .. }));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_transport_failure_keeps_previous_response() {
    let transport = MockTransport::scripted(vec![
        Reply::Text(429, "slow down"),
        Reply::Fail("connection reset"),
    ]);
    let mut ctx = bound_context();

    let (result, _) =
        run_counted(&RetryController::new(policy(1), None), &mut ctx, transport.as_ref()).await;

    assert!(matches!(result.unwrap_err(), Error::Transport { .. }));
    assert_eq!(ctx.response.raw.as_ref().map(|r| r.status.as_u16()), Some(429));
}

#[tokio::test]
async fn test_failing_continuation_is_not_retried() {
    let transport = MockTransport::always(Reply::Json(200, json!({})));
    let mut ctx = bound_context();

    let result = RetryController::new(policy(3), None)
        .run(&mut ctx, transport.as_ref(), |_ctx| {
            Box::pin(async { Err(Error::internal("bad payload")) })
        })
        .await;

    assert!(matches!(result.unwrap_err(), Error::Internal { .. }));
    assert_eq!(transport.calls(), 1);
}

/// Transport that never answers within a test's lifetime
#[tokio::test]
async fn test_timeout_aborts_in_flight_request() {
    let mut ctx = bound_context();
    let cancel = CancelHandle::timeout(Some(Duration::from_millis(20)));

    let (result, _) =
        run_counted(&RetryController::new(policy(3), Some(cancel)), &mut ctx, &StalledTransport)
            .await;

    assert!(matches!(
        result.unwrap_err(),
        Error::RequestTimedOut { timeout_ms: 20 }
    ));
}

#[tokio::test]
async fn test_cancellation_interrupts_backoff() {
    let transport = MockTransport::always(Reply::RetryAfter(503, "30"));
    let mut ctx = bound_context();
    let cancel = CancelHandle::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let (result, _) = run_counted(
        &RetryController::new(policy(3), Some(cancel)),
        &mut ctx,
        transport.as_ref(),
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        Error::Aborted {
            reason: AbortReason::Cancelled
        }
    ));
    assert_eq!(transport.calls(), 1);
}
