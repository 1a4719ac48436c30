//! Retry controller
//!
//! Executes one logical request with bounded retries:
//!
//! - 2xx: store the response, run the success continuation, done
//! - retryable non-2xx with attempts left: back off (honouring
//!   `Retry-After` on 429/503) and try again
//! - any other non-2xx: fail with [`Error::ProviderRejected`]
//! - transport failure: fail fast on timeout, terminal errors, the last
//!   attempt or cancellation; otherwise back off and try again

use futures::future::BoxFuture;
use http::header;
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::{
    AbortReason, RequestConfig, RetryPolicy, TransportResponse, honours_retry_after,
    is_retryable_status,
};
use tracing::debug;

use super::backoff::{exponential_jitter_delay, parse_retry_after, sleep_with_cancel};
use super::cancel::CancelHandle;
use crate::context::CallContext;
use crate::ports::Transport;

/// Bounded retry loop around a transport
#[derive(Debug, Clone)]
pub struct RetryController {
    policy: RetryPolicy,
    cancel: Option<CancelHandle>,
}

impl RetryController {
    /// Create a controller
    pub fn new(policy: RetryPolicy, cancel: Option<CancelHandle>) -> Self {
        Self { policy, cancel }
    }

    /// Controller using the context's retry policy and cancellation handle
    pub fn for_context(ctx: &CallContext) -> Self {
        Self::new(ctx.config.retry_policy(), ctx.cancel.clone())
    }

    /// Effective retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `ctx.request` until it succeeds or fails terminally
    ///
    /// On success the raw response is stored in `ctx.response.raw` and
    /// `on_success` runs exactly once. A failing continuation is not retried.
    pub async fn run<F>(
        &self,
        ctx: &mut CallContext,
        transport: &dyn Transport,
        on_success: F,
    ) -> Result<()>
    where
        F: for<'c> FnOnce(&'c mut CallContext) -> BoxFuture<'c, Result<()>> + Send,
    {
        let max_attempts = self.policy.max_attempts();
        for attempt in 0..max_attempts {
            let is_last = attempt + 1 == max_attempts;
            match self.send(&ctx.request, transport).await {
                Ok(response) if response.is_success() => {
                    ctx.response.raw = Some(response);
                    return on_success(ctx).await;
                }
                Ok(response) => {
                    self.on_http_failure(ctx, response, attempt, is_last)
                        .await?;
                }
                Err(err) => {
                    let provider = ctx.provider_name().to_owned();
                    self.on_transport_error(&provider, err, attempt, is_last)
                        .await?;
                }
            }
        }

        Err(Error::internal("retry loop ended without an outcome"))
    }

    async fn send(
        &self,
        request: &RequestConfig,
        transport: &dyn Transport,
    ) -> Result<TransportResponse> {
        match &self.cancel {
            Some(cancel) => {
                tokio::select! {
                    biased;
                    reason = cancel.aborted() => Err(cancel.abort_error(reason)),
                    result = transport.call(request) => result,
                }
            }
            None => transport.call(request).await,
        }
    }

    async fn on_http_failure(
        &self,
        ctx: &mut CallContext,
        mut response: TransportResponse,
        attempt: u64,
        is_last: bool,
    ) -> Result<()> {
        let status = response.status.as_u16();
        let provider = ctx.provider_name().to_owned();

        if is_last || !is_retryable_status(status) {
            let body = response.text().await?;
            ctx.response.raw = Some(response);
            return Err(Error::provider_rejected(provider, status, body));
        }

        let retry_after = if honours_retry_after(status) {
            response
                .header(&header::RETRY_AFTER)
                .and_then(|value| parse_retry_after(value, self.policy.max_delay))
        } else {
            None
        };
        ctx.response.raw = Some(response);

        let delay = retry_after.unwrap_or_else(|| self.backoff(attempt));
        debug!(
            provider = %provider,
            status,
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Retrying after HTTP failure"
        );
        sleep_with_cancel(delay, self.cancel.as_ref()).await
    }

    async fn on_transport_error(
        &self,
        provider: &str,
        err: Error,
        attempt: u64,
        is_last: bool,
    ) -> Result<()> {
        if let Some(cancel) = &self.cancel
            && cancel.reason() == Some(AbortReason::Timeout)
        {
            let timeout = cancel.abort_error(AbortReason::Timeout);
            if matches!(timeout, Error::RequestTimedOut { .. }) {
                return Err(timeout);
            }
        }
        if err.is_terminal() {
            return Err(err);
        }
        if is_last || self.cancel.as_ref().is_some_and(CancelHandle::is_aborted) {
            return Err(err);
        }

        let delay = self.backoff(attempt);
        debug!(
            provider,
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "Retrying after transport failure"
        );
        sleep_with_cancel(delay, self.cancel.as_ref()).await
    }

    fn backoff(&self, attempt: u64) -> std::time::Duration {
        exponential_jitter_delay(self.policy.base_delay, self.policy.max_delay, attempt)
    }
}
