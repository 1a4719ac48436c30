use std::sync::Arc;

use async_trait::async_trait;
use relay_domain::error::{Error, Result};

use super::retry::RetryController;
use crate::context::CallContext;
use crate::pipeline::{Interceptor, Next};
use crate::ports::{ResponseTransformer, Transport};
use crate::transformers::auto_transformers;

/// Innermost pipeline layer
///
/// Sends the request through the retry controller, then runs the bound
/// handler's response transformers in order. It never calls `next`.
pub struct RequestInterceptor {
    transport: Arc<dyn Transport>,
}

impl RequestInterceptor {
    /// Create the layer over `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Interceptor<CallContext> for RequestInterceptor {
    async fn handle(&self, ctx: &mut CallContext, _next: Next<'_, CallContext>) -> Result<()> {
        let handler = ctx
            .handler
            .clone()
            .ok_or_else(|| Error::internal("no handler bound to call context"))?;

        let mut transformers = handler.response_transformers();
        if transformers.is_empty() {
            transformers = auto_transformers();
        }

        RetryController::for_context(ctx)
            .run(ctx, self.transport.as_ref(), move |ctx| {
                Box::pin(apply_transformers(ctx, transformers))
            })
            .await
    }
}

async fn apply_transformers(
    ctx: &mut CallContext,
    transformers: Vec<Arc<dyn ResponseTransformer>>,
) -> Result<()> {
    for transformer in &transformers {
        transformer.transform(ctx).await?;
    }
    Ok(())
}
