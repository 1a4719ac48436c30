use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::value_objects::ResponseData;

use crate::context::CallContext;
use crate::ports::ResponseTransformer;

/// Collects the response body as binary content
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesTransformer;

#[async_trait]
impl ResponseTransformer for BytesTransformer {
    async fn transform(&self, ctx: &mut CallContext) -> Result<()> {
        let Some(raw) = ctx.response.raw.as_mut() else {
            return Ok(());
        };
        let body = raw.bytes().await?;
        ctx.response.data = Some(ResponseData::Bytes(body));
        Ok(())
    }
}
