use async_trait::async_trait;
use relay_domain::error::Result;
use relay_domain::value_objects::ResponseData;

use super::{is_json_media_type, media_type};
use crate::context::CallContext;
use crate::ports::ResponseTransformer;

/// Parses a JSON response body
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTransformer;

#[async_trait]
impl ResponseTransformer for JsonTransformer {
    async fn transform(&self, ctx: &mut CallContext) -> Result<()> {
        let Some(raw) = ctx.response.raw.as_mut() else {
            return Ok(());
        };
        if !is_json_media_type(&media_type(raw)) {
            return Ok(());
        }

        let body = raw.bytes().await?;
        ctx.response.data = Some(ResponseData::Json(serde_json::from_slice(&body)?));
        Ok(())
    }
}
