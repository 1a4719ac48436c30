use async_trait::async_trait;
use futures::stream;
use relay_domain::error::Result;
use relay_domain::value_objects::{PayloadStream, ResponseData};
use serde_json::Value;

use super::{is_event_stream_media_type, media_type};
use crate::context::CallContext;
use crate::ports::ResponseTransformer;
use crate::streaming::decode_event_stream;

/// Turns an event-stream body into a lazy payload sequence
///
/// The body is handed to the decoder unread; a response without a body
/// yields an empty sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventStreamTransformer;

#[async_trait]
impl ResponseTransformer for EventStreamTransformer {
    async fn transform(&self, ctx: &mut CallContext) -> Result<()> {
        let Some(raw) = ctx.response.raw.as_mut() else {
            return Ok(());
        };
        if !is_event_stream_media_type(&media_type(raw)) {
            return Ok(());
        }

        let payloads: PayloadStream = match raw.take_body() {
            Some(body) => decode_event_stream(body, ctx.cancel.clone()),
            None => Box::pin(stream::empty::<Result<Value>>()),
        };
        ctx.response.data = Some(ResponseData::Stream(payloads));
        Ok(())
    }
}
