//! Paths and query strings for stored responses

use relay_application::CallContext;
use relay_domain::error::{Error, Result};
use serde_json::{Map, Value};

use crate::constants::{OPENAI_RESPONSES_PATH, RESPONSE_ID_KEY};
use crate::utils::{build_query, join_path};

/// `/responses/{response_id}` followed by `suffix`
pub(super) fn stored_path(ctx: &CallContext, suffix: &str) -> Result<String> {
    let id = ctx
        .config
        .get_str(RESPONSE_ID_KEY)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::config("A `response_id` is required for stored responses"))?;
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    Ok(join_path(&join_path(OPENAI_RESPONSES_PATH, &encoded), suffix)
        .trim_end_matches('/')
        .to_owned())
}

/// Query string from the `keys` present in the configuration
pub(super) fn query(ctx: &CallContext, keys: &[&str]) -> String {
    let params: Map<String, Value> = keys
        .iter()
        .filter_map(|key| ctx.config.get(key).map(|v| ((*key).to_owned(), v.clone())))
        .collect();
    build_query(&params)
}
