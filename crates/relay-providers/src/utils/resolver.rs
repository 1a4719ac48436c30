//! API key, base and path resolution
//!
//! Each value is looked up in the call configuration first, then in the
//! `providers.<name>` settings block, then (for keys and bases) in the
//! environment.

use std::env;

use relay_application::CallContext;
use relay_domain::constants::{CONFIG_KEY_API_BASE, CONFIG_KEY_API_KEY, CONFIG_KEY_API_PATH};
use serde_json::Value;

fn config_value(ctx: &CallContext, provider: &str, key: &str) -> Option<String> {
    let non_empty = |v: &Value| v.as_str().filter(|s| !s.is_empty()).map(str::to_owned);
    ctx.config.get(key).and_then(non_empty).or_else(|| {
        ctx.config
            .provider_settings(provider)
            .and_then(|settings| settings.get(key))
            .and_then(non_empty)
    })
}

fn env_value(name: Option<&str>) -> Option<String> {
    name.and_then(|name| env::var(name).ok())
        .filter(|value| !value.is_empty())
}

/// API key from configuration, then the `env_name` variable
pub fn resolve_api_key(ctx: &CallContext, provider: &str, env_name: Option<&str>) -> Option<String> {
    config_value(ctx, provider, CONFIG_KEY_API_KEY).or_else(|| env_value(env_name))
}

/// API base URL from configuration, then the `env_name` variable, then `default`
pub fn resolve_api_base(
    ctx: &CallContext,
    provider: &str,
    env_name: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    config_value(ctx, provider, CONFIG_KEY_API_BASE)
        .or_else(|| env_value(env_name))
        .or_else(|| default.map(str::to_owned))
}

/// API path from configuration, then `default`
pub fn resolve_api_path(ctx: &CallContext, provider: &str, default: Option<&str>) -> Option<String> {
    config_value(ctx, provider, CONFIG_KEY_API_PATH).or_else(|| default.map(str::to_owned))
}
