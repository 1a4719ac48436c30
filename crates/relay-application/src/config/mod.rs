//! Configuration merge
//!
//! Engine configuration is a JSON object so framework keys and free-form
//! request parameters merge together across three levels (global,
//! per-capability, per-call) on top of framework defaults.

use std::time::Duration;

use relay_domain::constants::{
    CONFIG_KEY_MAX_RETRIES, CONFIG_KEY_MAX_RETRY_DELAY, CONFIG_KEY_MODEL, CONFIG_KEY_PROVIDERS,
    CONFIG_KEY_RETRY_DELAY, CONFIG_KEY_STREAM, CONFIG_KEY_TIMEOUT, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_RETRY_DELAY_MS, DEFAULT_RETRY_DELAY_MS,
};
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::RetryPolicy;
use serde_json::{Map, Value};

/// JSON object used for every configuration layer
pub type ConfigMap = Map<String, Value>;

/// Deep-merge configuration sources, broadest first
///
/// Nested objects merge key by key with the later source winning. Any other
/// value, arrays included, replaces the earlier one wholesale. `None`
/// sources are skipped.
pub fn deep_merge<'a, I>(sources: I) -> ConfigMap
where
    I: IntoIterator<Item = Option<&'a ConfigMap>>,
{
    let mut merged = ConfigMap::new();
    for source in sources.into_iter().flatten() {
        merge_into(&mut merged, source);
    }
    merged
}

fn merge_into(target: &mut ConfigMap, source: &ConfigMap) {
    for (key, incoming) in source {
        match (target.get_mut(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => merge_into(existing, nested),
            _ => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Convert a JSON value into a configuration layer
///
/// `null` is an empty layer; anything other than an object is rejected.
pub fn config_map(value: Value) -> Result<ConfigMap> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        other => Err(Error::config(format!(
            "configuration must be a JSON object, got {other}"
        ))),
    }
}

/// Framework defaults beneath the global layer
pub fn defaults() -> ConfigMap {
    let mut map = ConfigMap::new();
    map.insert(CONFIG_KEY_MAX_RETRIES.into(), DEFAULT_MAX_RETRIES.into());
    map.insert(CONFIG_KEY_RETRY_DELAY.into(), DEFAULT_RETRY_DELAY_MS.into());
    map.insert(
        CONFIG_KEY_MAX_RETRY_DELAY.into(),
        DEFAULT_MAX_RETRY_DELAY_MS.into(),
    );
    map
}

/// Merged configuration of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    values: ConfigMap,
}

impl ResolvedConfig {
    /// Wrap an already-merged map
    pub fn new(values: ConfigMap) -> Self {
        Self { values }
    }

    /// Underlying map
    pub fn as_map(&self) -> &ConfigMap {
        &self.values
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value for `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Set a value, replacing any previous one
    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.values.insert(key.to_owned(), value.into());
    }

    /// Ordered, non-empty list of candidate identifiers
    pub fn targets(&self) -> Result<Vec<String>> {
        let targets = match self.values.get(CONFIG_KEY_MODEL) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) if s.is_empty() => Vec::new(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_owned).ok_or_else(|| {
                        Error::config(format!("'{CONFIG_KEY_MODEL}' entries must be strings"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::config(format!(
                    "'{CONFIG_KEY_MODEL}' must be a string or an array of strings"
                )));
            }
        };

        if targets.is_empty() {
            return Err(Error::config("No model specified"));
        }
        Ok(targets)
    }

    /// Whether the response is consumed as a stream
    pub fn stream(&self) -> bool {
        self.values
            .get(CONFIG_KEY_STREAM)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Call timeout, if a positive one is configured
    pub fn timeout(&self) -> Option<Duration> {
        let ms = self.values.get(CONFIG_KEY_TIMEOUT).and_then(non_negative_ms)?;
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Retry policy derived from the merged values
    ///
    /// Missing, negative or non-numeric values count as zero.
    pub fn retry_policy(&self) -> RetryPolicy {
        let read = |key: &str| self.values.get(key).and_then(non_negative_ms).unwrap_or(0);
        RetryPolicy {
            max_retries: read(CONFIG_KEY_MAX_RETRIES),
            base_delay: Duration::from_millis(read(CONFIG_KEY_RETRY_DELAY)),
            max_delay: Duration::from_millis(read(CONFIG_KEY_MAX_RETRY_DELAY)),
        }
    }

    /// Settings block for one provider under `providers.<name>`
    pub fn provider_settings(&self, name: &str) -> Option<&ConfigMap> {
        self.values
            .get(CONFIG_KEY_PROVIDERS)
            .and_then(Value::as_object)
            .and_then(|providers| providers.get(name))
            .and_then(Value::as_object)
    }
}

impl From<ConfigMap> for ResolvedConfig {
    fn from(values: ConfigMap) -> Self {
        Self::new(values)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn non_negative_ms(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.max(0.0) as u64)),
        _ => None,
    }
}
