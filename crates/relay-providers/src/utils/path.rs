use serde_json::{Map, Value};

/// Join a base URL and a path with exactly one slash between them
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{base}/{path}")
}

/// Form-encoded query string with a leading `?`, or empty
///
/// Falsy values (null, false, zero, empty string) are skipped and array
/// values repeat their key once per item.
pub fn build_query(params: &Map<String, Value>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter().filter(|(_, v)| is_truthy(v)) {
        match value {
            Value::Array(items) => {
                for item in items {
                    query.append_pair(key, &query_value(item));
                }
            }
            other => {
                query.append_pair(key, &query_value(other));
            }
        }
    }

    let qs = query.finish();
    if qs.is_empty() { qs } else { format!("?{qs}") }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
