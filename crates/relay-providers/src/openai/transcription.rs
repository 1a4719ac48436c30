//! Multipart form for speech-to-text uploads
//!
//! The `file` configuration entry is either a filesystem path or an object
//! `{ "data": <base64> | "path": <path>, "filename"?, "content_type"? }`.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use relay_application::CallContext;
use relay_domain::error::{Error, Result};
use relay_domain::value_objects::FormPart;
use serde_json::{Map, Value};

use crate::constants::TRANSCRIPTION_PARAMS;

const FILE_FIELD: &str = "file";
const DEFAULT_FILENAME: &str = "audio";

/// Form parts in upload order: file, model, then the optional parameters
///
/// Null parameters are skipped and arrays are sent as repeated `key[]` fields.
pub(super) fn form(ctx: &CallContext) -> Result<Vec<FormPart>> {
    let file = ctx
        .config
        .get(FILE_FIELD)
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::config("Transcription requires a `file`"))?;

    let mut parts = vec![
        file_part(file)?,
        FormPart::text("model", ctx.target.model.clone()),
    ];
    for key in TRANSCRIPTION_PARAMS {
        match ctx.config.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => parts.extend(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| FormPart::text(format!("{key}[]"), field_text(item))),
            ),
            Some(value) => parts.push(FormPart::text(*key, field_text(value))),
        }
    }
    Ok(parts)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn file_part(file: &Value) -> Result<FormPart> {
    match file {
        Value::String(path) => read_file(path, None, None),
        Value::Object(spec) => inline_or_path(spec),
        _ => Err(Error::config(
            "Transcription `file` must be a path or an object",
        )),
    }
}

fn inline_or_path(spec: &Map<String, Value>) -> Result<FormPart> {
    let filename = spec.get("filename").and_then(Value::as_str);
    let content_type = spec
        .get("content_type")
        .and_then(Value::as_str)
        .map(str::to_owned);

    if let Some(data) = spec.get("data").and_then(Value::as_str) {
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| Error::config(format!("Transcription `file.data` is not base64: {e}")))?;
        return Ok(FormPart::file(
            FILE_FIELD,
            filename.unwrap_or(DEFAULT_FILENAME),
            content_type,
            Bytes::from(bytes),
        ));
    }
    match spec.get("path").and_then(Value::as_str) {
        Some(path) => read_file(path, filename, content_type),
        None => Err(Error::config(
            "Transcription `file` needs either `data` or `path`",
        )),
    }
}

fn read_file(path: &str, filename: Option<&str>, content_type: Option<String>) -> Result<FormPart> {
    let data = std::fs::read(path)
        .map_err(|e| Error::config(format!("Failed to read audio file {path}: {e}")))?;
    let filename = filename
        .or_else(|| Path::new(path).file_name().and_then(|n| n.to_str()))
        .unwrap_or(DEFAULT_FILENAME);
    Ok(FormPart::file(
        FILE_FIELD,
        filename,
        content_type,
        Bytes::from(data),
    ))
}
