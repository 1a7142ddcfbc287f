//! Defensive decoding of backend payloads.
//!
//! The backend is not strict about envelopes: lists arrive bare or wrapped in
//! an object, single records sometimes arrive as a one-element list, and ids
//! may be strings or numbers.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::repository::BackendError;

/// Decode a collection, skipping elements that do not fit `T`.
///
/// A bare array is used as is. An object is searched for the first array
/// under one of `keys`. Anything else decodes to an empty list.
#[must_use]
pub fn coerce_list<T: DeserializeOwned>(payload: Value, keys: &[&str]) -> Vec<T> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let found = keys
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                });
            if let Some(items) = found {
                items
            } else {
                warn!(?keys, "object payload carries no list, using empty");
                Vec::new()
            }
        }
        Value::Null => Vec::new(),
        other => {
            warn!(kind = %kind_of(&other), "unexpected list payload, using empty");
            Vec::new()
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "skipping malformed element");
                None
            }
        })
        .collect()
}

/// Decode a single record: a `data` envelope, an object, or the first
/// element of an array.
///
/// # Errors
///
/// Returns `BackendError::Malformed` when no record can be decoded.
pub fn coerce_one<T: DeserializeOwned>(payload: Value) -> Result<T, BackendError> {
    let record = match payload {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_) | Value::Array(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    let record = match record {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::Malformed("empty list".into()))?,
        other => other,
    };
    serde_json::from_value(record).map_err(|err| BackendError::Malformed(err.to_string()))
}

/// Token from `data.token`, else `token`.
#[must_use]
pub fn extract_token(payload: &Value) -> Option<String> {
    payload
        .pointer("/data/token")
        .and_then(Value::as_str)
        .or_else(|| payload.get("token").and_then(Value::as_str))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Record id from `id` or `data.id`; numeric ids are stringified.
#[must_use]
pub fn extract_id(payload: &Value) -> Option<String> {
    let raw = payload
        .get("id")
        .or_else(|| payload.pointer("/data/id"))?;
    match raw {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Human-readable error from `message` or `error`.
#[must_use]
pub fn error_message(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
