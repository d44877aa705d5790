//! Response envelope normalization.
//!
//! List endpoints answer with `{success, data: [...]}`, `{data: [...]}` or a
//! bare array. [`ListResult`] is decided here once so callers never inspect
//! the shape again.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decoded list response.
#[derive(Clone, Debug, PartialEq)]
pub enum ListResult<T> {
    /// Rows in server order. May be empty when the server sent `[]`.
    ListOk(Vec<T>),
    /// The body was not any recognized list shape.
    ListEmpty,
}

impl<T> ListResult<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::ListOk(rows) => rows,
            Self::ListEmpty => Vec::new(),
        }
    }
}

impl<T: DeserializeOwned> ListResult<T> {
    /// Normalize a parsed body. Rows that fail to decode are dropped.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let rows = match value {
            Value::Array(rows) => rows,
            Value::Object(mut map) => {
                if map.get("success").and_then(Value::as_bool) == Some(false) {
                    return Self::ListEmpty;
                }
                match map.remove("data") {
                    Some(Value::Array(rows)) => rows,
                    _ => return Self::ListEmpty,
                }
            }
            _ => return Self::ListEmpty,
        };
        let total = rows.len();
        let decoded: Vec<T> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("dropping undecodable row: {e}");
                    None
                }
            })
            .collect();
        if decoded.len() < total {
            log::warn!("kept {} of {total} rows", decoded.len());
        }
        Self::ListOk(decoded)
    }
}

/// Unwrap `{success, data}` around a single record or stats object.
///
/// Bodies without a `data` member are returned as-is.
#[must_use]
pub fn record_payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => match map.remove("data") {
            Some(Value::Null) | None => Value::Object(map),
            Some(data) => data,
        },
        other => other,
    }
}

/// A 2xx body that still reports `success: false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub message: Option<String>,
}

#[must_use]
pub fn rejection(value: &Value) -> Option<Rejection> {
    (value.get("success").and_then(Value::as_bool) == Some(false)).then(|| Rejection {
        message: server_message(value),
    })
}

/// Human-readable message from an error body (`message` or `error`).
#[must_use]
pub fn server_message(value: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Object(inner) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        })
}
