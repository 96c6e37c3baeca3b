//! Response body decoding
//!
//! Collections arrive as a bare array or as `{ "data": [...] }`. Single
//! records arrive as the bare object, a one-element array, or a wrapper whose
//! `data` holds the record, possibly next to a `message` such as
//! `{ "message": "Gallery updated", "data": {...} }`. The whole object is
//! tried as the record first, so records that have their own `data` field
//! still decode. Anything else is a decode error, never a panic.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::classifier::{body_error, body_message};

/// Why a 2xx body could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DecodeError {
    /// The body carried an `error` (or, failing decode, a `message`)
    Reported(String),
    /// A single-record lookup returned an empty collection
    NotFound,
    Malformed(String),
}

impl DecodeError {
    pub(crate) fn message(&self) -> String {
        match self {
            DecodeError::Reported(message) => message.clone(),
            DecodeError::NotFound => "Record not found".to_string(),
            DecodeError::Malformed(detail) => format!("Unexpected response shape: {}", detail),
        }
    }
}

fn parse(body: &[u8]) -> Result<Value, DecodeError> {
    if let Some(error) = body_error(body) {
        return Err(DecodeError::Reported(error));
    }
    serde_json::from_slice(body).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn typed<T: DeserializeOwned>(value: Value, body: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|e| match body_message(body) {
        Some(message) => DecodeError::Reported(message),
        None => DecodeError::Malformed(e.to_string()),
    })
}

pub(crate) fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, DecodeError> {
    let value = match parse(body)? {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Array(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    typed(value, body)
}

pub(crate) fn decode_record<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    match parse(body)? {
        Value::Array(items) => typed(first(items)?, body),
        outer @ Value::Object(_) => {
            let whole = serde_json::from_value::<T>(outer.clone());
            match (whole, outer.get("data")) {
                (Ok(record), _) => Ok(record),
                (Err(_), Some(Value::Array(items))) => typed(first(items.clone())?, body),
                (Err(_), Some(inner @ Value::Object(_))) => typed(inner.clone(), body),
                (Err(e), _) => Err(match body_message(body) {
                    Some(message) => DecodeError::Reported(message),
                    None => DecodeError::Malformed(e.to_string()),
                }),
            }
        }
        other => typed(other, body),
    }
}

/// A record lookup answered with an empty collection found nothing
fn first(items: Vec<Value>) -> Result<Value, DecodeError> {
    items.into_iter().next().ok_or(DecodeError::NotFound)
}
