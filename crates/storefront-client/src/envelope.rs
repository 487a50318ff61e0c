//! Unwrapping of the API's optional `{success, data, message}` envelope and
//! of the various shapes list payloads arrive in.

use serde_json::Value;

use crate::error::ApiError;

/// Keys that may accompany `data` in an envelope. An object carrying any
/// other key alongside `data` is treated as a plain record.
const ENVELOPE_KEYS: &[&str] = &[
    "success",
    "message",
    "statuscode",
    "errors",
    "code",
    "timestamp",
    "data",
];

/// Keys under which list endpoints nest their array.
const LIST_KEYS: &[&str] = &[
    "items",
    "Items",
    "data",
    "Data",
    "results",
    "Results",
    "products",
    "Products",
    "orders",
    "Orders",
    "categories",
    "Categories",
];

/// Strips the response envelope when one is present.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] when the envelope reports `success: false`.
pub fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    if map
        .get("success")
        .or_else(|| map.get("Success"))
        .and_then(Value::as_bool)
        == Some(false)
    {
        let message = map
            .get("message")
            .or_else(|| map.get("Message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("request rejected")
            .to_string();
        return Err(ApiError::Rejected { message });
    }

    let data_key = ["data", "Data"].into_iter().find(|k| map.contains_key(*k));
    let is_envelope = data_key.is_some()
        && map
            .keys()
            .all(|k| ENVELOPE_KEYS.contains(&k.to_ascii_lowercase().as_str()));

    match data_key {
        Some(key) if is_envelope => Ok(map.remove(key).unwrap_or(Value::Null)),
        _ => Ok(Value::Object(map)),
    }
}

/// Extracts the element list from a list payload: a bare array, or an object
/// nesting one under a conventional key. Anything else is an empty list.
#[must_use]
pub fn extract_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find(|key| map.get(**key).is_some_and(Value::is_array))
            .and_then(|key| map.remove(*key))
            .and_then(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
