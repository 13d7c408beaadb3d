//! Response envelope normalization.
//!
//! List endpoints return, inconsistently: a bare array, `{data: [...]}`,
//! `{data: {items: [...]}}`, or `{items: [...]}`. The rules below are
//! ordered and first-match-wins; callers always receive a flat sequence.

use serde_json::Value;

/// Extract the item list from a response of unknown shape.
///
/// Order: bare array, `data` array, `data.items` array, `items` array,
/// else empty. Pure; the response is never mutated.
pub fn items(response: &Value) -> Vec<Value> {
    if let Some(list) = response.as_array() {
        return list.clone();
    }
    if let Some(list) = response.get("data").and_then(Value::as_array) {
        return list.clone();
    }
    if let Some(list) = response
        .get("data")
        .and_then(|data| data.get("items"))
        .and_then(Value::as_array)
    {
        return list.clone();
    }
    if let Some(list) = response.get("items").and_then(Value::as_array) {
        return list.clone();
    }
    Vec::new()
}

/// Unwrap a single-object response, tolerating a `{data: {..}}` envelope.
pub fn record(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if data.is_object() => data,
        _ => response,
    }
}

/// Extract the id of a freshly created record (`data.id` or `id`).
pub fn created_id(response: &Value) -> Option<String> {
    response
        .get("data")
        .and_then(|data| data.get("id"))
        .or_else(|| response.get("id"))
        .and_then(id_string)
}

/// Render an id value as a string; backends send both strings and numbers.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
