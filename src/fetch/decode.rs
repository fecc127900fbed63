use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{FetchError, FetchResult};

/// Recognised page payload layouts, tried in declaration order.
#[derive(Debug, PartialEq)]
pub enum PageShape<'a> {
    /// `{ "content": [...], ... }` as produced by paging backends.
    Envelope(&'a [Value]),
    /// A bare JSON array.
    Bare(&'a [Value]),
    Unrecognized,
}

pub fn classify_payload(payload: &Value) -> PageShape<'_> {
    match payload {
        Value::Object(map) => match map.get("content") {
            Some(Value::Array(items)) => PageShape::Envelope(items),
            _ => PageShape::Unrecognized,
        },
        Value::Array(items) => PageShape::Bare(items),
        _ => PageShape::Unrecognized,
    }
}

/// Extract the item sequence and decode each entry into `T`.
pub fn decode_items<T: DeserializeOwned>(payload: &Value) -> FetchResult<Vec<T>> {
    let items = match classify_payload(payload) {
        PageShape::Envelope(items) | PageShape::Bare(items) => items,
        PageShape::Unrecognized => {
            return Err(FetchError::shape(format!(
                "expected a `content` array or a bare array, got {}",
                describe(payload)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            T::deserialize(item)
                .map_err(|err| FetchError::shape(format!("item {idx} did not decode: {err}")))
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(map) if map.contains_key("content") => {
            "an object whose `content` is not an array"
        }
        Value::Object(_) => "an object without `content`",
    }
}
