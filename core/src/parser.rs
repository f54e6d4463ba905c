//! Decoding of response bodies into typed records.
//!
//! # Design
//! The list routine decodes in two steps. The payload is first parsed into a
//! `serde_json::Value` so that syntax errors can be told apart from shape
//! errors, then each array element is decoded into `T` through its serde
//! definition. Decoding element by element is what lets a `SchemaError` name
//! the index that failed.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, PayloadError, SchemaError};
use crate::types::ItemCollection;

/// Field holding the result array in item list payloads.
pub const ITEMS_FIELD: &str = "items";

/// Decode `{"items": [{"title": .., "price": ..}, ...]}` into items, keeping
/// the array order.
pub fn parse_items(payload: &str) -> Result<ItemCollection, PayloadError> {
    parse_list(payload, ITEMS_FIELD)
}

/// Decode the array stored under `field` of a top-level JSON object.
///
/// The result has exactly one entry per array element, in order. Fails with
/// `PayloadError::Parse` if `payload` is not JSON, and `PayloadError::Schema`
/// if the top level is not an object, `field` is absent or not an array, or
/// an element does not decode as `T`.
pub fn parse_list<T: DeserializeOwned>(payload: &str, field: &str) -> Result<Vec<T>, PayloadError> {
    let root: Value = serde_json::from_str(payload).map_err(parse_error)?;

    let mut object = match root {
        Value::Object(object) => object,
        other => {
            return Err(SchemaError::root(format!("expected a JSON object, found {}", kind(&other))).into())
        }
    };

    let elements = match object.remove(field) {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            return Err(SchemaError::field(field, format!("expected an array, found {}", kind(&other))).into())
        }
        None => return Err(SchemaError::field(field, "missing field").into()),
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|e| PayloadError::from(SchemaError::element(field, index, e.to_string())))
        })
        .collect()
}

/// Decode a single JSON document into `T`.
pub fn parse_object<T: DeserializeOwned>(payload: &str) -> Result<T, PayloadError> {
    serde_json::from_str(payload).map_err(|e| {
        if e.is_data() {
            SchemaError::root(message_of(&e)).into()
        } else {
            parse_error(e)
        }
    })
}

fn parse_error(e: serde_json::Error) -> PayloadError {
    ParseError {
        line: e.line(),
        column: e.column(),
        message: message_of(&e),
    }
    .into()
}

/// serde_json appends " at line L column C" to its messages; the position is
/// carried separately.
fn message_of(e: &serde_json::Error) -> String {
    let full = e.to_string();
    match full.rfind(" at line ") {
        Some(pos) => full[..pos].to_string(),
        None => full,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
