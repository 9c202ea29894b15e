//! JSON syntax checks and structured field lookups
//!
//! Stateless helpers over `serde_json`. The boolean predicate swallows
//! parse failures; the `require_*` forms surface them as
//! `CodecError::Malformed` with the parser's message.

use crate::error::{CodecError, CodecResult};
use serde_json::Value;

const ERROR_EMPTY_JSON: &str = "JSON string cannot be empty";
const ERROR_INVALID_JSON: &str = "Invalid JSON format";

/// Whether `text` parses as JSON
///
/// Empty or whitespace-only text is not valid JSON.
#[must_use]
pub fn is_syntactically_valid_json(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    serde_json::from_str::<Value>(text).is_ok()
}

/// Parse `text`, failing with the parser's message
///
/// # Errors
/// `CodecError::Malformed` for blank text or a syntax error
pub fn require_valid_json(text: &str) -> CodecResult<Value> {
    if text.trim().is_empty() {
        return Err(CodecError::malformed(ERROR_EMPTY_JSON));
    }
    serde_json::from_str(text).map_err(|e| CodecError::malformed(format!("{ERROR_INVALID_JSON}: {e}")))
}

/// Whether every name in `fields` is a top-level key of the document
///
/// Stops at the first missing field. A document that is not an object has
/// no fields.
///
/// # Errors
/// `CodecError::Malformed` if `text` is not valid JSON
pub fn has_fields(text: &str, fields: &[&str]) -> CodecResult<bool> {
    let value = require_valid_json(text)?;
    Ok(fields.iter().all(|field| value.get(field).is_some()))
}

/// Required string field of a JSON object
///
/// # Errors
/// `CodecError::MissingField` if the field is absent or not a string
pub fn text_field<'a>(value: &'a Value, field: &'static str) -> CodecResult<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(CodecError::MissingField { field })
}

/// Optional string field; absent and `null` both read as `None`
///
/// # Errors
/// `CodecError::MissingField` if the field holds a non-string value
pub fn optional_text_field<'a>(value: &'a Value, field: &'static str) -> CodecResult<Option<&'a str>> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(CodecError::MissingField { field }),
    }
}

/// Array field; absent or non-array values read as empty
#[must_use]
pub fn array_field<'a>(value: &'a Value, field: &str) -> &'a [Value] {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
