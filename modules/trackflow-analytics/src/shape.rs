//! Standard action shape: `{ type, payload?, error?, meta? }`.
//!
//! Evaluated at runtime over open-ended JSON, since event payloads are built
//! by callers and carry no static type.

use serde_json::Value;

use crate::error::ShapeError;

/// The only top-level keys a standard action may carry.
pub const STANDARD_KEYS: [&str; 4] = ["type", "payload", "error", "meta"];

/// Check `value` against the standard action shape, returning the first
/// violation found.
pub fn validate(value: &Value) -> Result<(), ShapeError> {
    let map = value
        .as_object()
        .ok_or_else(|| ShapeError::NotAnObject(kind_of(value)))?;

    match map.get("type") {
        None => return Err(ShapeError::MissingType),
        Some(Value::String(s)) if !s.is_empty() => {}
        Some(_) => return Err(ShapeError::InvalidType),
    }

    if let Some(error) = map.get("error") {
        if !error.is_boolean() {
            return Err(ShapeError::InvalidError);
        }
    }

    if let Some(key) = map.keys().find(|k| !STANDARD_KEYS.contains(&k.as_str())) {
        return Err(ShapeError::UnexpectedField(key.clone()));
    }

    Ok(())
}

pub fn is_standard_action(value: &Value) -> bool {
    validate(value).is_ok()
}

/// A conformant action flagged `error: true`.
pub fn is_error_action(value: &Value) -> bool {
    is_standard_action(value) && value.get("error") == Some(&Value::Bool(true))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
