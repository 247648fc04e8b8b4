use serde::Serialize;
use serde_json::Value;

use crate::error::SchemaError;

/// Check every field of `entity` against the data collector allow-list.
///
/// Allowed field types are text, boolean, double, UTC timestamp and GUID.
/// Timestamps and GUIDs serialize to JSON strings, so on the wire the
/// allow-list is {string, boolean, fractional number}. Integers, nulls,
/// arrays and nested objects are rejected. Pure inspection, no side
/// effects; the first offending field fails the record.
pub fn validate<T: Serialize>(entity: &T) -> Result<(), SchemaError> {
    let record_type = std::any::type_name::<T>();
    let value = serde_json::to_value(entity).map_err(|err| SchemaError::Unserializable {
        record_type,
        message: err.to_string(),
    })?;

    let Value::Object(fields) = &value else {
        return Err(SchemaError::NotAnObject {
            record_type,
            found: json_kind(&value),
        });
    };

    for (name, field) in fields {
        if !is_allowed(field) {
            return Err(SchemaError::UnsupportedField {
                record_type,
                field: name.clone(),
                found: json_kind(field),
            });
        }
    }
    Ok(())
}

fn is_allowed(value: &Value) -> bool {
    match value {
        Value::String(_) | Value::Bool(_) => true,
        Value::Number(n) => n.is_f64(),
        _ => false,
    }
}

/// Human-readable JSON type name for schema error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
