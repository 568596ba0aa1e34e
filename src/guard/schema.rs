//! Schema shape guard
//!
//! A well-formed schema is a JSON object whose every value is an object
//! with a `type` naming a recognized field type. `name` may be omitted
//! (it defaults to the key) but must not disagree with the key. Other
//! descriptor keys are ignored.

use serde_json::{Map, Value};

use super::errors::{ShapeDetails, ShapeError, ShapeResult};
use super::json_type_name;
use crate::schema::{ColumnDescriptor, FieldType, Schema};

/// Returns true iff `value` is a well-formed schema.
pub fn is_schema(value: &Value) -> bool {
    parse_schema(value).is_ok()
}

/// Checks the shape of `value` and returns it as a typed schema.
///
/// Arrays are rejected, including the empty array. An empty object is an
/// empty schema.
pub fn parse_schema(value: &Value) -> ShapeResult<Schema> {
    let obj = value.as_object().ok_or_else(|| {
        ShapeError::malformed_schema(ShapeDetails::new(
            "$",
            "object",
            json_type_name(value),
        ))
    })?;

    let mut columns = Vec::with_capacity(obj.len());
    for (key, entry) in obj {
        columns.push(parse_descriptor(key, entry)?);
    }

    Ok(Schema::from_columns(columns))
}

/// `$.key` for identifier-like keys, `$["key"]` for anything else.
fn member_path(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if identifier {
        format!("$.{}", key)
    } else {
        format!("$[{}]", Value::String(key.to_string()))
    }
}

fn parse_descriptor(key: &str, entry: &Value) -> ShapeResult<ColumnDescriptor> {
    let path = member_path(key);

    let desc: &Map<String, Value> = entry.as_object().ok_or_else(|| {
        ShapeError::malformed_schema(ShapeDetails::new(
            &path,
            "column descriptor object",
            json_type_name(entry),
        ))
    })?;

    let type_path = format!("{}.type", path);
    let raw_type = desc
        .get("type")
        .ok_or_else(|| ShapeError::malformed_schema(ShapeDetails::missing_field(&type_path)))?;

    let type_name = raw_type.as_str().ok_or_else(|| {
        ShapeError::malformed_schema(ShapeDetails::new(
            &type_path,
            "string",
            json_type_name(raw_type),
        ))
    })?;

    let field_type: FieldType = type_name.parse().map_err(|_| {
        ShapeError::malformed_schema(ShapeDetails::new(
            &type_path,
            "recognized field type",
            format!("'{}'", type_name),
        ))
    })?;

    match desc.get("name") {
        None => {}
        Some(Value::String(name)) if name == key => {}
        Some(Value::String(name)) => {
            return Err(ShapeError::malformed_schema(ShapeDetails::new(
                format!("{}.name", path),
                format!("'{}'", key),
                format!("'{}'", name),
            )));
        }
        Some(other) => {
            return Err(ShapeError::malformed_schema(ShapeDetails::new(
                format!("{}.name", path),
                "string",
                json_type_name(other),
            )));
        }
    }

    Ok(ColumnDescriptor::new(key, field_type))
}
