//! Row collection shape guard
//!
//! Shallow: each element must be an object, field values are not
//! inspected here.

use serde_json::Value;

use super::errors::{ShapeDetails, ShapeError, ShapeResult};
use super::json_type_name;
use crate::rows::Rows;

/// Returns true iff `value` is an array of objects.
pub fn is_rows(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

/// Checks the shape of `value` and returns an owned row collection.
pub fn parse_rows(value: &Value) -> ShapeResult<Rows> {
    let items = value.as_array().ok_or_else(|| {
        ShapeError::malformed_rows(ShapeDetails::new(
            "$",
            "array",
            json_type_name(value),
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_object().cloned().ok_or_else(|| {
                ShapeError::malformed_rows(ShapeDetails::new(
                    format!("$[{}]", i),
                    "object",
                    json_type_name(item),
                ))
            })
        })
        .collect()
}
