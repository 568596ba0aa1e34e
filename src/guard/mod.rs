//! Shape guards for untrusted schema and row input
//!
//! Both guards are total: any `serde_json::Value` yields either a typed
//! structure or a `ShapeError` naming the offending path. The boolean
//! forms are thin wrappers for callers that only need accept/reject.

mod errors;
mod rows;
mod schema;

pub use errors::{ShapeDetails, ShapeError, ShapeErrorCode, ShapeResult};
pub use rows::{is_rows, parse_rows};
pub use schema::{is_schema, parse_schema};

use serde_json::Value;

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
