//! rowschema - schema-driven validation and coercion of tabular rows
//!
//! A schema maps column names to declared field types. Rows are JSON
//! objects. The crate:
//! - guards untrusted schema and row documents (`guard`)
//! - reports per-column validity (`validator`)
//! - coerces `number` and `datetime` values to canonical form (`parser`)
//!
//! The core is pure: no I/O, no logging, no mutation of inputs.

pub mod cli;
pub mod coercion;
pub mod config;
pub mod guard;
pub mod observability;
pub mod parser;
pub mod rows;
pub mod schema;
pub mod validator;

pub use config::{CoercionOptions, UndeclaredColumns};
pub use guard::{is_rows, is_schema, parse_rows, parse_schema, ShapeError};
pub use parser::{parse, parse_with, FieldError, ParseFailure};
pub use rows::{PresenceMode, Row, Rows};
pub use schema::{ColumnDescriptor, FieldType, Schema};
pub use validator::{validate, validate_with, ColumnValidation, ValidationResult};
