//! Column schemas
//!
//! A schema maps column names to descriptors. Only `number` and
//! `datetime` columns carry coercion rules; every other type is stored
//! as supplied.

mod loader;
mod types;

pub use loader::{LoadError, LoadResult, SchemaLoader};
pub use types::{ColumnDescriptor, FieldType, Schema, UnknownFieldType};
