//! Column schema type definitions
//!
//! Recognized column types:
//! - number / datetime: coerced to canonical form before storage
//! - everything else: passed through untouched

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Recognized column types, serialized as lowercase strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Short text
    String,
    /// Barcode or QR payload
    BarcodeQr,
    /// Long text
    LongForm,
    /// One of a fixed set of options
    Options,
    /// Numeric value, coerced from strings
    Number,
    /// Arbitrary precision integer kept as text
    BigInt,
    /// Boolean
    Boolean,
    /// Multi-select array
    Array,
    /// Calendar date/time, coerced to ISO-8601
    DateTime,
    /// File attachment metadata
    Attachment,
    /// Relationship to another table
    Link,
    /// Computed formula
    Formula,
    /// Auto-generated column (ids, timestamps)
    Auto,
    /// Free-form JSON
    Json,
    /// Internal bookkeeping column
    Internal,
}

impl FieldType {
    /// Every recognized type, in declaration order
    pub const ALL: [FieldType; 15] = [
        FieldType::String,
        FieldType::BarcodeQr,
        FieldType::LongForm,
        FieldType::Options,
        FieldType::Number,
        FieldType::BigInt,
        FieldType::Boolean,
        FieldType::Array,
        FieldType::DateTime,
        FieldType::Attachment,
        FieldType::Link,
        FieldType::Formula,
        FieldType::Auto,
        FieldType::Json,
        FieldType::Internal,
    ];

    /// Returns the wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::BarcodeQr => "barcodeqr",
            FieldType::LongForm => "longform",
            FieldType::Options => "options",
            FieldType::Number => "number",
            FieldType::BigInt => "bigint",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::DateTime => "datetime",
            FieldType::Attachment => "attachment",
            FieldType::Link => "link",
            FieldType::Formula => "formula",
            FieldType::Auto => "auto",
            FieldType::Json => "json",
            FieldType::Internal => "internal",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no recognized column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// A single column of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, equal to its key in the schema
    pub name: String,
    /// Declared column type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Mapping from column name to its descriptor.
///
/// Columns iterate in name order. Deserializing goes through the schema
/// shape guard, so a `Schema` obtained from JSON is always well formed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "BTreeMap<String, ColumnDescriptor>")]
pub struct Schema {
    columns: BTreeMap<String, ColumnDescriptor>,
}

impl Schema {
    /// Creates an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from descriptors, keyed by descriptor name
    pub fn from_columns(columns: impl IntoIterator<Item = ColumnDescriptor>) -> Self {
        let columns = columns
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();
        Self { columns }
    }

    /// Adds a column, replacing any previous column of the same name
    pub fn with_column(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        self.columns
            .insert(name.clone(), ColumnDescriptor::new(name, field_type));
        self
    }

    /// Looks up a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.get(name)
    }

    /// Declared type of a column, if the column exists
    pub fn column_type(&self, name: &str) -> Option<FieldType> {
        self.columns.get(name).map(|c| c.field_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Iterates columns in name order
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Value> for Schema {
    type Error = crate::guard::ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        crate::guard::parse_schema(&value)
    }
}

impl From<Schema> for BTreeMap<String, ColumnDescriptor> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_names_round_trip_through_from_str() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>(), Ok(field_type));
        }
    }

    #[test]
    fn test_unknown_field_type() {
        let err = "bogus".parse::<FieldType>().unwrap_err();
        assert_eq!(err, UnknownFieldType("bogus".into()));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_field_type_serde_matches_as_str() {
        assert_eq!(serde_json::to_value(FieldType::DateTime).unwrap(), json!("datetime"));
        assert_eq!(serde_json::to_value(FieldType::BarcodeQr).unwrap(), json!("barcodeqr"));
        let parsed: FieldType = serde_json::from_value(json!("longform")).unwrap();
        assert_eq!(parsed, FieldType::LongForm);
    }

    #[test]
    fn test_schema_builder() {
        let schema = Schema::new()
            .with_column("price", FieldType::Number)
            .with_column("created", FieldType::DateTime);

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.column_type("price"), Some(FieldType::Number));
        assert_eq!(schema.column("created").unwrap().name, "created");
        assert!(schema.column_type("missing").is_none());
    }

    #[test]
    fn test_columns_iterate_in_name_order() {
        let schema = Schema::from_columns(vec![
            ColumnDescriptor::new("zeta", FieldType::String),
            ColumnDescriptor::new("alpha", FieldType::Number),
        ]);
        let names: Vec<_> = schema.columns().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_schema_serde_goes_through_guard() {
        let schema: Schema = serde_json::from_value(json!({
            "age": { "name": "age", "type": "number" }
        }))
        .unwrap();
        assert_eq!(schema.column_type("age"), Some(FieldType::Number));

        let bad = serde_json::from_value::<Schema>(json!({ "age": { "type": "bogus" } }));
        assert!(bad.is_err());

        let out = serde_json::to_value(&schema).unwrap();
        assert_eq!(out, json!({ "age": { "name": "age", "type": "number" } }));
    }
}
