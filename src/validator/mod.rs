//! Column validator
//!
//! Validation semantics:
//! - One result per schema column, no more, no less
//! - A column is valid iff every row's value is acceptable to the
//!   column's rule (vacuously true for zero rows)
//! - Values that are not supplied are acceptable
//! - Types without a rule accept everything
//! - Undeclared row fields are ignored
//!
//! The validator never fails and never mutates its input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coercion::apply;
use crate::config::CoercionOptions;
use crate::rows::{Presence, Row};
use crate::schema::{FieldType, Schema};

/// Outcome for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValidation {
    /// Whether every row holds an acceptable value
    pub is_valid: bool,
    /// Declared type, so callers can report which rule failed
    pub column_type: FieldType,
    /// Indices of the rows whose value was rejected, ascending
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_rows: Vec<usize>,
}

/// Per-column validation report keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult {
    columns: BTreeMap<String, ColumnValidation>,
}

impl ValidationResult {
    /// Whether every column is valid
    pub fn is_valid(&self) -> bool {
        self.columns.values().all(|c| c.is_valid)
    }

    /// Result for a single column
    pub fn column(&self, name: &str) -> Option<&ColumnValidation> {
        self.columns.get(name)
    }

    /// Names of invalid columns, in name order
    pub fn invalid_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, c)| !c.is_valid)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValidation)> {
        self.columns.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Validates rows against a schema using the legacy presence rule.
pub fn validate(rows: &[Row], schema: &Schema) -> ValidationResult {
    validate_with(rows, schema, &CoercionOptions::default())
}

/// Validates rows against a schema.
pub fn validate_with(rows: &[Row], schema: &Schema, options: &CoercionOptions) -> ValidationResult {
    let columns = schema
        .columns()
        .map(|column| {
            let invalid_rows: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, row)| {
                    let presence = Presence::of(row, &column.name);
                    apply(column.field_type, presence, options.presence).is_err()
                })
                .map(|(i, _)| i)
                .collect();

            let result = ColumnValidation {
                is_valid: invalid_rows.is_empty(),
                column_type: column.field_type,
                invalid_rows,
            };
            (column.name.clone(), result)
        })
        .collect();

    ValidationResult { columns }
}
