//! Parse error types
//!
//! Error codes:
//! - ROWSCHEMA_UNDECLARED_COLUMN
//! - ROWSCHEMA_UNCOERCIBLE_VALUE

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::coercion::CoercionError;
use crate::rows::Row;
use crate::schema::FieldType;

/// What went wrong with one field of one row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldErrorKind {
    /// The row holds a field the schema does not declare
    #[error("column is not declared in the schema")]
    UndeclaredColumn,

    /// The value could not be brought into the column's canonical form
    #[error("cannot coerce {value} to {column_type}: {source}")]
    Uncoercible {
        column_type: FieldType,
        value: Value,
        source: CoercionError,
    },
}

impl FieldErrorKind {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::UndeclaredColumn => "ROWSCHEMA_UNDECLARED_COLUMN",
            FieldErrorKind::Uncoercible { .. } => "ROWSCHEMA_UNCOERCIBLE_VALUE",
        }
    }
}

/// A field-addressable parse error
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row}, column '{column}': {kind}")]
pub struct FieldError {
    /// Zero-based index of the row in the input
    pub row: usize,
    /// Offending field name
    pub column: String,
    /// What went wrong
    #[source]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn undeclared(row: usize, column: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            kind: FieldErrorKind::UndeclaredColumn,
        }
    }

    pub fn uncoercible(
        row: usize,
        column: impl Into<String>,
        column_type: FieldType,
        value: Value,
        source: CoercionError,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            kind: FieldErrorKind::Uncoercible {
                column_type,
                value,
                source,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// JSON form for reporting to callers
    pub fn to_json(&self) -> Value {
        let mut out = json!({
            "code": self.code(),
            "row": self.row,
            "column": self.column,
            "message": self.kind.to_string(),
        });
        if let FieldErrorKind::Uncoercible {
            column_type, value, ..
        } = &self.kind
        {
            out["columnType"] = json!(column_type);
            out["value"] = value.clone();
        }
        out
    }
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Aggregated outcome of a parse that hit at least one field error.
///
/// Rows that coerced cleanly are kept, with their input index, so callers
/// may choose to store them and report the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    errors: Vec<FieldError>,
    parsed: Vec<(usize, Row)>,
    total_rows: usize,
}

impl ParseFailure {
    pub(crate) fn new(errors: Vec<FieldError>, parsed: Vec<(usize, Row)>, total_rows: usize) -> Self {
        Self {
            errors,
            parsed,
            total_rows,
        }
    }

    /// Every field error, in row then field order. Never empty.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Indices of the rows that parsed cleanly, ascending
    pub fn succeeded_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.parsed.iter().map(|(i, _)| *i)
    }

    /// Indices of the rows with at least one error, ascending
    pub fn failed_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.dedup();
        rows
    }

    /// Coerced rows that parsed cleanly, with their input index
    pub fn parsed_rows(&self) -> &[(usize, Row)] {
        &self.parsed
    }

    /// Consumes the failure, keeping the clean rows
    pub fn into_parsed_rows(self) -> Vec<(usize, Row)> {
        self.parsed
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} field error(s) in {} of {} row(s)",
            self.errors.len(),
            self.failed_rows().len(),
            self.total_rows
        )?;
        if let Some(first) = self.errors.first() {
            write!(f, "; first: {}", first)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseFailure>;
