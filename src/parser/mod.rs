//! Row parser
//!
//! Builds a new row collection with values in canonical form:
//! - Iterates each row's own fields, in the row's order
//! - Coerces supplied values of `number` and `datetime` columns
//! - Copies everything else unchanged
//! - Preserves row count and order
//!
//! Errors never abort the batch. Every undeclared field and every value
//! that cannot be coerced is collected, and the caller gets either the
//! fully coerced rows or a `ParseFailure` listing all of them.

mod errors;

pub use errors::{FieldError, FieldErrorKind, ParseFailure, ParseResult};

use crate::coercion::apply;
use crate::config::{CoercionOptions, UndeclaredColumns};
use crate::rows::{Presence, Row, Rows};
use crate::schema::Schema;

/// Parses rows with the legacy presence rule, rejecting undeclared fields.
pub fn parse(rows: &[Row], schema: &Schema) -> ParseResult<Rows> {
    parse_with(rows, schema, &CoercionOptions::default())
}

/// Parses rows against a schema.
pub fn parse_with(rows: &[Row], schema: &Schema, options: &CoercionOptions) -> ParseResult<Rows> {
    let mut parsed = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse_row(index, row, schema, options) {
            Ok(row) => parsed.push((index, row)),
            Err(mut row_errors) => errors.append(&mut row_errors),
        }
    }

    if errors.is_empty() {
        Ok(parsed.into_iter().map(|(_, row)| row).collect())
    } else {
        Err(ParseFailure::new(errors, parsed, rows.len()))
    }
}

fn parse_row(
    index: usize,
    row: &Row,
    schema: &Schema,
    options: &CoercionOptions,
) -> Result<Row, Vec<FieldError>> {
    let mut out = Row::with_capacity(row.len());
    let mut errors = Vec::new();

    for (column, value) in row {
        let Some(field_type) = schema.column_type(column) else {
            match options.undeclared_columns {
                UndeclaredColumns::PassThrough => {
                    out.insert(column.clone(), value.clone());
                }
                UndeclaredColumns::Reject => errors.push(FieldError::undeclared(index, column)),
            }
            continue;
        };

        match apply(field_type, Presence::classify(Some(value)), options.presence) {
            Ok(Some(coerced)) => {
                out.insert(column.clone(), coerced);
            }
            Ok(None) => {
                out.insert(column.clone(), value.clone());
            }
            Err(source) => errors.push(FieldError::uncoercible(
                index,
                column,
                field_type,
                value.clone(),
                source,
            )),
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(errors)
    }
}
