//! Parse Invariant Tests
//!
//! Tests for coercion to canonical form:
//! - Row count, row order and field order are preserved
//! - Parsing canonical output is a no-op
//! - Undeclared fields and uncoercible values are reported, never panicked on
//! - Errors are collected across the whole batch

use rowschema::guard::{parse_rows, parse_schema};
use rowschema::parser::{parse, parse_with, FieldErrorKind};
use rowschema::rows::Rows;
use rowschema::schema::{FieldType, Schema};
use rowschema::{CoercionOptions, UndeclaredColumns};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn rows(value: Value) -> Rows {
    parse_rows(&value).unwrap()
}

fn as_json(rows: &Rows) -> Value {
    Value::Array(rows.iter().cloned().map(Value::Object).collect())
}

fn mixed_schema() -> Schema {
    parse_schema(&json!({
        "n": { "name": "n", "type": "number" },
        "d": { "name": "d", "type": "datetime" },
        "s": { "name": "s", "type": "string" }
    }))
    .unwrap()
}

// =============================================================================
// Reference Examples
// =============================================================================

/// A numeric string becomes a number.
#[test]
fn test_numeric_string_becomes_number() {
    let schema = parse_schema(&json!({ "n": { "name": "n", "type": "number" } })).unwrap();
    let parsed = parse(&rows(json!([{ "n": "5" }])), &schema).unwrap();
    assert_eq!(as_json(&parsed), json!([{ "n": 5 }]));
}

/// A calendar date becomes a UTC timestamp with milliseconds.
#[test]
fn test_date_becomes_canonical_timestamp() {
    let schema = parse_schema(&json!({ "d": { "name": "d", "type": "datetime" } })).unwrap();
    let parsed = parse(&rows(json!([{ "d": "2020-01-01" }])), &schema).unwrap();
    assert_eq!(as_json(&parsed), json!([{ "d": "2020-01-01T00:00:00.000Z" }]));
}

// =============================================================================
// Preservation Tests
// =============================================================================

/// Row count and order are preserved.
#[test]
fn test_row_count_and_order_preserved() {
    let input = rows(json!([
        { "n": "3", "s": "c" },
        { "n": "1", "s": "a" },
        { "n": "2", "s": "b" }
    ]));
    let parsed = parse(&input, &mixed_schema()).unwrap();

    assert_eq!(parsed.len(), input.len());
    let labels: Vec<&Value> = parsed.iter().map(|row| &row["s"]).collect();
    assert_eq!(labels, vec![&json!("c"), &json!("a"), &json!("b")]);
}

/// Each row keeps its own keys in input order.
#[test]
fn test_row_keys_unchanged() {
    let input = rows(json!([{ "s": "x", "d": "2020-01-01", "n": "4" }, { "n": "1" }]));
    let parsed = parse(&input, &mixed_schema()).unwrap();

    let keys: Vec<&str> = parsed[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["s", "d", "n"]);
    assert_eq!(parsed[1].len(), 1);
}

/// Columns the row does not hold are not added.
#[test]
fn test_absent_columns_not_added() {
    let parsed = parse(&rows(json!([{ "s": "only" }])), &mixed_schema()).unwrap();
    assert_eq!(as_json(&parsed), json!([{ "s": "only" }]));
}

/// Parsing never mutates its input.
#[test]
fn test_parse_does_not_mutate_rows() {
    let input = rows(json!([{ "n": "5", "d": "2020-01-01" }]));
    let before = input.clone();
    let _ = parse(&input, &mixed_schema());
    assert_eq!(input, before);
}

// =============================================================================
// Idempotence Tests
// =============================================================================

/// Parsing canonical output again changes nothing.
#[test]
fn test_parse_is_idempotent() {
    let input = rows(json!([
        { "n": "42", "d": "2020-01-01", "s": "a" },
        { "n": " 1.5e2 ", "d": "2021-06-15T10:30:00+02:00" },
        { "n": "", "d": null },
        { "n": "-0.25", "d": 1_600_000_000_000_i64 }
    ]));
    let schema = mixed_schema();

    let once = parse(&input, &schema).unwrap();
    let twice = parse(&once, &schema).unwrap();
    assert_eq!(once, twice);
}

/// Offsets are normalized to UTC.
#[test]
fn test_offset_normalized_to_utc() {
    let schema = Schema::new().with_column("d", FieldType::DateTime);
    let parsed = parse(&rows(json!([{ "d": "2021-06-15T10:30:00+02:00" }])), &schema).unwrap();
    assert_eq!(parsed[0]["d"], json!("2021-06-15T08:30:00.000Z"));
}

// =============================================================================
// Error Reporting Tests
// =============================================================================

/// An undeclared field is reported by name.
#[test]
fn test_undeclared_field_reported() {
    let failure = parse(&rows(json!([{ "n": "1", "ghost": 1 }])), &mixed_schema()).unwrap_err();

    assert_eq!(failure.errors().len(), 1);
    let error = &failure.errors()[0];
    assert_eq!(error.row, 0);
    assert_eq!(error.column, "ghost");
    assert_eq!(error.kind, FieldErrorKind::UndeclaredColumn);
    assert_eq!(error.code(), "ROWSCHEMA_UNDECLARED_COLUMN");
}

/// Undeclared fields may be passed through instead.
#[test]
fn test_undeclared_field_passed_through() {
    let options = CoercionOptions::default().with_undeclared_columns(UndeclaredColumns::PassThrough);
    let parsed = parse_with(&rows(json!([{ "n": "1", "ghost": "x" }])), &mixed_schema(), &options)
        .unwrap();
    assert_eq!(as_json(&parsed), json!([{ "n": 1, "ghost": "x" }]));
}

/// An unparsable date is a per-field error, not a crash.
#[test]
fn test_unparsable_date_reported() {
    let failure = parse(&rows(json!([{ "d": "soon" }])), &mixed_schema()).unwrap_err();

    let error = &failure.errors()[0];
    assert_eq!(error.column, "d");
    assert_eq!(error.code(), "ROWSCHEMA_UNCOERCIBLE_VALUE");
    match &error.kind {
        FieldErrorKind::Uncoercible { column_type, value, .. } => {
            assert_eq!(*column_type, FieldType::DateTime);
            assert_eq!(value, &json!("soon"));
        }
        other => panic!("unexpected error kind: {:?}", other),
    }
}

/// Errors from every row are collected and clean rows are kept.
#[test]
fn test_errors_aggregated_across_rows() {
    let input = rows(json!([
        { "n": "1" },
        { "n": "one", "d": "never" },
        { "n": "3" },
        { "ghost": true }
    ]));
    let failure = parse(&input, &mixed_schema()).unwrap_err();

    assert_eq!(failure.errors().len(), 3);
    assert_eq!(failure.failed_rows(), vec![1, 3]);
    assert_eq!(failure.succeeded_rows().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(failure.total_rows(), 4);

    let kept: Vec<Value> = failure
        .parsed_rows()
        .iter()
        .map(|(_, row)| Value::Object(row.clone()))
        .collect();
    assert_eq!(kept, vec![json!({ "n": 1 }), json!({ "n": 3 })]);
}

/// Field errors serialize with their location and code.
#[test]
fn test_field_error_json() {
    let failure = parse(&rows(json!([{}, { "n": "abc" }])), &mixed_schema()).unwrap_err();
    let error = serde_json::to_value(&failure.errors()[0]).unwrap();

    assert_eq!(error["code"], "ROWSCHEMA_UNCOERCIBLE_VALUE");
    assert_eq!(error["row"], 1);
    assert_eq!(error["column"], "n");
    assert_eq!(error["columnType"], "number");
    assert_eq!(error["value"], "abc");
}
