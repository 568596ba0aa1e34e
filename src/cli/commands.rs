//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Load configuration and apply the log threshold
//! 2. Load the schema file through the shape guard
//! 3. Read the rows document through the shape guard
//! 4. Run the pure core and shape the response
//!
//! Commands return the response payload; `run_command` writes it.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::guard::{parse_rows, ShapeError};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::parser::{parse_with, ParseFailure};
use crate::rows::Rows;
use crate::schema::{LoadError, Schema, SchemaLoader};
use crate::validator::{validate_with, ValidationResult};

use super::args::{Command, InputArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_json, write_error, write_response};

/// Run a command and write its response.
///
/// Rejections are written as an error envelope and also returned, so the
/// process exits non-zero.
pub fn run_command(command: Command) -> CliResult<()> {
    match execute(&command) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(&e)?;
            Err(e)
        }
    }
}

/// Execute a command and return its response payload
pub fn execute(command: &Command) -> CliResult<Value> {
    match command {
        Command::Check { input } => check(input),
        Command::Parse { input } => parse(input),
        Command::Ingest { input } => ingest(input),
    }
}

/// Validate rows and return the per-column report.
///
/// An invalid column is a rejection; the report travels in the error details.
pub fn check(input: &InputArgs) -> CliResult<Value> {
    let (config, schema, rows) = prepare(input)?;
    let report = run_validation(&config, &schema, &rows);

    if !report.is_valid() {
        return Err(validation_rejected(&report)?);
    }
    Ok(serde_json::to_value(&report)?)
}

/// Coerce rows and return them in canonical form
pub fn parse(input: &InputArgs) -> CliResult<Value> {
    let (config, schema, rows) = prepare(input)?;
    let parsed = run_parse(&config, &schema, &rows)?;
    Ok(Value::Array(parsed.into_iter().map(Value::Object).collect()))
}

/// Validate, then coerce when the report allows it.
///
/// With `require_valid` off, parsing runs even when columns fail validation,
/// and field errors are reported by the parser instead.
pub fn ingest(input: &InputArgs) -> CliResult<Value> {
    let (config, schema, rows) = prepare(input)?;
    let report = run_validation(&config, &schema, &rows);

    if !report.is_valid() && config.require_valid {
        return Err(validation_rejected(&report)?);
    }

    let parsed = run_parse(&config, &schema, &rows)?;
    Ok(json!({
        "validation": report,
        "rows": parsed,
    }))
}

// =============================================================================
// Shared steps
// =============================================================================

fn prepare(input: &InputArgs) -> CliResult<(Config, Schema, Rows)> {
    let config = load_config(input.config.as_deref())?;
    let schema = load_schema(&input.schema)?;
    let rows = load_rows(&input.rows)?;
    Ok((config, schema, rows))
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_or_default(path)?;
    Logger::set_min_severity(config.log_level);
    if let Some(path) = path {
        log_event_with_fields(Event::ConfigLoaded, &[("path", path.display().to_string().as_str())]);
    }
    Ok(config)
}

fn load_schema(path: &Path) -> CliResult<Schema> {
    match SchemaLoader::load_file(path) {
        Ok(schema) => {
            log_event_with_fields(
                Event::SchemaLoaded,
                &[
                    ("path", path.display().to_string().as_str()),
                    ("columns", schema.len().to_string().as_str()),
                ],
            );
            Ok(schema)
        }
        Err(LoadError::Shape { path, source }) => {
            log_event_with_fields(
                Event::SchemaRejected,
                &[
                    ("path", path.display().to_string().as_str()),
                    ("at", source.details().path.as_str()),
                ],
            );
            Err(CliError::schema_rejected(source.to_string()).with_details(shape_details(&source)))
        }
        Err(e) => Err(e.into()),
    }
}

fn load_rows(path: &Path) -> CliResult<Rows> {
    let document = read_json(path)?;
    parse_rows(&document).map_err(|e| {
        log_event_with_fields(Event::RowsRejected, &[("at", e.details().path.as_str())]);
        CliError::rows_rejected(e.to_string()).with_details(shape_details(&e))
    })
}

fn run_validation(config: &Config, schema: &Schema, rows: &Rows) -> ValidationResult {
    let report = validate_with(rows, schema, &config.options());
    let invalid: Vec<&str> = report.invalid_columns().collect();
    if invalid.is_empty() {
        log_event_with_fields(
            Event::ValidationComplete,
            &[
                ("rows", rows.len().to_string().as_str()),
                ("columns", report.len().to_string().as_str()),
            ],
        );
    } else {
        log_event_with_fields(
            Event::ValidationRejected,
            &[
                ("rows", rows.len().to_string().as_str()),
                ("invalid_columns", invalid.join(",").as_str()),
            ],
        );
    }
    report
}

fn run_parse(config: &Config, schema: &Schema, rows: &Rows) -> CliResult<Rows> {
    match parse_with(rows, schema, &config.options()) {
        Ok(parsed) => {
            log_event_with_fields(Event::ParseComplete, &[("rows", parsed.len().to_string().as_str())]);
            Ok(parsed)
        }
        Err(failure) => {
            log_event_with_fields(
                Event::ParseFailed,
                &[
                    ("errors", failure.errors().len().to_string().as_str()),
                    ("failed_rows", failure.failed_rows().len().to_string().as_str()),
                ],
            );
            Err(parse_rejected(&failure))
        }
    }
}

fn validation_rejected(report: &ValidationResult) -> CliResult<CliError> {
    let invalid: Vec<&str> = report.invalid_columns().collect();
    Ok(CliError::validation_failed(format!("invalid column(s): {}", invalid.join(", ")))
        .with_details(json!({ "validation": serde_json::to_value(report)? })))
}

fn parse_rejected(failure: &ParseFailure) -> CliError {
    let succeeded: Vec<usize> = failure.succeeded_rows().collect();
    CliError::parse_failed(failure.to_string()).with_details(json!({
        "errors": failure.errors(),
        "succeededRows": succeeded,
        "totalRows": failure.total_rows(),
    }))
}

fn shape_details(e: &ShapeError) -> Value {
    let details = e.details();
    json!({
        "code": e.code().code(),
        "path": details.path,
        "expected": details.expected,
        "actual": details.actual,
    })
}
