//! JSON I/O handling for the CLI
//!
//! - Input: JSON documents from files, or stdin for "-"
//! - Output: one JSON object per invocation on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a JSON document from a file, or from stdin when the path is "-"
pub fn read_json(path: &Path) -> CliResult<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::io_error(format!("Failed to read '{}': {}", path.display(), e)))?
    };

    if content.trim().is_empty() {
        return Err(CliError::io_error(format!("Empty input from '{}'", path.display())));
    }

    Ok(serde_json::from_str(&content)?)
}

/// Success envelope
pub fn success_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; `details` is merged in when present
pub fn error_envelope(err: &CliError) -> Value {
    let mut response = json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    if let Some(details) = err.details() {
        response["details"] = details.clone();
    }
    response
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&success_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_json(&error_envelope(err))
}

fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
