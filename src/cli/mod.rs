//! rowschema command line interface
//!
//! Reads a schema file and a rows document, runs the requested command,
//! and writes exactly one JSON envelope to stdout.

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, InputArgs};
pub use commands::{check, execute, ingest, parse, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, read_json, success_envelope, write_error, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
