//! CLI argument definitions using clap
//!
//! Commands:
//! - rowschema check --schema <path> --rows <path>
//! - rowschema parse --schema <path> --rows <path>
//! - rowschema ingest --schema <path> --rows <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rowschema - validate and coerce tabular rows against a column schema
#[derive(Parser, Debug)]
#[command(name = "rowschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the JSON schema file
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the JSON rows file, or "-" for stdin
    #[arg(long)]
    pub rows: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate rows and print the per-column report
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Coerce rows to canonical form and print them
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate, then coerce when acceptable, and print both
    Ingest {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Command::Check { input } | Command::Parse { input } | Command::Ingest { input } => input,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::try_parse_from([
            "rowschema", "check", "--schema", "s.json", "--rows", "r.json",
        ])
        .unwrap();
        match cli.command {
            Command::Check { input } => {
                assert_eq!(input.schema, PathBuf::from("s.json"));
                assert_eq!(input.rows, PathBuf::from("r.json"));
                assert!(input.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from([
            "rowschema", "ingest", "--schema", "s.json", "--rows", "-", "--config", "c.json",
        ])
        .unwrap();
        assert_eq!(cli.command.input().config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.command.input().rows, PathBuf::from("-"));
    }

    #[test]
    fn test_schema_is_required() {
        assert!(Cli::try_parse_from(["rowschema", "parse", "--rows", "r.json"]).is_err());
    }
}
