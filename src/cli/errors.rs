//! CLI-specific error types

use std::fmt;
use std::io;

use serde_json::Value;

use crate::config::ConfigError;
use crate::schema::LoadError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Schema input failed the shape guard
    SchemaRejected,
    /// Row input failed the shape guard
    RowsRejected,
    /// At least one column failed validation
    ValidationFailed,
    /// Parsing reported field errors
    ParseFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ROWSCHEMA_CLI_CONFIG_ERROR",
            Self::IoError => "ROWSCHEMA_CLI_IO_ERROR",
            Self::SchemaRejected => "ROWSCHEMA_CLI_SCHEMA_REJECTED",
            Self::RowsRejected => "ROWSCHEMA_CLI_ROWS_REJECTED",
            Self::ValidationFailed => "ROWSCHEMA_CLI_VALIDATION_FAILED",
            Self::ParseFailed => "ROWSCHEMA_CLI_PARSE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    details: Option<Value>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a machine-readable payload
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn schema_rejected(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SchemaRejected, msg)
    }

    pub fn rows_rejected(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RowsRejected, msg)
    }

    pub fn validation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ValidationFailed, msg)
    }

    pub fn parse_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ParseFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the attached payload, if any
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Io { .. } | LoadError::Json { .. } => Self::io_error(e.to_string()),
            LoadError::Shape { .. } | LoadError::Duplicate(_) => Self::schema_rejected(e.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
