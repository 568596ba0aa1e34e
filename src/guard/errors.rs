//! Shape error types
//!
//! Error codes:
//! - ROWSCHEMA_SCHEMA_MALFORMED
//! - ROWSCHEMA_ROWS_MALFORMED

use std::fmt;

/// Shape error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeErrorCode {
    /// Value is not a well-formed column schema
    SchemaMalformed,
    /// Value is not a well-formed row collection
    RowsMalformed,
}

impl ShapeErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ShapeErrorCode::SchemaMalformed => "ROWSCHEMA_SCHEMA_MALFORMED",
            ShapeErrorCode::RowsMalformed => "ROWSCHEMA_ROWS_MALFORMED",
        }
    }
}

impl fmt::Display for ShapeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Where a shape check failed and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDetails {
    /// JSON path of the offending value (e.g., "$.price.type", "$[3]")
    pub path: String,
    /// Expected shape
    pub expected: String,
    /// Shape or value actually found
    pub actual: String,
}

impl ShapeDetails {
    pub fn new(path: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }
}

impl fmt::Display for ShapeDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at '{}': expected {}, got {}", self.path, self.expected, self.actual)
    }
}

/// Rejection of untrusted schema or row input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    code: ShapeErrorCode,
    message: String,
    details: ShapeDetails,
}

impl ShapeError {
    /// Create a malformed schema error
    pub fn malformed_schema(details: ShapeDetails) -> Self {
        Self {
            code: ShapeErrorCode::SchemaMalformed,
            message: format!("Schema rejected {}", details),
            details,
        }
    }

    /// Create a malformed rows error
    pub fn malformed_rows(details: ShapeDetails) -> Self {
        Self {
            code: ShapeErrorCode::RowsMalformed,
            message: format!("Rows rejected {}", details),
            details,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ShapeErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns where the check failed
    pub fn details(&self) -> &ShapeDetails {
        &self.details
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ShapeError {}

/// Result type for shape checks
pub type ShapeResult<T> = Result<T, ShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ShapeErrorCode::SchemaMalformed.code(), "ROWSCHEMA_SCHEMA_MALFORMED");
        assert_eq!(ShapeErrorCode::RowsMalformed.code(), "ROWSCHEMA_ROWS_MALFORMED");
    }

    #[test]
    fn test_details_display() {
        let details = ShapeDetails::new("$.age.type", "string", "number");
        let display = format!("{}", details);
        assert!(display.contains("$.age.type"));
        assert!(display.contains("string"));
        assert!(display.contains("number"));
    }

    #[test]
    fn test_error_display_includes_code_and_path() {
        let err = ShapeError::malformed_rows(ShapeDetails::new("$[2]", "object", "number"));
        let display = format!("{}", err);
        assert!(display.starts_with("ROWSCHEMA_ROWS_MALFORMED"));
        assert!(display.contains("$[2]"));
        assert_eq!(err.details().path, "$[2]");
    }
}
