//! Coercion error types

use thiserror::Error;

/// Why a single value could not be brought into canonical form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// Text that does not read as a number
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Number overflowed to infinity
    #[error("'{0}' is not a finite number")]
    NotFinite(String),

    /// Text that does not read as a calendar date/time
    #[error("'{0}' is not a recognizable date")]
    InvalidDate(String),

    /// Instant outside the representable range
    #[error("'{0}' is outside the representable date range")]
    OutOfRange(String),

    /// JSON value of a kind the rule never converts
    #[error("cannot convert {actual} to {expected}")]
    UnsupportedValue {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for coercion
pub type CoercionResult<T> = Result<T, CoercionError>;
