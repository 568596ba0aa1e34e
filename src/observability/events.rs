//! Observable ingestion events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Lifecycle events emitted around the validation core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Schema read and accepted by the shape guard
    SchemaLoaded,
    /// Schema failed the shape guard
    SchemaRejected,
    /// Row collection failed the shape guard
    RowsRejected,
    /// Validation report produced
    ValidationComplete,
    /// Validation found invalid columns and parsing was skipped
    ValidationRejected,
    /// Rows parsed into canonical form
    ParseComplete,
    /// Parsing reported field errors
    ParseFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::RowsRejected => "ROWS_REJECTED",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::ParseComplete => "PARSE_COMPLETE",
            Event::ParseFailed => "PARSE_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaRejected
            | Event::RowsRejected
            | Event::ValidationRejected
            | Event::ParseFailed => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_warnings() {
        assert_eq!(Event::SchemaRejected.severity(), Severity::Warn);
        assert_eq!(Event::ParseFailed.severity(), Severity::Warn);
        assert_eq!(Event::ParseComplete.severity(), Severity::Info);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ValidationComplete.to_string(), "VALIDATION_COMPLETE");
        assert_eq!(Event::RowsRejected.as_str(), "ROWS_REJECTED");
    }
}
