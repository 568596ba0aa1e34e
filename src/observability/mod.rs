//! Observability for rowschema
//!
//! Structured JSON log lines around the validation core. The core itself
//! is pure and never logs; callers such as the CLI emit lifecycle events.
//!
//! ```ignore
//! use rowschema::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ParseComplete, &[("rows", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
