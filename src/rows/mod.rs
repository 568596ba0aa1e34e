//! Row data model
//!
//! Rows are loosely typed JSON records. Field order within a row and row
//! order within a collection are preserved end to end.

mod presence;

pub use presence::{Presence, PresenceMode};

use serde_json::{Map, Value};

/// A single record: field name to arbitrary JSON value
pub type Row = Map<String, Value>;

/// An ordered collection of rows
pub type Rows = Vec<Row>;
