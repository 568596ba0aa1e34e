//! Value presence classification
//!
//! Distinguishes a missing key from an explicit null, an empty string and
//! a zero-like value, so the "was a value supplied" decision is a policy
//! choice rather than a side effect of truthiness.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Row;

/// How a row value is classified before a column rule looks at it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence<'a> {
    /// Key not present in the row
    Missing,
    /// Key present with a JSON null
    Null,
    /// Empty string
    Empty,
    /// Numeric zero or `false`
    Zero(&'a Value),
    /// Anything else
    Supplied(&'a Value),
}

impl<'a> Presence<'a> {
    /// Classifies the value of `column` in `row`.
    pub fn of(row: &'a Row, column: &str) -> Self {
        Self::classify(row.get(column))
    }

    /// Classifies an optional value.
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None => Presence::Missing,
            Some(Value::Null) => Presence::Null,
            Some(Value::String(s)) if s.is_empty() => Presence::Empty,
            Some(v) if is_zero(v) => Presence::Zero(v),
            Some(v) => Presence::Supplied(v),
        }
    }

    /// Whether a column rule should be applied under `mode`.
    pub fn is_supplied(&self, mode: PresenceMode) -> bool {
        match (self, mode) {
            (Presence::Supplied(_), _) => true,
            (Presence::Zero(_), PresenceMode::Explicit) => true,
            _ => false,
        }
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Policy deciding which classified values count as supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceMode {
    /// Legacy rule: null, missing, `""`, `0` and `false` are all absent
    #[default]
    Truthy,
    /// Only missing, null and `""` are absent; zero and `false` are checked
    Explicit,
}
