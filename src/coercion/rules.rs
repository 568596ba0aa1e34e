//! Column rule dispatch table
//!
//! The single mapping from field type to coercion rule. The validator
//! asks a rule whether a value is acceptable, the parser asks it for the
//! canonical value; acceptance is defined as successful coercion so the
//! two cannot disagree. Types without an entry pass values through.

use std::fmt;

use serde_json::Value;

use super::datetime::to_timestamp;
use super::errors::CoercionResult;
use super::number::to_number;
use crate::rows::{Presence, PresenceMode};
use crate::schema::FieldType;

/// Coercion rule for one field type
pub struct ColumnRule {
    field_type: FieldType,
    coerce: fn(&Value) -> CoercionResult<Value>,
}

impl fmt::Debug for ColumnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnRule")
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

impl ColumnRule {
    /// The field type this rule governs
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Brings a supplied value into canonical form.
    pub fn coerce(&self, value: &Value) -> CoercionResult<Value> {
        (self.coerce)(value)
    }

    /// Whether a supplied value can be brought into canonical form.
    pub fn accepts(&self, value: &Value) -> bool {
        self.coerce(value).is_ok()
    }
}

static RULES: [ColumnRule; 2] = [
    ColumnRule {
        field_type: FieldType::Number,
        coerce: to_number,
    },
    ColumnRule {
        field_type: FieldType::DateTime,
        coerce: to_timestamp,
    },
];

/// Looks up the rule for a field type; `None` means pass-through.
pub fn rule_for(field_type: FieldType) -> Option<&'static ColumnRule> {
    RULES.iter().find(|rule| rule.field_type == field_type)
}

/// Applies the rule for `field_type` to one classified row value.
///
/// Returns `Ok(None)` when the value is left as supplied: the type has no
/// rule, or the value does not count as supplied under `mode`.
pub fn apply(
    field_type: FieldType,
    presence: Presence<'_>,
    mode: PresenceMode,
) -> CoercionResult<Option<Value>> {
    let Some(rule) = rule_for(field_type) else {
        return Ok(None);
    };
    if !presence.is_supplied(mode) {
        return Ok(None);
    }
    match presence {
        Presence::Supplied(value) | Presence::Zero(value) => rule.coerce(value).map(Some),
        Presence::Missing | Presence::Null | Presence::Empty => Ok(None),
    }
}
