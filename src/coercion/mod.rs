//! Value coercion shared by the validator and the parser
//!
//! Every type-specific decision lives in the `rules` dispatch table;
//! `number` and `datetime` hold the conversions it points at.

mod datetime;
mod errors;
mod number;
mod rules;

pub use datetime::{canonical, parse_instant, to_timestamp};
pub use errors::{CoercionError, CoercionResult};
pub use number::{parse_numeric_str, to_number};
pub use rules::{apply, rule_for, ColumnRule};
