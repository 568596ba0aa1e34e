//! Numeric coercion
//!
//! Accepted inputs: JSON numbers, booleans (1 / 0) and numeric text.
//! Numeric text is trimmed; blank text reads as 0. Decimal literals take
//! an optional sign, fraction and exponent. `0x`, `0o` and `0b` prefixes
//! select a radix and take no sign. Non-finite results are rejected since
//! JSON cannot carry them.

use serde_json::{Number, Value};

use super::errors::{CoercionError, CoercionResult};
use crate::guard::json_type_name;

/// Largest magnitude below which every integer is exactly representable
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Converts a row value to a canonical JSON number.
pub fn to_number(value: &Value) -> CoercionResult<Value> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::from(u8::from(*b))),
        Value::String(s) => {
            let n = parse_numeric_str(s)?;
            number_value(n).ok_or_else(|| CoercionError::NotFinite(s.clone()))
        }
        other => Err(CoercionError::UnsupportedValue {
            expected: "number",
            actual: json_type_name(other),
        }),
    }
}

/// Reads numeric text the way loosely-typed imports expect.
pub fn parse_numeric_str(raw: &str) -> CoercionResult<f64> {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return Ok(0.0);
    }

    if let Some(n) = parse_radix_literal(s) {
        return n.ok_or_else(|| CoercionError::NotANumber(raw.to_string()));
    }

    // f64::from_str also takes "inf", "NaN" and "infinity"
    let decimal_chars = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_chars {
        return Err(CoercionError::NotANumber(raw.to_string()));
    }

    let n: f64 = s
        .parse()
        .map_err(|_| CoercionError::NotANumber(raw.to_string()))?;
    if !n.is_finite() {
        return Err(CoercionError::NotFinite(raw.to_string()));
    }
    Ok(n)
}

/// Returns `None` when `s` has no radix prefix, `Some(None)` when the
/// prefix is present but the digits are bad.
fn parse_radix_literal(s: &str) -> Option<Option<f64>> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(None);
    }

    let mut n = 0.0_f64;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return Some(None);
        };
        n = n * f64::from(radix) + f64::from(d);
    }
    Some(n.is_finite().then_some(n))
}

/// Wraps a finite float as a JSON number, preferring integers.
pub(crate) fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        // also folds -0 into 0
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_text_becomes_integer() {
        assert_eq!(to_number(&json!("5")).unwrap(), json!(5));
        assert_eq!(to_number(&json!("-42")).unwrap(), json!(-42));
        assert_eq!(to_number(&json!("+7")).unwrap(), json!(7));
    }

    #[test]
    fn test_fractional_and_exponent_text() {
        assert_eq!(to_number(&json!("2.5")).unwrap(), json!(2.5));
        assert_eq!(to_number(&json!(".5")).unwrap(), json!(0.5));
        assert_eq!(to_number(&json!("5.")).unwrap(), json!(5));
        assert_eq!(to_number(&json!("1e3")).unwrap(), json!(1000));
        assert_eq!(to_number(&json!("1.5E-1")).unwrap(), json!(0.15));
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(to_number(&json!("  12\t")).unwrap(), json!(12));
        assert_eq!(to_number(&json!("   ")).unwrap(), json!(0));
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(to_number(&json!("0x1F")).unwrap(), json!(31));
        assert_eq!(to_number(&json!("0o17")).unwrap(), json!(15));
        assert_eq!(to_number(&json!("0b101")).unwrap(), json!(5));
        assert!(to_number(&json!("0x")).is_err());
        assert!(to_number(&json!("0xZZ")).is_err());
        assert!(to_number(&json!("-0x10")).is_err());
    }

    #[test]
    fn test_non_numeric_text_rejected() {
        assert_eq!(
            to_number(&json!("abc")).unwrap_err(),
            CoercionError::NotANumber("abc".into())
        );
        assert!(to_number(&json!("12px")).is_err());
        assert!(to_number(&json!("1,000")).is_err());
        assert!(to_number(&json!("1e")).is_err());
        assert!(to_number(&json!(".")).is_err());
    }

    #[test]
    fn test_special_float_names_rejected() {
        assert!(to_number(&json!("NaN")).is_err());
        assert!(to_number(&json!("inf")).is_err());
        assert!(to_number(&json!("Infinity")).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(
            to_number(&json!("1e400")).unwrap_err(),
            CoercionError::NotFinite("1e400".into())
        );
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(to_number(&json!(5)).unwrap(), json!(5));
        assert_eq!(to_number(&json!(5.25)).unwrap(), json!(5.25));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(to_number(&json!(true)).unwrap(), json!(1));
        assert_eq!(to_number(&json!(false)).unwrap(), json!(0));
    }

    #[test]
    fn test_structured_values_rejected() {
        let err = to_number(&json!([1])).unwrap_err();
        assert_eq!(
            err,
            CoercionError::UnsupportedValue {
                expected: "number",
                actual: "array"
            }
        );
        assert!(to_number(&json!({})).is_err());
        assert!(to_number(&Value::Null).is_err());
    }

    #[test]
    fn test_negative_zero_folds_to_zero() {
        assert_eq!(to_number(&json!("-0")).unwrap(), json!(0));
    }

    #[test]
    fn test_large_integers_stay_float() {
        let v = to_number(&json!("1e20")).unwrap();
        assert_eq!(v.as_f64(), Some(1e20));
        assert!(!v.is_i64());
    }
}
