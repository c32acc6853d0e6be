//! JavaScript abstract conversions: `ToString`, `ToNumber`, `ToBoolean`.
//!
//! All three are total over the operand kinds and never touch their input.

use crate::types::Operand;
use std::borrow::Cow;

/// `ToString`. Regular expressions render as their `/body/flags` literal.
pub fn to_string(value: &Operand) -> Cow<'_, str> {
    match value {
        Operand::String(s) => Cow::Borrowed(s.as_str()),
        Operand::Undefined => Cow::Borrowed("undefined"),
        Operand::Null => Cow::Borrowed("null"),
        Operand::Boolean(true) => Cow::Borrowed("true"),
        Operand::Boolean(false) => Cow::Borrowed("false"),
        Operand::Number(n) => Cow::Owned(format_number(*n)),
        Operand::Regexp(re) => Cow::Owned(re.to_string()),
    }
}

/// `ToNumber`.
pub fn to_number(value: &Operand) -> f64 {
    match value {
        Operand::Number(n) => *n,
        Operand::Null => 0.0,
        Operand::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Operand::Undefined | Operand::Regexp(_) => f64::NAN,
        Operand::String(s) => parse_number(s),
    }
}

/// `ToBoolean`.
pub fn to_boolean(value: &Operand) -> bool {
    match value {
        Operand::Boolean(b) => *b,
        Operand::Undefined | Operand::Null | Operand::Regexp(_) => false,
        Operand::String(s) => !s.is_empty(),
        Operand::Number(n) => *n != 0.0 && !n.is_nan(),
    }
}

/// Truncates to a 64-bit signed integer for the bitwise operators.
/// NaN becomes 0, out-of-range values saturate.
pub fn to_integer(value: &Operand) -> i64 {
    to_number(value) as i64
}

/// Shortest decimal that round-trips, never in exponent notation.
/// Infinities render as `+Inf` / `-Inf`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "+Inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{}", n)
    }
}

/// String-to-number conversion. Surrounding whitespace is ignored, the empty
/// string is 0, `0x` prefixes are hexadecimal and anything unparsable is NaN.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        // `from_str_radix` also takes a leading sign.
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return f64::NAN;
        }
        return u64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }
    // `str::parse` also takes "inf" and "nan", which are not numbers here.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
