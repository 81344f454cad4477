//! Polars `AnyValue` utility functions.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to its `String` representation.
///
/// Returns an empty string for `Null` and formats floats without a spurious
/// trailing `.0`, so integer-valued cells survive the untyped loading stage
/// unchanged (`2016.0` becomes `"2016"`).
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number without trailing zeros after the decimal
/// point. Integer-valued floats like `40.0` come out as `"40"`.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a string as `f64`, returning `None` for empty or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as `i64`, returning `None` for empty or invalid input.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_to_string_null_is_empty() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn any_to_string_trims_float_zero() {
        assert_eq!(any_to_string(AnyValue::Float64(2016.0)), "2016");
        assert_eq!(any_to_string(AnyValue::Float64(10.5)), "10.5");
    }

    #[test]
    fn format_numeric_keeps_integer_zeros() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn parse_helpers_reject_blank() {
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_i64(""), None);
        assert_eq!(parse_f64("10.5"), Some(10.5));
        assert_eq!(parse_i64(" -1 "), Some(-1));
    }
}
