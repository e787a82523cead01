//! Polars `AnyValue` utility functions.
//!
//! Descriptions and pass-through cells arrive with whatever dtype the
//! reader inferred; everything downstream works on their textual form.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, and formats numeric types without
/// unnecessary trailing zeros (so an `ID` column read as float does not
/// come back as `1414.0`).
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tagger_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(1414)), "1414");
/// assert_eq!(any_to_string(AnyValue::String("Ventilador de teto")), "Ventilador de teto");
/// ```
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
        AnyValue::Boolean(b) => if b { "true" } else { "false" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use tagger_common::format_numeric;
///
/// assert_eq!(format_numeric(1414.0), "1414");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_empty() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn integers_and_floats() {
        assert_eq!(any_to_string(AnyValue::Int64(2525)), "2525");
        assert_eq!(any_to_string(AnyValue::Float64(1414.0)), "1414");
        assert_eq!(any_to_string(AnyValue::Float64(12.5)), "12.5");
    }

    #[test]
    fn strings_pass_through() {
        assert_eq!(
            any_to_string(AnyValue::String("Luminária LED 220v branca")),
            "Luminária LED 220v branca"
        );
    }

    #[test]
    fn booleans() {
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn numeric_formatting_trims_zeros() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
    }
}
