//! Record identifiers and numeric coercion.
//!
//! # Responsibility
//! - Name the integer identifier type used by both collections.
//! - Coerce loosely typed identifier input (numbers, numeric strings) to
//!   `RecordId`.
//!
//! # Invariants
//! - Coercion never guesses: empty, non-numeric, fractional or non-finite
//!   input yields `None`.

use serde_json::Value;

/// Integer identifier shared by users and todos.
///
/// Users and todos allocate ids independently; the alias only documents
/// that both are plain integers on the wire and on disk.
pub type RecordId = i64;

/// Records that expose an identifier to the id allocator and lookups.
pub trait Identified {
    fn id(&self) -> RecordId;
}

/// Coerces identifier text to a `RecordId`.
///
/// Accepts surrounding whitespace, a leading sign, and integral float
/// notation such as `"3.0"` or `"1e2"`.
pub fn coerce_id(raw: &str) -> Option<RecordId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<RecordId>() {
        return Some(value);
    }

    trimmed.parse::<f64>().ok().and_then(integral_float_to_id)
}

/// Coerces a JSON argument value to a `RecordId`.
///
/// Only numbers and strings are considered; booleans, null, arrays and
/// objects are rejected.
pub fn coerce_id_value(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_float_to_id)),
        Value::String(text) => coerce_id(text),
        _ => None,
    }
}

fn integral_float_to_id(value: f64) -> Option<RecordId> {
    // i64::MAX is not exactly representable; stay strictly below 2^63.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < -UPPER || value >= UPPER {
        return None;
    }
    Some(value as RecordId)
}

#[cfg(test)]
mod tests {
    use super::{coerce_id, coerce_id_value};
    use serde_json::json;

    #[test]
    fn coerce_id_accepts_integer_text() {
        assert_eq!(coerce_id("42"), Some(42));
        assert_eq!(coerce_id("  7 "), Some(7));
        assert_eq!(coerce_id("+5"), Some(5));
        assert_eq!(coerce_id("-1"), Some(-1));
    }

    #[test]
    fn coerce_id_accepts_integral_float_notation() {
        assert_eq!(coerce_id("3.0"), Some(3));
        assert_eq!(coerce_id("1e2"), Some(100));
    }

    #[test]
    fn coerce_id_rejects_non_numeric_text() {
        assert_eq!(coerce_id(""), None);
        assert_eq!(coerce_id("   "), None);
        assert_eq!(coerce_id("abc"), None);
        assert_eq!(coerce_id("1.5"), None);
        assert_eq!(coerce_id("NaN"), None);
        assert_eq!(coerce_id("inf"), None);
    }

    #[test]
    fn coerce_id_value_handles_json_shapes() {
        assert_eq!(coerce_id_value(&json!(9)), Some(9));
        assert_eq!(coerce_id_value(&json!(2.0)), Some(2));
        assert_eq!(coerce_id_value(&json!("11")), Some(11));
        assert_eq!(coerce_id_value(&json!(2.5)), None);
        assert_eq!(coerce_id_value(&json!(true)), None);
        assert_eq!(coerce_id_value(&json!(null)), None);
        assert_eq!(coerce_id_value(&json!([1])), None);
    }
}
