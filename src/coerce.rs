//! Free-text to JSON value coercion
//!
//! Every value a user types into the editor arrives as a raw string and
//! goes through [`coerce`] before it is attached to the document. The
//! function is total: anything that fails every typed interpretation is
//! kept verbatim as a string.

use serde_json::{Number, Value};

/// Convert a raw text string into a typed JSON value.
///
/// Interpretations are tried in strict priority order:
///
/// 1. case-insensitive `true` / `false` become booleans;
/// 2. trimmed non-empty text that parses as a finite number becomes a
///    number, unless it starts with `0x` (hex-looking input must survive
///    as a string rather than mis-parse);
/// 3. a generic JSON parse handles quoted strings, object/array literals
///    and explicit `null`;
/// 4. everything else is returned unchanged as a string.
///
/// The ordering is load-bearing: numeric-looking text must not fall
/// through to the raw-string branch, and the boolean tokens are matched
/// before the JSON parse so `TRUE` and `False` coerce too.
pub fn coerce(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() && !trimmed.starts_with("0x") {
        if let Some(n) = parse_number(trimmed) {
            return Value::Number(n);
        }
    }

    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => Value::String(text.to_string()),
    }
}

/// Render a value the way an input box would show it for editing.
///
/// Strings appear bare (no quotes); everything else uses its JSON text.
/// This is the inverse of [`coerce`] up to the documented ambiguity: a
/// string that spells a boolean or numeric literal comes back typed.
pub fn edit_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a numeric token, keeping integers exact where possible.
///
/// Rejects non-finite results: JSON numbers cannot hold NaN or infinity,
/// so `inf` and `NaN` fall through to the string branch of [`coerce`].
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(Number::from(u));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Number::from_f64(f),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_tokens_case_insensitive() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("FALSE"), json!(false));
        assert_eq!(coerce("True"), json!(true));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("-7"), json!(-7));
        assert_eq!(coerce("3.5"), json!(3.5));
        assert_eq!(coerce(" 42 "), json!(42));
        assert_eq!(coerce("1e3"), json!(1000.0));
    }

    #[test]
    fn test_hex_prefix_stays_string() {
        assert_eq!(coerce("0x1A"), json!("0x1A"));
        assert_eq!(coerce("0xdeadbeef"), json!("0xdeadbeef"));
    }

    #[test]
    fn test_non_finite_stays_string() {
        assert_eq!(coerce("inf"), json!("inf"));
        assert_eq!(coerce("NaN"), json!("NaN"));
    }

    #[test]
    fn test_json_literals() {
        assert_eq!(coerce("[1,2]"), json!([1, 2]));
        assert_eq!(coerce("{\"a\": 1}"), json!({"a": 1}));
        assert_eq!(coerce("null"), Value::Null);
        assert_eq!(coerce("\"quoted\""), json!("quoted"));
    }

    #[test]
    fn test_string_fallback() {
        assert_eq!(coerce("hello"), json!("hello"));
        assert_eq!(coerce(""), json!(""));
        assert_eq!(coerce("{not json"), json!("{not json"));
    }

    #[test]
    fn test_edit_text() {
        assert_eq!(edit_text(&json!("hello")), "hello");
        assert_eq!(edit_text(&json!(42)), "42");
        assert_eq!(edit_text(&json!(true)), "true");
        assert_eq!(edit_text(&Value::Null), "null");
        assert_eq!(edit_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_integers_stay_exact() {
        let v = coerce("9007199254740993");
        assert_eq!(v.as_i64(), Some(9007199254740993));
    }
}
