//! Dotted-path flattening and unflattening
//!
//! Bulk-add forms are built by flattening a nested template object into
//! `a.b.c` leaf entries, and the filled-in form is folded back into a
//! value with [`unflatten`]. Container type at each intermediate level is
//! inferred from the shape of the next path segment.

use crate::coerce::coerce;
use crate::error::{EditError, Result};
use serde_json::{Map, Value};

/// Maximum nesting depth accepted by [`flatten`] and [`unflatten`].
///
/// The original form generator recursed without bound; a template deeper
/// than this is rejected instead.
pub const MAX_PATH_DEPTH: usize = 32;

/// Flatten a nested object into ordered `(dotted path, leaf value)` pairs.
///
/// Plain objects are descended into; arrays and primitives are leaves.
/// Entry order follows key order, depth first. A key that itself
/// contains a `'.'` would be indistinguishable from a path separator on
/// the way back and is rejected with [`EditError::DottedKey`].
pub fn flatten(value: &Value) -> Result<Vec<(String, Value)>> {
    let mut entries = Vec::new();
    flatten_into(value, String::new(), 0, &mut entries)?;
    Ok(entries)
}

fn flatten_into(
    value: &Value,
    prefix: String,
    depth: usize,
    entries: &mut Vec<(String, Value)>,
) -> Result<()> {
    if depth > MAX_PATH_DEPTH {
        return Err(EditError::DepthExceeded(MAX_PATH_DEPTH));
    }

    match value {
        Value::Object(obj) => {
            for (key, child) in obj {
                if key.contains('.') {
                    return Err(EditError::DottedKey(key.clone()));
                }
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                match child {
                    Value::Object(_) => flatten_into(child, path, depth + 1, entries)?,
                    _ => entries.push((path, child.clone())),
                }
            }
        }
        _ => entries.push((prefix, value.clone())),
    }

    Ok(())
}

/// Rebuild a value from `(dotted path, raw text)` entries.
///
/// Each path is split on `'.'` and walked from an object root, creating
/// intermediate containers as needed: an intermediate is created as an
/// array when the segment after it parses as an integer, otherwise as an
/// object. Leaf text goes through the value coercer before assignment.
///
/// A path that addresses an existing array with a non-numeric segment is
/// rejected with [`EditError::MixedAddressing`]; paths deeper than
/// [`MAX_PATH_DEPTH`] are rejected with [`EditError::DepthExceeded`].
pub fn unflatten<'a, I>(entries: I) -> Result<Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut root = Value::Object(Map::new());

    for (path, text) in entries {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.len() > MAX_PATH_DEPTH {
            return Err(EditError::DepthExceeded(MAX_PATH_DEPTH));
        }

        let mut cursor = &mut root;
        for (i, segment) in segments.iter().enumerate() {
            if i + 1 == segments.len() {
                assign_leaf(cursor, segment, coerce(text), path)?;
            } else {
                let next_is_index = is_index_segment(segments[i + 1]);
                cursor = descend(cursor, segment, next_is_index, path)?;
            }
        }
    }

    Ok(root)
}

/// Walk one segment into `container`, creating the child if missing.
fn descend<'v>(
    container: &'v mut Value,
    segment: &str,
    next_is_index: bool,
    path: &str,
) -> Result<&'v mut Value> {
    let empty = if next_is_index {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    };

    match container {
        Value::Object(obj) => {
            let slot = obj.entry(segment.to_string()).or_insert(empty);
            // A scalar already written at this path prefix gets replaced;
            // mismatched container kinds mean mixed addressing.
            match slot {
                Value::Object(_) if !next_is_index => Ok(slot),
                Value::Array(_) if next_is_index => Ok(slot),
                Value::Object(_) | Value::Array(_) => {
                    Err(EditError::MixedAddressing(path.to_string()))
                }
                _ => {
                    *slot = if next_is_index {
                        Value::Array(Vec::new())
                    } else {
                        Value::Object(Map::new())
                    };
                    Ok(slot)
                }
            }
        }
        Value::Array(arr) => {
            let index = parse_index(segment)
                .ok_or_else(|| EditError::MixedAddressing(path.to_string()))?;
            if index >= arr.len() {
                arr.resize(index + 1, Value::Null);
            }
            let slot = &mut arr[index];
            match slot {
                Value::Object(_) if !next_is_index => Ok(slot),
                Value::Array(_) if next_is_index => Ok(slot),
                Value::Object(_) | Value::Array(_) => {
                    Err(EditError::MixedAddressing(path.to_string()))
                }
                _ => {
                    *slot = empty;
                    Ok(slot)
                }
            }
        }
        _ => Err(EditError::MixedAddressing(path.to_string())),
    }
}

fn assign_leaf(container: &mut Value, segment: &str, value: Value, path: &str) -> Result<()> {
    match container {
        Value::Object(obj) => {
            obj.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let index = parse_index(segment)
                .ok_or_else(|| EditError::MixedAddressing(path.to_string()))?;
            if index >= arr.len() {
                arr.resize(index + 1, Value::Null);
            }
            arr[index] = value;
            Ok(())
        }
        _ => Err(EditError::MixedAddressing(path.to_string())),
    }
}

fn is_index_segment(segment: &str) -> bool {
    parse_index(segment).is_some()
}

fn parse_index(segment: &str) -> Option<usize> {
    segment.parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::edit_text;
    use serde_json::json;

    fn round_trip(value: &Value) -> Result<Value> {
        let entries = flatten(value)?;
        let texts: Vec<(String, String)> = entries
            .iter()
            .map(|(path, v)| (path.clone(), edit_text(v)))
            .collect();
        unflatten(texts.iter().map(|(p, t)| (p.as_str(), t.as_str())))
    }

    #[test]
    fn test_flatten_nested_object() {
        let value = json!({"a": {"b": {"c": 1}}, "d": "x"});
        let entries = flatten(&value).unwrap();
        assert_eq!(
            entries,
            vec![
                ("a.b.c".to_string(), json!(1)),
                ("d".to_string(), json!("x")),
            ]
        );
    }

    #[test]
    fn test_arrays_are_leaves() {
        let value = json!({"tags": [1, 2], "name": "x"});
        let entries = flatten(&value).unwrap();
        assert_eq!(entries[0], ("tags".to_string(), json!([1, 2])));
    }

    #[test]
    fn test_unflatten_object_paths() {
        let entries = [("a.b", "1"), ("a.c", "true"), ("d", "hello")];
        let value = unflatten(entries.iter().copied()).unwrap();
        assert_eq!(value, json!({"a": {"b": 1, "c": true}, "d": "hello"}));
    }

    #[test]
    fn test_unflatten_array_from_numeric_segments() {
        let entries = [("items.0", "1"), ("items.1", "2")];
        let value = unflatten(entries.iter().copied()).unwrap();
        assert_eq!(value, json!({"items": [1, 2]}));
    }

    #[test]
    fn test_unflatten_gap_padded_with_null() {
        let entries = [("items.2", "9")];
        let value = unflatten(entries.iter().copied()).unwrap();
        assert_eq!(value, json!({"items": [null, null, 9]}));
    }

    #[test]
    fn test_mixed_addressing_rejected() {
        let entries = [("a.0", "1"), ("a.b", "2")];
        let err = unflatten(entries.iter().copied()).unwrap_err();
        assert!(matches!(err, EditError::MixedAddressing(_)));
    }

    #[test]
    fn test_depth_bound() {
        let deep: String = vec!["k"; MAX_PATH_DEPTH + 1].join(".");
        let entries = [(deep.as_str(), "1")];
        let err = unflatten(entries.iter().copied()).unwrap_err();
        assert!(matches!(err, EditError::DepthExceeded(_)));
    }

    #[test]
    fn test_dotted_key_rejected() {
        // Would otherwise rebuild as {"a": {"b": 1}} and corrupt the shape.
        let err = flatten(&json!({"a.b": 1})).unwrap_err();
        assert!(matches!(err, EditError::DottedKey(_)));

        let err = flatten(&json!({"outer": {"x.y": 2}})).unwrap_err();
        assert!(matches!(err, EditError::DottedKey(_)));
    }

    #[test]
    fn test_round_trip_uniform_addressing() {
        let value = json!({
            "name": "widget",
            "dims": {"w": 3, "h": 4.5},
            "meta": {"active": true, "note": "plain text"}
        });
        assert_eq!(round_trip(&value).unwrap(), value);
    }

    #[test]
    fn test_round_trip_deeply_nested() {
        let value = json!({"a": {"b": {"c": {"d": {"e": 1}}}}});
        assert_eq!(round_trip(&value).unwrap(), value);
    }
}
