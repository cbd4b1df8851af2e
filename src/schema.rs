//! Uniform schema inference for homogeneous collections
//!
//! Decides whether the children of a node share a single flat shape. A
//! collection with a uniform schema can be rendered and extended as a
//! table; anything else falls back to per-property rendering.

use serde_json::{Map, Value};

/// An ordered sequence of field names shared, in identical order and
/// cardinality, by every element of a collection.
pub type FieldDescriptor = Vec<String>;

/// Infer a uniform schema for a collection node.
///
/// Arrays are inferred over their elements. Objects are inferred over
/// their *values*, so an object whose values are uniform flat objects is
/// itself table-shaped (rows keep their original keys as labels).
/// Primitives and null never have a schema.
pub fn infer_schema(node: &Value) -> Option<FieldDescriptor> {
    match node {
        Value::Array(items) => infer_array_schema(items),
        Value::Object(obj) => {
            if obj.is_empty() {
                return None;
            }
            let values: Vec<&Value> = obj.values().collect();
            infer_schema_over(&values)
        }
        _ => None,
    }
}

/// Infer a uniform schema over the elements of an array.
///
/// Returns `None` unless every element is a flat object carrying exactly
/// the same key sequence (same length, same names, same order) as the
/// first element, and that sequence is non-empty.
pub fn infer_array_schema(items: &[Value]) -> Option<FieldDescriptor> {
    let refs: Vec<&Value> = items.iter().collect();
    infer_schema_over(&refs)
}

fn infer_schema_over(items: &[&Value]) -> Option<FieldDescriptor> {
    let first = flat_object(items.first()?)?;
    if first.is_empty() {
        return None;
    }

    let descriptor: Vec<&String> = first.keys().collect();
    for item in &items[1..] {
        let current = flat_object(item)?;
        if current.len() != descriptor.len() {
            return None;
        }
        if current.keys().zip(&descriptor).any(|(k, d)| k != *d) {
            return None;
        }
    }

    Some(descriptor.into_iter().cloned().collect())
}

/// A flat object is an object (not array, not primitive) none of whose
/// immediate values is itself a container.
pub fn is_flat_object(value: &Value) -> bool {
    flat_object(value).is_some()
}

fn flat_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(obj)
            if obj
                .values()
                .all(|v| !matches!(v, Value::Object(_) | Value::Array(_))) =>
        {
            Some(obj)
        }
        _ => None,
    }
}
