//! Tree-versus-table view selection
//!
//! Pure decision policy, no rendering. A node whose children share a
//! wide uniform schema is presented as a table; everything else becomes
//! a property grid with primitives inline and containers as nested
//! sub-trees, one level deeper per recursion.

use crate::schema::{infer_schema, FieldDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Presentation knobs for the selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Minimum schema width (exclusive) before a node is shown as a
    /// table. A heuristic, not a correctness constraint.
    pub table_threshold: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig { table_threshold: 3 }
    }
}

/// How a node should be presented. Borrows are transient: they must not
/// be held across a mutation, since indices and keys may shift.
#[derive(Debug, PartialEq)]
pub enum NodeView<'a> {
    /// Uniform rows rendered as a table. `keys` carries the node's own
    /// key sequence when the node is an object, so rows can be labelled
    /// by original key rather than position.
    Table {
        descriptor: FieldDescriptor,
        keys: Option<Vec<String>>,
    },
    /// Immediate children split into inline primitives and nested
    /// containers; render each nested entry by selecting again at
    /// `level + 1`.
    PropertyGrid {
        primitives: Vec<(String, &'a Value)>,
        nested: Vec<(String, &'a Value)>,
    },
    /// The node itself is a primitive.
    Leaf(&'a Value),
}

/// Decide how to present `node`.
pub fn select_view<'a>(node: &'a Value, config: &ViewConfig) -> NodeView<'a> {
    if let Some(descriptor) = infer_schema(node) {
        if descriptor.len() > config.table_threshold {
            let keys = match node {
                Value::Object(obj) => Some(obj.keys().cloned().collect()),
                _ => None,
            };
            return NodeView::Table { descriptor, keys };
        }
    }

    let mut primitives = Vec::new();
    let mut nested = Vec::new();
    let mut split = |key: String, child: &'a Value| match child {
        Value::Object(_) | Value::Array(_) => nested.push((key, child)),
        _ => primitives.push((key, child)),
    };

    match node {
        Value::Object(obj) => {
            for (key, child) in obj {
                split(key.clone(), child);
            }
        }
        Value::Array(arr) => {
            for (index, child) in arr.iter().enumerate() {
                split(index.to_string(), child);
            }
        }
        other => return NodeView::Leaf(other),
    }

    NodeView::PropertyGrid { primitives, nested }
}

/// Whether a node at this nesting level may carry a delete affordance.
/// Level 0 is the document root and is never deletable.
pub fn deletable(level: usize) -> bool {
    level > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_narrow_schema_stays_property_grid() {
        let node = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
        let view = select_view(&node, &ViewConfig::default());
        assert!(matches!(view, NodeView::PropertyGrid { .. }));
    }

    #[test]
    fn test_wide_schema_becomes_table() {
        let node = json!([
            {"id": 1, "name": "a", "age": 30, "city": "Oslo"},
            {"id": 2, "name": "b", "age": 25, "city": "Bergen"}
        ]);
        match select_view(&node, &ViewConfig::default()) {
            NodeView::Table { descriptor, keys } => {
                assert_eq!(descriptor, vec!["id", "name", "age", "city"]);
                assert_eq!(keys, None);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_object_table_carries_row_keys() {
        let node = json!({
            "alice": {"id": 1, "age": 30, "city": "Oslo", "active": true},
            "bob": {"id": 2, "age": 25, "city": "Bergen", "active": false}
        });
        match select_view(&node, &ViewConfig::default()) {
            NodeView::Table { keys, .. } => {
                assert_eq!(keys, Some(vec!["alice".to_string(), "bob".to_string()]));
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_threshold_is_configurable() {
        let node = json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]);
        let config = ViewConfig { table_threshold: 1 };
        assert!(matches!(
            select_view(&node, &config),
            NodeView::Table { .. }
        ));
    }

    #[test]
    fn test_property_grid_partitions_children() {
        let node = json!({"count": 1, "name": "x", "meta": {"a": 1}, "tags": [1]});
        match select_view(&node, &ViewConfig::default()) {
            NodeView::PropertyGrid { primitives, nested } => {
                let prim_keys: Vec<&str> =
                    primitives.iter().map(|(k, _)| k.as_str()).collect();
                let nested_keys: Vec<&str> =
                    nested.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(prim_keys, vec!["count", "name"]);
                assert_eq!(nested_keys, vec!["meta", "tags"]);
            }
            other => panic!("expected property grid, got {:?}", other),
        }
    }

    #[test]
    fn test_array_children_keyed_by_index() {
        let node = json!([true, {"a": 1}]);
        match select_view(&node, &ViewConfig::default()) {
            NodeView::PropertyGrid { primitives, nested } => {
                assert_eq!(primitives[0].0, "0");
                assert_eq!(nested[0].0, "1");
            }
            other => panic!("expected property grid, got {:?}", other),
        }
    }

    #[test]
    fn test_primitive_node_is_leaf() {
        let node = json!(42);
        assert_eq!(
            select_view(&node, &ViewConfig::default()),
            NodeView::Leaf(&node)
        );
    }

    #[test]
    fn test_view_config_from_json() {
        let config: ViewConfig =
            serde_json::from_value(json!({"table_threshold": 5})).unwrap();
        assert_eq!(config.table_threshold, 5);
    }

    #[test]
    fn test_root_is_not_deletable() {
        assert!(!deletable(0));
        assert!(deletable(1));
    }
}
