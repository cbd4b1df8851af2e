//! # Quench - JSON Structural Editing Engine
//!
//! The decision core of a JSON tree editor: load a document, infer
//! tabular schemas from homogeneous collections, mutate the value graph
//! in place, coerce free-text input back into typed values, and export
//! the result. Widget drawing, file pickers and clipboards are external
//! collaborators that reach the engine through the [`edit::FormPrompter`]
//! and [`edit::Confirmer`] traits.
//!
//! ## Modules
//!
//! - **coerce**: free text → typed JSON value, total and never failing
//! - **schema**: uniform flat-object schema inference for collections
//! - **paths**: dotted-path flattening/unflattening for bulk-add forms
//! - **edit**: the editing session and its mutation operations
//! - **view**: table-versus-property-grid selection policy
//!
//! ## Quick Start
//!
//! ```rust
//! use quench::edit::EditSession;
//! use quench::view::{select_view, NodeView, ViewConfig};
//!
//! # fn main() -> Result<(), quench::EditError> {
//! let mut session = EditSession::from_text(
//!     r#"{"items":[{"id":1,"name":"a"},{"id":2,"name":"b"}]}"#,
//!     Some("data.json"),
//! )?;
//!
//! // Two uniform fields is below the table threshold, so the items
//! // array renders as a property grid.
//! let view = select_view(&session.root()["items"], &ViewConfig::default());
//! assert!(matches!(view, NodeView::PropertyGrid { .. }));
//!
//! session.update_value("/items/0", "name", "renamed")?;
//! let exported = session.export()?;
//! assert!(exported.contains("renamed"));
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

pub mod coerce;
pub mod edit;
pub mod error;
pub mod paths;
pub mod schema;
pub mod view;

// Re-export commonly used types for convenience
pub use coerce::{coerce, edit_text};
pub use edit::{EditSession, FieldSpec, FormAnswers};
pub use error::EditError;
pub use paths::{flatten, unflatten};
pub use schema::{infer_array_schema, infer_schema, FieldDescriptor};
pub use view::{select_view, NodeView, ViewConfig};

/// Parse a JSON document into a value the engine can edit.
///
/// On failure the decoder message is carried in [`EditError::Parse`] and
/// no partial document is produced; callers keep whatever document was
/// previously active.
pub fn load_document(text: &str) -> Result<Value, EditError> {
    serde_json::from_str(text).map_err(|e| EditError::Parse(e.to_string()))
}

/// Pretty-print a document with 2-space indentation.
pub fn serialize_document(root: &Value) -> Result<String, EditError> {
    serde_json::to_string_pretty(root).map_err(|e| EditError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{select_view, NodeView, ViewConfig};
    use serde_json::json;

    struct Yes;

    impl edit::Confirmer for Yes {
        fn confirm(&mut self, _message: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let err = load_document("{nope").unwrap_err();
        assert!(matches!(err, EditError::Parse(_)));
    }

    #[test]
    fn test_load_preserves_key_order() {
        let root = load_document(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&String> = root.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_end_to_end_view_and_delete() {
        let mut session = EditSession::from_text(
            r#"{"items":[{"id":1,"name":"a"},{"id":2,"name":"b"}]}"#,
            None,
        )
        .unwrap();
        let config = ViewConfig::default();

        // 2 uniform fields: below the >3 threshold, property grid.
        let view = select_view(&session.root()["items"], &config);
        assert!(matches!(view, NodeView::PropertyGrid { .. }));

        // 4 uniform fields: table.
        let wide = json!([
            {"id": 1, "name": "a", "age": 1, "city": "x"},
            {"id": 2, "name": "b", "age": 2, "city": "y"}
        ]);
        assert!(matches!(select_view(&wide, &config), NodeView::Table { .. }));

        // Delete the first item, then re-infer over what remains.
        session.delete_property("/items", "0", &mut Yes).unwrap();
        let items = session.root()["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            infer_array_schema(items),
            Some(vec!["id".to_string(), "name".to_string()])
        );
    }
}
