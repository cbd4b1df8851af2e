//! Modal form specs and the prompt/confirm boundary
//!
//! The mutation engine never draws widgets. It hands a list of
//! [`FieldSpec`]s to an external [`FormPrompter`], gets raw text back,
//! and owns all coercion and validation itself. Deletes go through a
//! [`Confirmer`] the same way.

use crate::coerce::edit_text;
use crate::error::Result;
use crate::paths::flatten;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One input field of an ad-hoc form: name, label, optional default text.
/// Purely a view-model, never persisted by the engine; serializable so
/// out-of-process form collaborators can receive it over a wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub default: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            label: label.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Ordered field name → raw text answers returned by a form.
#[derive(Debug, Clone, Default)]
pub struct FormAnswers {
    entries: Vec<(String, String)>,
}

impl FormAnswers {
    pub fn new() -> Self {
        FormAnswers::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.push((name.into(), text.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t.as_str())
    }

    /// Text for `name`, or the empty string when the field was left blank.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }
}

impl FromIterator<(String, String)> for FormAnswers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FormAnswers {
            entries: iter.into_iter().collect(),
        }
    }
}

/// External collaborator that captures text for a form.
///
/// Returning `None` means the user cancelled; the pending mutation is
/// discarded with zero side effects.
pub trait FormPrompter {
    fn prompt(&mut self, title: &str, fields: &[FieldSpec]) -> Option<FormAnswers>;
}

/// External yes/no collaborator consulted before any delete.
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Build a form spec from a nested template object.
///
/// The template is flattened into dotted-path fields with the existing
/// leaf values as defaults, so filling the form and unflattening the
/// answers yields a new object of the same shape.
pub fn template_fields(template: &Value) -> Result<Vec<FieldSpec>> {
    Ok(flatten(template)?
        .into_iter()
        .map(|(path, value)| {
            FieldSpec::new(path.clone(), path).with_default(edit_text(&value))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_fields_flattens_with_defaults() {
        let template = json!({"name": "a", "dims": {"w": 3, "h": 4}});
        let fields = template_fields(&template).unwrap();
        assert_eq!(
            fields,
            vec![
                FieldSpec::new("name", "name").with_default("a"),
                FieldSpec::new("dims.w", "dims.w").with_default("3"),
                FieldSpec::new("dims.h", "dims.h").with_default("4"),
            ]
        );
    }

    #[test]
    fn test_field_spec_serializes_for_external_forms() {
        let field = FieldSpec::new("id", "id").with_default("1");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "id", "label": "id", "default": "1"})
        );
        let back: FieldSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_answers_lookup() {
        let mut answers = FormAnswers::new();
        answers.insert("key", "value");
        assert_eq!(answers.get("key"), Some("value"));
        assert_eq!(answers.text("missing"), "");
    }
}
