//! The editing session and its mutation operations
//!
//! [`EditSession`] owns the document root for the lifetime of a load and
//! is the only writer. Targets are addressed by JSON Pointer
//! (`"/items/0"`, `""` for the root) and re-resolved on every operation:
//! a mutation may shift indices or remove keys, so pointers must never be
//! cached across mutations.
//!
//! Every operation is synchronous and complete-or-noop. New values are
//! built fully before they are attached to the parent, and a cancelled
//! prompt or confirmation discards the pending mutation entirely.

use crate::coerce::coerce;
use crate::edit::forms::{template_fields, Confirmer, FieldSpec, FormPrompter};
use crate::error::{EditError, Result};
use crate::paths::unflatten;
use crate::schema::{infer_array_schema, infer_schema};
use serde_json::{Map, Value};

/// Field name under which add-field forms capture the new key.
const NEW_KEY_FIELD: &str = "__new_key__";

/// An editing session over one loaded document.
pub struct EditSession {
    root: Value,
    file_name: String,
}

impl EditSession {
    /// Start a session over an already-parsed document.
    pub fn new(root: Value) -> Self {
        EditSession {
            root,
            file_name: String::from("edited.json"),
        }
    }

    /// Parse `text` and start a session, remembering the source file name
    /// for later export.
    pub fn from_text(text: &str, file_name: Option<&str>) -> Result<Self> {
        let root = crate::load_document(text)?;
        let mut session = EditSession::new(root);
        if let Some(name) = file_name {
            session.file_name = name.to_string();
        }
        Ok(session)
    }

    /// Replace the document wholesale with newly loaded text. On a parse
    /// error the current document stays active.
    pub fn reload(&mut self, text: &str, file_name: Option<&str>) -> Result<()> {
        let root = crate::load_document(text)?;
        self.root = root;
        if let Some(name) = file_name {
            self.file_name = name.to_string();
        }
        Ok(())
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Pretty-print the current document (2-space indentation).
    pub fn export(&self) -> Result<String> {
        crate::serialize_document(&self.root)
    }

    /// Add a field to the object at `pointer`.
    ///
    /// When the object carries a uniform schema, the form asks for a new
    /// key plus one value per schema field and inserts a whole new row;
    /// otherwise it asks for a single key/value pair. A key that already
    /// exists aborts with [`EditError::DuplicateKey`] and mutates
    /// nothing. Returns `false` when the prompt was cancelled or the key
    /// was left blank.
    pub fn add_field(&mut self, pointer: &str, prompter: &mut dyn FormPrompter) -> Result<bool> {
        let target = self.resolve(pointer)?;
        if !target.is_object() {
            return Err(EditError::BadPath(pointer.to_string()));
        }

        if let Some(descriptor) = infer_schema(target) {
            let mut fields = vec![FieldSpec::new(NEW_KEY_FIELD, "Key")];
            fields.extend(descriptor.iter().map(|k| FieldSpec::new(k, k)));

            let answers = match prompter.prompt("Add New Field", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            let new_key = answers.text(NEW_KEY_FIELD).to_string();
            if new_key.is_empty() {
                return Ok(false);
            }

            let mut row = Map::new();
            for field in &descriptor {
                row.insert(field.clone(), coerce(answers.text(field)));
            }

            let obj = self.resolve_object_mut(pointer)?;
            if obj.contains_key(&new_key) {
                return Err(EditError::DuplicateKey(new_key));
            }
            obj.insert(new_key, Value::Object(row));
        } else {
            let fields = vec![
                FieldSpec::new("key", "Key"),
                FieldSpec::new("value", "Value").with_default("null"),
            ];
            let answers = match prompter.prompt("Add New Field", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            let new_key = answers.text("key").to_string();
            if new_key.is_empty() {
                return Ok(false);
            }
            let value = coerce(answers.text("value"));

            let obj = self.resolve_object_mut(pointer)?;
            if obj.contains_key(&new_key) {
                return Err(EditError::DuplicateKey(new_key));
            }
            obj.insert(new_key, value);
        }

        Ok(true)
    }

    /// Append an item to the array at `pointer`.
    ///
    /// The form shape follows the existing elements, checked in order:
    /// arrays-of-arrays ask for one value per position of the first
    /// element; a uniform schema asks for its fields and pushes a flat
    /// object; a non-uniform first object is flattened into a nested
    /// template form and the answers unflattened; anything else (empty
    /// array, primitives) asks for one raw value. Returns `false` on
    /// cancellation.
    pub fn add_item(&mut self, pointer: &str, prompter: &mut dyn FormPrompter) -> Result<bool> {
        let target = self.resolve(pointer)?;
        let items = target
            .as_array()
            .ok_or_else(|| EditError::BadPath(pointer.to_string()))?;

        let new_item = if let Some(Value::Array(template)) = items.first() {
            let fields: Vec<FieldSpec> = (0..template.len())
                .map(|i| FieldSpec::new(format!("value-{}", i), format!("Value {}", i)))
                .collect();
            let answers = match prompter.prompt("Add New Array Item", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            Value::Array(
                fields
                    .iter()
                    .map(|f| coerce(answers.text(&f.name)))
                    .collect(),
            )
        } else if let Some(descriptor) = infer_array_schema(items) {
            let fields: Vec<FieldSpec> = descriptor
                .iter()
                .map(|k| FieldSpec::new(k, k).with_default(""))
                .collect();
            let answers = match prompter.prompt("Add New Item", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            let mut row = Map::new();
            for field in &descriptor {
                row.insert(field.clone(), coerce(answers.text(field)));
            }
            Value::Object(row)
        } else if let Some(template @ Value::Object(_)) = items.first() {
            let fields = template_fields(template)?;
            let answers = match prompter.prompt("Add New Item", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            unflatten(answers.iter())?
        } else {
            let fields = vec![FieldSpec::new("value", "Value").with_default("null")];
            let answers = match prompter.prompt("Add New Item", &fields) {
                Some(answers) => answers,
                None => return Ok(false),
            };
            coerce(answers.text("value"))
        };

        let arr = self.resolve_array_mut(pointer)?;
        arr.push(new_item);
        Ok(true)
    }

    /// Replace `container[key]` with the coercion of `text`.
    ///
    /// No type check is made against the previous value; type changes
    /// are allowed silently.
    pub fn update_value(&mut self, pointer: &str, key: &str, text: &str) -> Result<()> {
        let value = coerce(text);
        match self.resolve_mut(pointer)? {
            Value::Object(obj) => {
                obj.insert(key.to_string(), value);
                Ok(())
            }
            Value::Array(arr) => {
                let index = parse_index(arr, key, pointer)?;
                arr[index] = value;
                Ok(())
            }
            _ => Err(EditError::BadPath(pointer.to_string())),
        }
    }

    /// Delete `container[key]` after external confirmation.
    ///
    /// On an array the element at numeric index `key` is removed and
    /// later indices shift down by one, invalidating any previously
    /// captured pointers into that array. Returns `false` when the
    /// delete was not confirmed.
    pub fn delete_property(
        &mut self,
        pointer: &str,
        key: &str,
        confirmer: &mut dyn Confirmer,
    ) -> Result<bool> {
        // Resolve first so a stale pointer fails before the user is asked.
        self.resolve(pointer)?;

        if !confirmer.confirm(&format!("Are you sure you want to delete '{}'?", key)) {
            return Ok(false);
        }

        match self.resolve_mut(pointer)? {
            Value::Object(obj) => {
                obj.shift_remove(key)
                    .ok_or_else(|| EditError::BadPath(format!("{}/{}", pointer, key)))?;
                Ok(true)
            }
            Value::Array(arr) => {
                let index = parse_index(arr, key, pointer)?;
                arr.remove(index);
                Ok(true)
            }
            _ => Err(EditError::BadPath(pointer.to_string())),
        }
    }

    fn resolve(&self, pointer: &str) -> Result<&Value> {
        self.root
            .pointer(pointer)
            .ok_or_else(|| EditError::BadPath(pointer.to_string()))
    }

    fn resolve_mut(&mut self, pointer: &str) -> Result<&mut Value> {
        self.root
            .pointer_mut(pointer)
            .ok_or_else(|| EditError::BadPath(pointer.to_string()))
    }

    fn resolve_object_mut(&mut self, pointer: &str) -> Result<&mut Map<String, Value>> {
        match self.resolve_mut(pointer)? {
            Value::Object(obj) => Ok(obj),
            _ => Err(EditError::BadPath(pointer.to_string())),
        }
    }

    fn resolve_array_mut(&mut self, pointer: &str) -> Result<&mut Vec<Value>> {
        match self.resolve_mut(pointer)? {
            Value::Array(arr) => Ok(arr),
            _ => Err(EditError::BadPath(pointer.to_string())),
        }
    }
}

fn parse_index(arr: &[Value], key: &str, pointer: &str) -> Result<usize> {
    let index: usize = key
        .parse()
        .map_err(|_| EditError::BadPath(format!("{}/{}", pointer, key)))?;
    if index >= arr.len() {
        return Err(EditError::BadPath(format!("{}/{}", pointer, key)));
    }
    Ok(index)
}
