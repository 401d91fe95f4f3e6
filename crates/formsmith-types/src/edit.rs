// File: formsmith-types/src/edit.rs
// Purpose: Field editing operations on a schema draft

use crate::error::SchemaError;
use crate::field::{FieldType, FormField};
use crate::rule::ValidationRule;
use crate::schema::FormSchema;
use crate::value::Value;

/// Fresh id for a newly added field
pub fn new_field_id() -> String {
    format!("field_{}", uuid::Uuid::new_v4().simple())
}

/// Partial update of a field. `None` leaves the attribute unchanged.
///
/// The id is fixed once a field exists and `order` is managed by
/// [`FormSchema::reorder_fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub required: Option<bool>,
    /// `Some(None)` clears the default
    pub default_value: Option<Option<Value>>,
    pub validation_rules: Option<Vec<ValidationRule>>,
    pub is_derived: Option<bool>,
    pub parent_fields: Option<Vec<String>>,
    pub formula: Option<String>,
    pub options: Option<Vec<String>>,
}

impl FieldPatch {
    fn apply(self, field: &mut FormField) {
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(default_value) = self.default_value {
            field.default_value = default_value;
        }
        if let Some(rules) = self.validation_rules {
            field.validation_rules = rules;
        }
        if let Some(is_derived) = self.is_derived {
            field.is_derived = is_derived;
        }
        if let Some(parents) = self.parent_fields {
            field.parent_fields = parents;
        }
        if let Some(formula) = self.formula {
            field.formula = formula;
        }
        if let Some(options) = self.options {
            field.options = options;
        }
    }
}

impl FormSchema {
    /// Append a field at the end of the form
    pub fn add_field(&mut self, mut field: FormField) -> Result<(), SchemaError> {
        if self.field(&field.id).is_some() {
            return Err(SchemaError::DuplicateField(field.id));
        }

        field.order = self.fields.len() as i64;
        self.fields.push(field);
        Ok(())
    }

    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> Result<(), SchemaError> {
        let field = self
            .field_mut(field_id)
            .ok_or_else(|| SchemaError::FieldNotFound(field_id.to_string()))?;
        patch.apply(field);
        Ok(())
    }

    /// Remove a field, returning it if it existed.
    ///
    /// Derived fields that listed it keep the stale id; it then resolves to
    /// no value and shows up in [`FormSchema::check`].
    pub fn delete_field(&mut self, field_id: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|f| f.id == field_id)?;
        Some(self.fields.remove(index))
    }

    /// Move the field at position `from` to position `to` and renumber
    /// every field's `order` to its new position.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Result<(), SchemaError> {
        let len = self.fields.len();
        if from >= len || to >= len {
            return Err(SchemaError::IndexOutOfRange {
                index: from.max(to),
                len,
            });
        }

        let moved = self.fields.remove(from);
        self.fields.insert(to, moved);
        for (position, field) in self.fields.iter_mut().enumerate() {
            field.order = position as i64;
        }
        Ok(())
    }
}
