// File: formsmith-types/src/field.rs
// Purpose: Field declarations that make up a form schema

use crate::data::FormData;
use crate::rule::ValidationRule;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input control type of a field.
///
/// Decides which rules and affordances make sense for the field; the
/// evaluation engines do not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Textarea => "Textarea",
            FieldType::Select => "Select",
            FieldType::Radio => "Radio",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
        }
    }

    /// Whether the field picks from a fixed list of `options`
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
        };
        f.write_str(name)
    }
}

/// One configured field of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,

    #[serde(default)]
    pub is_derived: bool,

    /// Ids of the fields a derived field reads, in formula argument order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_fields: Vec<String>,

    /// Formula name, or a `{fieldId}` template for custom formulas
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default)]
    pub order: i64,
}

impl FormField {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            default_value: None,
            validation_rules: Vec::new(),
            is_derived: false,
            parent_fields: Vec::new(),
            formula: String::new(),
            options: Vec::new(),
            order: 0,
        }
    }

    /// Mark the field required and add a `required` rule
    pub fn required(mut self) -> Self {
        self.required = true;
        self.validation_rules.push(ValidationRule::required());
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Turn the field into a derived field computed by `formula`
    pub fn derived<I, S>(mut self, formula: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.is_derived = true;
        self.formula = formula.into();
        self.parent_fields = parents.into_iter().map(Into::into).collect();
        self
    }

    /// True when the field has everything needed to compute its value
    pub fn computes_value(&self) -> bool {
        self.is_derived && !self.parent_fields.is_empty() && !self.formula.is_empty()
    }

    /// The raw value for this field: the entered value, else the default.
    pub fn raw_value<'a>(&'a self, data: &'a FormData) -> Option<&'a Value> {
        data.get(&self.id)
            .or_else(|| self.default_value.as_ref().filter(|v| !v.is_null()))
    }
}
