// File: formsmith-types/src/schema.rs
// Purpose: Named form schemas and structural checks on their fields

use crate::error::SchemaError;
use crate::field::{FieldType, FormField};
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Display name of a saved schema.
///
/// Trimmed on construction; must be non-empty and at most 120 characters.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 120),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        TryFrom,
        Serialize,
        Deserialize,
    )
)]
pub struct SchemaName(String);

/// A saved form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: SchemaName,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
}

impl FormSchema {
    /// Create an empty schema with a fresh id
    pub fn new(name: &str) -> Result<Self, SchemaError> {
        let name = SchemaName::try_new(name.to_string()).map_err(SchemaError::InvalidName)?;

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            fields: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields in display/evaluation order (stable for equal `order`)
    pub fn ordered_fields(&self) -> Vec<&FormField> {
        let mut fields: Vec<&FormField> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.order);
        fields
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Number of fields of each type
    pub fn field_type_counts(&self) -> BTreeMap<FieldType, usize> {
        self.fields.iter().fold(BTreeMap::new(), |mut counts, field| {
            *counts.entry(field.field_type).or_insert(0) += 1;
            counts
        })
    }

    /// Structural problems that evaluation tolerates but tooling should flag
    pub fn check(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                issues.push(SchemaIssue::DuplicateId {
                    field: field.id.clone(),
                });
            }
        }

        for field in self.fields.iter().filter(|f| f.is_derived) {
            if !field.computes_value() {
                issues.push(SchemaIssue::IncompleteDerivation {
                    field: field.id.clone(),
                });
            }

            for parent_id in &field.parent_fields {
                if *parent_id == field.id {
                    issues.push(SchemaIssue::SelfReference {
                        field: field.id.clone(),
                    });
                    continue;
                }

                match self.field(parent_id) {
                    None => issues.push(SchemaIssue::DanglingParent {
                        field: field.id.clone(),
                        parent: parent_id.clone(),
                    }),
                    Some(parent) if parent.is_derived => issues.push(SchemaIssue::DerivedParent {
                        field: field.id.clone(),
                        parent: parent_id.clone(),
                    }),
                    Some(_) => {}
                }
            }
        }

        issues
    }
}

/// A structural problem found by [`FormSchema::check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    DuplicateId { field: String },
    /// Derived flag set without both a formula and parent fields
    IncompleteDerivation { field: String },
    SelfReference { field: String },
    DanglingParent { field: String, parent: String },
    /// Derivation is one level deep: the parent's raw value is read, not its computed one
    DerivedParent { field: String, parent: String },
}

impl SchemaIssue {
    pub fn field(&self) -> &str {
        match self {
            SchemaIssue::DuplicateId { field }
            | SchemaIssue::IncompleteDerivation { field }
            | SchemaIssue::SelfReference { field }
            | SchemaIssue::DanglingParent { field, .. }
            | SchemaIssue::DerivedParent { field, .. } => field,
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::DuplicateId { field } => write!(f, "field id `{}` is used more than once", field),
            SchemaIssue::IncompleteDerivation { field } => {
                write!(f, "derived field `{}` needs a formula and at least one parent", field)
            }
            SchemaIssue::SelfReference { field } => {
                write!(f, "derived field `{}` lists itself as a parent", field)
            }
            SchemaIssue::DanglingParent { field, parent } => {
                write!(f, "derived field `{}` references unknown field `{}`", field, parent)
            }
            SchemaIssue::DerivedParent { field, parent } => write!(
                f,
                "derived field `{}` reads derived field `{}`; only its raw value is used",
                field, parent
            ),
        }
    }
}
