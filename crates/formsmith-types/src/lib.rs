//! Formsmith shared types
//!
//! The data model shared by the validation engine, the derivation engine and
//! the session/store layer: scalar [`Value`]s, field declarations, validation
//! rules, schemas and the raw [`FormData`] of a fill-out session.
//!
//! Everything here serializes to the JSON shape used for saved schemas
//! (camelCase keys, rules as `{ "type", "value", "message" }`).

pub mod data;
pub mod edit;
pub mod error;
pub mod field;
pub mod rule;
pub mod schema;
pub mod value;

pub use data::FormData;
pub use edit::{new_field_id, FieldPatch};
pub use error::SchemaError;
pub use field::{FieldType, FormField};
pub use rule::{RuleKind, ValidationRule};
pub use schema::{FormSchema, SchemaIssue, SchemaName, SchemaNameError};
pub use value::Value;
