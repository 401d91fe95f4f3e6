// File: formsmith-types/src/error.rs
// Purpose: Errors raised while building, editing or loading schemas

use crate::schema::SchemaNameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown validation rule type `{0}`")]
    UnknownRuleType(String),

    #[error("`{rule}` rule requires a length parameter")]
    MissingParameter { rule: &'static str },

    #[error("`{rule}` rule parameter `{value}` is not a non-negative whole number")]
    InvalidParameter { rule: &'static str, value: String },

    #[error("invalid schema name: {0:?}")]
    InvalidName(SchemaNameError),

    #[error("a field with id `{0}` already exists")]
    DuplicateField(String),

    #[error("no field with id `{0}`")]
    FieldNotFound(String),

    #[error("field position {index} is out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}
