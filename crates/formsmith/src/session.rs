// File: src/session.rs
// Purpose: One fill-out session of a form schema

use crate::report::{Evaluator, FormReport};
use formsmith_types::{FormData, FormField, FormSchema, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("form has no field `{0}`")]
    UnknownField(String),

    #[error("field `{0}` is derived and cannot be edited")]
    DerivedField(String),
}

/// A schema snapshot plus the raw values entered so far.
///
/// The session owns its data exclusively; evaluation reads it and never
/// writes back. Open one per fill-out and drop or [`close`](Self::close) it
/// when done.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    data: FormData,
    evaluator: Evaluator,
}

impl FormSession {
    /// Start a session with empty form data
    pub fn open(schema: FormSchema) -> Self {
        tracing::debug!(schema = %schema.id, fields = schema.fields.len(), "form session opened");
        Self {
            schema,
            data: FormData::new(),
            evaluator: Evaluator::default(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    fn field(&self, field_id: &str) -> Result<&FormField, SessionError> {
        self.schema
            .field(field_id)
            .ok_or_else(|| SessionError::UnknownField(field_id.to_string()))
    }

    /// Record user input for a field, returning the previous raw value
    pub fn set_value(&mut self, field_id: &str, value: impl Into<Value>) -> Result<Option<Value>, SessionError> {
        let field = self.field(field_id)?;
        if field.is_derived {
            return Err(SessionError::DerivedField(field_id.to_string()));
        }

        let value = value.into();
        tracing::debug!(field = field_id, value = %value, "form value changed");
        Ok(self.data.insert(field_id, value))
    }

    pub fn clear_value(&mut self, field_id: &str) -> Option<Value> {
        self.data.remove(field_id)
    }

    /// Forget every entered value
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Value shown for a field: computed for derived fields, entered otherwise
    pub fn effective_value(&self, field_id: &str) -> Result<Option<Value>, SessionError> {
        let field = self.field(field_id)?;
        Ok(self.evaluator.effective_value(field, &self.data, &self.schema.fields))
    }

    /// Validation errors for a field against its effective value
    pub fn errors(&self, field_id: &str) -> Result<Vec<String>, SessionError> {
        let field = self.field(field_id)?;
        Ok(self.evaluator.errors(field, &self.data, &self.schema.fields))
    }

    pub fn evaluate(&self) -> FormReport {
        self.evaluator.evaluate(&self.schema.fields, &self.data)
    }

    /// End the session, handing back what was entered
    pub fn close(self) -> FormData {
        tracing::debug!(schema = %self.schema.id, values = self.data.len(), "form session closed");
        self.data
    }
}
