// File: formsmith-types/src/data.rs
// Purpose: Raw user-entered values for one fill-out session

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping of field id to the raw value the user entered.
///
/// Values are stored before derivation is applied. A stored `Value::Null`
/// counts as "not entered".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, Value>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entered value for a field, ignoring stored nulls
    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.0.get(field_id).filter(|v| !v.is_null())
    }

    /// Whether a non-null value was entered for the field
    pub fn contains(&self, field_id: &str) -> bool {
        self.get(field_id).is_some()
    }

    /// Store a value, returning the previous one
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field_id.into(), value.into())
    }

    pub fn remove(&mut self, field_id: &str) -> Option<Value> {
        self.0.remove(field_id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
