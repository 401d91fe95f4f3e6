//! Registry of named predicates backing `custom` rules

use formsmith_types::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A custom check: returns `true` when the value is acceptable
pub type CustomPredicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// Named predicates looked up by `custom` rules.
///
/// A `custom` rule with no name, or a name that is not registered, always
/// passes. The empty registry therefore leaves every schema unaffected.
#[derive(Clone, Default)]
pub struct CustomValidators {
    predicates: HashMap<String, CustomPredicate>,
}

impl CustomValidators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.register(name, predicate);
        self
    }

    /// Register (or replace) a predicate
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Run the named predicate; unnamed or unknown checks pass
    pub fn passes(&self, name: Option<&str>, value: Option<&Value>) -> bool {
        name.and_then(|n| self.predicates.get(n))
            .map_or(true, |predicate| predicate(value))
    }
}

impl fmt::Debug for CustomValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CustomValidators").field("names", &names).finish()
    }
}
