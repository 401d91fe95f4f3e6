//! Formsmith Validation
//!
//! Checks a single field value against the field's ordered rule list and
//! returns the messages of every violated rule, in rule order. Rules are
//! independent: one failing rule never stops the others from running.
//!
//! ```
//! use formsmith_types::{ValidationRule, Value};
//! use formsmith_validation::validate;
//!
//! let rules = [ValidationRule::required(), ValidationRule::min_length(5)];
//! let errors = validate(Some(&Value::from("abc")), &rules);
//! assert_eq!(errors, vec!["Minimum length is 5 characters".to_string()]);
//! ```
//!
//! The functions here are pure: same input, same output, no shared state.

pub mod custom;
pub mod email;
pub mod password;
pub mod string;

pub use custom::{CustomPredicate, CustomValidators};
pub use email::is_valid_email;
pub use password::is_valid_password;

use formsmith_types::{RuleKind, ValidationRule, Value};

/// Result of checking one rule against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Passed,
    /// The rule does not apply to this value (absent, non-text or empty)
    Skipped,
    Failed(String),
}

impl RuleOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RuleOutcome::Failed(_))
    }

    pub fn into_error(self) -> Option<String> {
        match self {
            RuleOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Validate a value against rules with no custom predicates registered
pub fn validate(value: Option<&Value>, rules: &[ValidationRule]) -> Vec<String> {
    validate_with(value, rules, &CustomValidators::default())
}

/// Validate a value, resolving `custom` rules through `custom`
pub fn validate_with(
    value: Option<&Value>,
    rules: &[ValidationRule],
    custom: &CustomValidators,
) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| check_rule(value, rule, custom).into_error())
        .collect()
}

/// Check a single rule.
///
/// Only `required` looks at absent values. The length and format rules run
/// on non-empty text and skip everything else.
pub fn check_rule(
    value: Option<&Value>,
    rule: &ValidationRule,
    custom: &CustomValidators,
) -> RuleOutcome {
    let value = value.filter(|v| !v.is_null());
    let text = value.and_then(Value::as_text).filter(|s| !s.is_empty());

    let passed = match &rule.kind {
        RuleKind::Required => match value {
            None => false,
            Some(Value::Text(s)) => !string::is_blank(s),
            Some(_) => true,
        },
        RuleKind::MinLength(min) => match text {
            Some(s) => string::meets_min_length(s, *min),
            None => return RuleOutcome::Skipped,
        },
        RuleKind::MaxLength(max) => match text {
            Some(s) => string::meets_max_length(s, *max),
            None => return RuleOutcome::Skipped,
        },
        RuleKind::Email => match text {
            Some(s) => is_valid_email(s),
            None => return RuleOutcome::Skipped,
        },
        RuleKind::Password => match text {
            Some(s) => is_valid_password(s),
            None => return RuleOutcome::Skipped,
        },
        RuleKind::Custom(name) => custom.passes(name.as_deref(), value),
    };

    if passed {
        RuleOutcome::Passed
    } else {
        let message = rule
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| default_message(&rule.kind));
        RuleOutcome::Failed(message)
    }
}

/// Message used when a rule has no message of its own
pub fn default_message(kind: &RuleKind) -> String {
    match kind {
        RuleKind::Required => "This field is required".to_string(),
        RuleKind::MinLength(min) => format!("Minimum length is {} characters", min),
        RuleKind::MaxLength(max) => format!("Maximum length is {} characters", max),
        RuleKind::Email => "Please enter a valid email address".to_string(),
        RuleKind::Password => {
            "Password must be at least 8 characters with letters and numbers".to_string()
        }
        RuleKind::Custom(_) => "Invalid value".to_string(),
    }
}

/// Human-readable name of a rule kind, for rule pickers
pub fn rule_label(kind: &RuleKind) -> &'static str {
    match kind {
        RuleKind::Required => "Required",
        RuleKind::MinLength(_) => "Minimum Length",
        RuleKind::MaxLength(_) => "Maximum Length",
        RuleKind::Email => "Email Format",
        RuleKind::Password => "Password Rules",
        RuleKind::Custom(_) => "Custom",
    }
}
