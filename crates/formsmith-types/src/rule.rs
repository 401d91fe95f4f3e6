// File: formsmith-types/src/rule.rs
// Purpose: Validation rules attached to form fields

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// The closed set of rule kinds a field can carry.
///
/// Length bounds carry their parameter so a constructed rule is always
/// well-formed. `Custom` optionally names a predicate registered with the
/// validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Password,
    Custom(Option<String>),
}

impl RuleKind {
    /// Wire name of the rule (the `type` key in stored schemas)
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength(_) => "minLength",
            RuleKind::MaxLength(_) => "maxLength",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
            RuleKind::Custom(_) => "custom",
        }
    }
}

/// A single constraint on a field's value.
///
/// Stored as `{ "type": "minLength", "value": 5, "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct ValidationRule {
    pub kind: RuleKind,
    message: Option<String>,
}

impl ValidationRule {
    pub fn new(kind: RuleKind) -> Self {
        Self { kind, message: None }
    }

    pub fn required() -> Self {
        Self::new(RuleKind::Required)
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(RuleKind::MinLength(min))
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(RuleKind::MaxLength(max))
    }

    pub fn email() -> Self {
        Self::new(RuleKind::Email)
    }

    pub fn password() -> Self {
        Self::new(RuleKind::Password)
    }

    pub fn custom(name: Option<&str>) -> Self {
        Self::new(RuleKind::Custom(name.map(str::to_string)))
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The user-supplied message, if one was set and is not blank
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Stored shape of a rule
#[derive(Serialize, Deserialize)]
struct RawRule {
    #[serde(rename = "type")]
    rule_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<RuleParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RuleParameter {
    Number(f64),
    Text(String),
}

impl RuleParameter {
    fn render(&self) -> String {
        match self {
            RuleParameter::Number(n) => n.to_string(),
            RuleParameter::Text(s) => s.clone(),
        }
    }
}

/// Length parameters may arrive as numbers or numeric text
fn length_parameter(rule: &'static str, value: Option<RuleParameter>) -> Result<usize, SchemaError> {
    let value = value.ok_or(SchemaError::MissingParameter { rule })?;

    let parsed = match &value {
        RuleParameter::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
            Some(*n as usize)
        }
        RuleParameter::Number(_) => None,
        RuleParameter::Text(s) => s.trim().parse::<usize>().ok(),
    };

    parsed.ok_or_else(|| SchemaError::InvalidParameter {
        rule,
        value: value.render(),
    })
}

impl TryFrom<RawRule> for ValidationRule {
    type Error = SchemaError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let kind = match raw.rule_type.as_str() {
            "required" => RuleKind::Required,
            "minLength" => RuleKind::MinLength(length_parameter("minLength", raw.value)?),
            "maxLength" => RuleKind::MaxLength(length_parameter("maxLength", raw.value)?),
            "email" => RuleKind::Email,
            "password" => RuleKind::Password,
            "custom" => RuleKind::Custom(raw.value.map(|v| v.render())),
            other => return Err(SchemaError::UnknownRuleType(other.to_string())),
        };

        Ok(Self {
            kind,
            message: raw.message,
        })
    }
}

impl From<ValidationRule> for RawRule {
    fn from(rule: ValidationRule) -> Self {
        let rule_type = rule.kind.type_name().to_string();
        let value = match rule.kind {
            RuleKind::MinLength(n) | RuleKind::MaxLength(n) => Some(RuleParameter::Number(n as f64)),
            RuleKind::Custom(name) => name.map(RuleParameter::Text),
            _ => None,
        };

        RawRule {
            rule_type,
            value,
            message: rule.message,
        }
    }
}
