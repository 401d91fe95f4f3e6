//! # formsmith
//!
//! Form schemas with live validation and derived fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use formsmith::{FieldType, FormField, FormSchema, FormSession, ValidationRule};
//!
//! let schema = FormSchema::new("Signup")?
//!     .with_field(FormField::new("first", FieldType::Text, "First name").required())
//!     .with_field(FormField::new("last", FieldType::Text, "Last name").with_order(1))
//!     .with_field(
//!         FormField::new("full", FieldType::Text, "Full name")
//!             .derived("full_name", ["first", "last"])
//!             .with_rule(ValidationRule::max_length(40))
//!             .with_order(2),
//!     );
//!
//! let mut session = FormSession::open(schema);
//! session.set_value("first", "Ada")?;
//! session.set_value("last", "Lovelace")?;
//!
//! let report = session.evaluate();
//! assert!(report.is_valid());
//! assert_eq!(report.value_of("full").map(ToString::to_string).as_deref(), Some("Ada Lovelace"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! This crate wraps three component crates and adds the stateful layer:
//!
//! - **`formsmith-types`** - Values, fields, rules, schemas and field editing
//! - **`formsmith-validation`** - Rule checking (`validate`, custom predicates)
//! - **`formsmith-formulas`** - Derived values (`derive_value`, formula catalog)
//!
//! On top of those it provides [`FormSession`] (one fill-out of a schema),
//! [`evaluate_form`] / [`FormReport`] (derive then validate every field),
//! [`SchemaStore`] (saved schemas in a JSON file) and [`Config`].

pub mod config;
pub mod report;
pub mod session;
pub mod store;

pub use formsmith_formulas as formulas;
pub use formsmith_types as types;
pub use formsmith_validation as validation;

pub use config::Config;
pub use formsmith_formulas::{derive_value, derive_value_at, formula_catalog, DerivationError, Formula, FormulaInfo};
pub use formsmith_types::{
    new_field_id, FieldPatch, FieldType, FormData, FormField, FormSchema, RuleKind, SchemaError, SchemaIssue,
    SchemaName, ValidationRule, Value,
};
pub use formsmith_validation::{validate, validate_with, CustomValidators};
pub use report::{evaluate_form, Evaluator, FieldReport, FormReport};
pub use session::{FormSession, SessionError};
pub use store::{SchemaStore, StoreError};
