//! Formsmith Formulas
//!
//! Computes the displayed value of derived fields. A derived field names a
//! formula and an ordered list of parent fields; its value is recomputed from
//! scratch from the parents' raw values on every call.
//!
//! ## Formulas
//!
//! - **`age_from_dob`** - whole years since the date in the first parent
//! - **`full_name`** - non-empty parents joined with a space
//! - **`sum`** / **`multiply`** - numeric fold over the parents
//! - **`concat`** - non-empty parents joined with nothing
//! - anything else - a template where `{fieldId}` is replaced by that parent's value
//!
//! Derivation is one level deep: when a parent is itself derived, its raw
//! stored value is used. Failures never propagate out of [`derive_value`];
//! use [`try_derive_value`] to tell a failure apart from an empty result.

pub mod age;
pub mod derive;
pub mod error;
pub mod formula;

pub use derive::{derive_value, derive_value_at, evaluate, resolve_parents, try_derive_value, ParentValue};
pub use error::DerivationError;
pub use formula::{formula_catalog, Formula, FormulaInfo};
