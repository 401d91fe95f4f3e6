// File: formsmith-formulas/src/error.rs
// Purpose: Why a derived value could not be computed

use thiserror::Error;

/// A derivation that failed, as opposed to one that is legitimately empty.
///
/// Callers of [`crate::derive_value`] never see this: failures are logged and
/// shown as "no value".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("`{value}` is not a recognizable date")]
    InvalidDate { value: String },
}
