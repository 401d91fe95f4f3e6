//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// Something, `@`, something, `.`, something; no whitespace and no second `@`.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validates basic email format
///
/// Deliberately loose: it only rejects values that cannot be an address at
/// all. Deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
