//! Password validation functions

/// Symbols accepted in a password besides letters and digits
pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '#', '?', '&'];

pub const PASSWORD_MIN_LENGTH: usize = 8;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c)
}

/// Validates a password: 8+ characters, at least one letter and one digit,
/// drawn only from letters, digits and `@$!%*#?&`.
///
/// Functional composition: every check must hold.
pub fn is_valid_password(password: &str) -> bool {
    let checks = [
        password.chars().count() >= PASSWORD_MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_alphabetic()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().all(is_allowed_char),
    ];

    checks.iter().all(|&ok| ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_letters_and_digits() {
        assert!(is_valid_password("abcdefg1"));
        assert!(is_valid_password("Password123"));
        assert!(is_valid_password("s3cure@Pass!"));
        assert!(is_valid_password("12345678a"));
    }

    #[test]
    fn test_rejects_weak_passwords() {
        assert!(!is_valid_password("short1a"));
        assert!(!is_valid_password("onlyletters"));
        assert!(!is_valid_password("1234567890"));
    }

    #[test]
    fn test_rejects_characters_outside_allowed_set() {
        assert!(!is_valid_password("pass word1"));
        assert!(!is_valid_password("password1-"));
        assert!(!is_valid_password("pässword1"));
    }
}
