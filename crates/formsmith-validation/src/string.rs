//! String length validation functions

/// Length as the user perceives it (characters, not bytes)
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Passes when `s` has at least `min` characters
pub fn meets_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

/// Passes when `s` has at most `max` characters
pub fn meets_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// Blank means empty after trimming whitespace
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validators() {
        assert!(meets_min_length("hello", 3));
        assert!(meets_min_length("hey", 3));
        assert!(!meets_min_length("hi", 3));

        assert!(meets_max_length("hello", 10));
        assert!(!meets_max_length("verylongstring", 5));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(char_len("héllo"), 5);
        assert!(meets_max_length("日本語", 3));
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }
}
