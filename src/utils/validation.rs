//! Centralized validation and helper functions.

use std::borrow::Cow;

/// Maximum number of sequences allowed in a single header or dictionary
pub const MAX_SEQUENCES: usize = 100_000;

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use align_probe::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Lowercased form of an MD5 for identity comparisons. Borrows when the
/// input has no uppercase letters.
#[must_use]
pub fn md5_key(s: &str) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Check if adding another sequence would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new sequence.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sequence_limit(count: usize) -> Option<String> {
    if count >= MAX_SEQUENCES {
        Some(format!(
            "Too many sequences: adding another would exceed maximum of {MAX_SEQUENCES}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_key() {
        assert_eq!(
            md5_key("6AEF897C3D6FF0C78AFF06AC189178DD"),
            "6aef897c3d6ff0c78aff06ac189178dd"
        );
        assert!(matches!(md5_key("abc123"), Cow::Borrowed("abc123")));
    }

    #[test]
    fn test_check_sequence_limit() {
        assert!(check_sequence_limit(0).is_none());
        assert!(check_sequence_limit(MAX_SEQUENCES - 1).is_none());
        assert!(check_sequence_limit(MAX_SEQUENCES).is_some());
    }
}
