//! Username value object
//!
//! Usernames are unique across live users. The original spelling is kept for
//! display; uniqueness checks run against a lowercase canonical form so
//! "Alice" and "alice" cannot coexist.

use std::fmt;

use thiserror::Error;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username must be at least {MIN_USERNAME_LENGTH} characters")]
    TooShort,

    #[error("Username must be at most {MAX_USERNAME_LENGTH} characters")]
    TooLong,

    #[error("Username may only contain letters, digits, '.', '_' and '-'")]
    InvalidCharacter,

    #[error("Username must start with a letter or digit")]
    InvalidStart,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let original = raw.into().trim().to_string();

        if original.is_empty() {
            return Err(UsernameError::Empty);
        }

        let char_count = original.chars().count();
        if char_count < MIN_USERNAME_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if char_count > MAX_USERNAME_LENGTH {
            return Err(UsernameError::TooLong);
        }

        let mut chars = original.chars();
        let first = chars.next().expect("non-empty checked above");
        if !first.is_alphanumeric() {
            return Err(UsernameError::InvalidStart);
        }
        if !original
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(UsernameError::InvalidCharacter);
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rehydrate from a stored value without re-validation.
    pub fn from_db(stored: impl Into<String>) -> Self {
        let original = stored.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// Original spelling, for display.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form, for uniqueness checks.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("alice.b-w_99").is_ok());
        assert!(Username::new("  padded  ").is_ok()); // trimmed
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Username::new(""), Err(UsernameError::Empty));
        assert_eq!(Username::new("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(Username::new("ab"), Err(UsernameError::TooShort));
        assert_eq!(
            Username::new("a".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(UsernameError::TooLong)
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            Username::new("alice smith"),
            Err(UsernameError::InvalidCharacter)
        );
        assert_eq!(Username::new("_alice"), Err(UsernameError::InvalidStart));
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = Username::new("Alice").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }
}
