//! Email value object
//!
//! Minimal structural validation; deliverability is not this layer's
//! problem. Uniqueness checks run against the lowercase canonical form.

use std::fmt;

use thiserror::Error;

/// Maximum email length
pub const MAX_EMAIL_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,

    #[error("Email address is malformed")]
    Malformed,
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    original: String,
    canonical: String,
}

impl Email {
    /// Validate and construct an email address.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailError> {
        let original = raw.into().trim().to_string();

        if original.is_empty() {
            return Err(EmailError::Empty);
        }
        if original.chars().count() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        // local@domain with a dotted, non-edge domain
        let (local, domain) = original.split_once('@').ok_or(EmailError::Malformed)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || original.chars().any(char::is_whitespace)
        {
            return Err(EmailError::Malformed);
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

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
