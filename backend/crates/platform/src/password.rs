//! Password Hashing and Verification
//!
//! Credential handling for the blog backend:
//! - Argon2id hashing (memory-hard, salted per call)
//! - Zeroization of raw password material
//! - Verification that never panics on malformed stored hashes
//! - Optional pepper as an application-wide secret layer
//!
//! The stored representation is a single PHC string (algorithm identifier,
//! parameters, salt, digest). The raw password and a separate salt column are
//! never persisted.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in Unicode code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Default Argon2id time cost (iterations)
pub const DEFAULT_TIME_COST: u32 = 2;

/// Argon2id memory cost in KiB (OWASP recommendation: 19 MiB)
const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Argon2id lane count
const PARALLELISM: u32 = 1;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty or contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Cost factor outside the range Argon2 accepts
    #[error("Invalid password hash cost factor: {0}")]
    InvalidCost(u32),
}

// ============================================================================
// Raw Password (Zeroized on drop)
// ============================================================================

/// Raw password with automatic memory zeroization.
///
/// Securely erased from memory on drop. Does not implement `Clone`, and the
/// Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RawPassword(String);

impl RawPassword {
    /// Create a raw password with policy validation.
    ///
    /// Unicode is normalized with NFKC before validation; lengths are counted
    /// in code points, not bytes.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space and tab are legal, other control characters are not
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Create without validation (login path: the stored hash decides).
    ///
    /// Registration must go through [`RawPassword::new`]; at login the
    /// submitted secret is compared against the stored hash as-is.
    pub fn from_login(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Credential Hasher
// ============================================================================

/// Argon2id hasher with a configurable time cost and optional pepper.
///
/// Constructed once at startup from resolved configuration and passed into
/// the services that need it; no ambient state.
#[derive(Clone)]
pub struct CredentialHasher {
    time_cost: u32,
    pepper: Option<Vec<u8>>,
}

impl CredentialHasher {
    pub fn new(time_cost: u32, pepper: Option<Vec<u8>>) -> Self {
        Self { time_cost, pepper }
    }

    /// Hasher with the default cost and no pepper.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TIME_COST, None)
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(MEMORY_COST_KIB, self.time_cost, PARALLELISM, None)
            .map_err(|_| PasswordHashError::InvalidCost(self.time_cost))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn keyed_bytes(&self, password: &RawPassword) -> Vec<u8> {
        match &self.pepper {
            Some(p) => {
                let mut combined = password.as_bytes().to_vec();
                combined.extend_from_slice(p);
                combined
            }
            None => password.as_bytes().to_vec(),
        }
    }

    /// Hash a password.
    ///
    /// A fresh random salt is generated per call, so two hashes of the same
    /// password differ while both still verify.
    pub fn hash(&self, password: &RawPassword) -> Result<StoredPasswordHash, PasswordHashError> {
        let password_bytes = self.keyed_bytes(password);
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2()?
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(StoredPasswordHash {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` on mismatch and on malformed stored hashes; never
    /// errors. Argon2 compares digests in constant time internally.
    pub fn verify(&self, password: &RawPassword, stored: &StoredPasswordHash) -> bool {
        let parsed_hash = match PasswordHash::new(&stored.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let password_bytes = self.keyed_bytes(password);

        Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }
}

// ============================================================================
// Stored Password Hash
// ============================================================================

/// Password hash in PHC string format, safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPasswordHash {
    hash: String,
}

impl StoredPasswordHash {
    /// Create from a PHC string loaded from the database.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Rehydrate without parsing.
    ///
    /// For rows already in the store; a corrupt value simply fails
    /// verification later instead of erroring here.
    pub fn from_db(hash: String) -> Self {
        Self { hash }
    }

    /// The PHC string for storage.
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for StoredPasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPasswordHash")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_empty() {
        let result = RawPassword::new("".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = RawPassword::new("        ".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
    }

    #[test]
    fn test_password_too_short() {
        let result = RawPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = RawPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_control_characters() {
        let result = RawPassword::new("pass\u{0007}word!".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_unicode_password() {
        let result = RawPassword::new("パスワード安全です!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::with_defaults();
        let password = RawPassword::new("correct horse battery".to_string()).unwrap();
        let stored = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, &stored));

        let wrong = RawPassword::from_login("wrong horse battery".to_string());
        assert!(!hasher.verify(&wrong, &stored));
    }

    #[test]
    fn test_hash_is_salted() {
        // Same input, different encoded hashes; both verify.
        let hasher = CredentialHasher::with_defaults();
        let password = RawPassword::new("correct horse battery".to_string()).unwrap();

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(hasher.verify(&password, &first));
        assert!(hasher.verify(&password, &second));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = CredentialHasher::new(DEFAULT_TIME_COST, Some(b"app_pepper".to_vec()));
        let plain = CredentialHasher::with_defaults();
        let password = RawPassword::new("correct horse battery".to_string()).unwrap();

        let stored = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&password, &stored));
        assert!(!plain.verify(&password, &stored));
    }

    #[test]
    fn test_malformed_stored_hash_fails_verification() {
        let hasher = CredentialHasher::with_defaults();
        let password = RawPassword::from_login("whatever secret".to_string());
        let corrupt = StoredPasswordHash::from_db("not_a_phc_string".to_string());

        assert!(!hasher.verify(&password, &corrupt));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = CredentialHasher::with_defaults();
        let password = RawPassword::new("correct horse battery".to_string()).unwrap();
        let stored = hasher.hash(&password).unwrap();

        let restored = StoredPasswordHash::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(hasher.verify(&password, &restored));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(StoredPasswordHash::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = RawPassword::from_login("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
