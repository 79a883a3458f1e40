//! Application Configuration
//!
//! Configuration for the blog application layer, resolved once at startup.

use std::fmt;

use chrono::Duration;
use platform::password::{CredentialHasher, DEFAULT_TIME_COST};
use platform::token::{TokenError, TokenService};

/// Default session token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Blog application configuration
#[derive(Clone)]
pub struct BlogConfig {
    /// Symmetric secret for session token signing; must not be blank
    pub token_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Argon2id time cost for password hashing
    pub password_cost: u32,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl BlogConfig {
    /// Build the token service from this config.
    ///
    /// Fails when the secret is blank; callers should treat that as fatal at
    /// startup rather than serving unverifiable tokens.
    pub fn token_service(&self) -> Result<TokenService, TokenError> {
        TokenService::new(&self.token_secret, self.token_ttl)
    }

    /// Build the credential hasher from this config.
    pub fn credential_hasher(&self) -> CredentialHasher {
        CredentialHasher::new(self.password_cost, self.password_pepper.clone())
    }

    /// Config for development and tests: random secret, default cost, no
    /// pepper.
    pub fn development() -> Self {
        let secret = format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        Self {
            token_secret: secret,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            password_cost: DEFAULT_TIME_COST,
            password_pepper: None,
        }
    }
}

impl fmt::Debug for BlogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlogConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_cost", &self.password_cost)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_builds_services() {
        let config = BlogConfig::development();
        assert!(config.token_service().is_ok());
        let _ = config.credential_hasher();
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let config = BlogConfig {
            token_secret: "  ".to_string(),
            ..BlogConfig::development()
        };
        assert!(config.token_service().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = BlogConfig {
            token_secret: "top-secret".to_string(),
            password_pepper: Some(b"spicy".to_vec()),
            ..BlogConfig::development()
        };
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("top-secret"));
        assert!(!debug_output.contains("spicy"));
    }
}
