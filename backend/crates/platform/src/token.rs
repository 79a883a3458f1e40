//! Session Tokens
//!
//! Stateless HS256 session tokens. A token is three base64url segments
//! (header, claims, signature) and is self-contained: validity is decided by
//! the signature and the embedded validity window alone, never by a
//! server-side lookup. There is deliberately no revocation list — a token
//! stays valid for its full lifetime even after "logout".
//!
//! The clock is passed in explicitly so issuance and verification are pure
//! functions of their inputs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The only algorithm tokens are signed and verified with. Anything else is
/// rejected outright to defeat algorithm-confusion forgeries.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing secret is empty; refusing to issue unverifiable tokens.
    /// This is a configuration error and should be fatal at startup.
    #[error("Token signing secret must not be empty")]
    EmptySecret,

    /// Signature check failed or the token is structurally malformed
    #[error("Token is invalid")]
    Invalid,

    /// Token was signed with an algorithm other than HS256
    #[error("Token signing algorithm is not allowed")]
    AlgorithmMismatch,

    /// Current time is before the token's not-before instant
    #[error("Token is not valid yet")]
    NotYetValid,

    /// Current time is past the token's expiry
    #[error("Token has expired")]
    Expired,

    /// Claims could not be serialized during issuance
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

// ============================================================================
// Claims
// ============================================================================

/// Claims embedded in a session token.
///
/// `sub` carries the user ID; `iat`/`nbf`/`exp` are Unix timestamps in
/// seconds. Produced at login, verified on every authenticated request,
/// never stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Display identity, embedded so requests need no user lookup
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// A freshly issued token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Token Service
// ============================================================================

/// Issues and verifies session tokens with a symmetric secret.
///
/// Immutable after construction; shared read-only across request workers.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// Fails with [`TokenError::EmptySecret`] when the secret is blank.
    pub fn new(secret: &str, lifetime: Duration) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        })
    }

    /// Issue a token for the given user, valid from `now` for the configured
    /// lifetime.
    pub fn issue(
        &self,
        user_id: Uuid,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.lifetime;

        let claims = SessionClaims {
            sub: user_id,
            username: username.to_owned(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token at the given instant and return its claims.
    ///
    /// Rejects: bad signatures, tokens signed with any algorithm other than
    /// HS256, tokens used before `nbf`, and tokens past `exp`. The window
    /// checks run against the caller's clock, not the library's, so the state
    /// machine (issued, valid, expired) is fully testable.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        // Signature and structure via jsonwebtoken; the validity window is
        // checked manually against the injected clock below.
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        let data = decode::<SessionClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                    TokenError::AlgorithmMismatch
                }
                _ => TokenError::Invalid,
            }
        })?;

        let claims = data.claims;
        let ts = now.timestamp();

        if ts < claims.nbf {
            return Err(TokenError::NotYetValid);
        }
        if ts > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, Duration::hours(24)).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new("", Duration::hours(1)),
            Err(TokenError::EmptySecret)
        ));
        assert!(matches!(
            TokenService::new("   ", Duration::hours(1)),
            Err(TokenError::EmptySecret)
        ));
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let svc = service("unit-test-secret");
        let user_id = Uuid::new_v4();
        let t0 = now();

        let issued = svc.issue(user_id, "alice", t0).unwrap();
        assert_eq!(issued.expires_at, t0 + Duration::hours(24));

        let claims = svc.verify(&issued.token, t0).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iat, t0.timestamp());
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_valid_across_whole_window() {
        let svc = service("unit-test-secret");
        let t0 = now();
        let issued = svc.issue(Uuid::new_v4(), "alice", t0).unwrap();

        // Valid at issuance, mid-window, and exactly at expiry
        assert!(svc.verify(&issued.token, t0).is_ok());
        assert!(svc.verify(&issued.token, t0 + Duration::hours(12)).is_ok());
        assert!(svc.verify(&issued.token, t0 + Duration::hours(24)).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service("unit-test-secret");
        let t0 = now();
        let issued = svc.issue(Uuid::new_v4(), "alice", t0).unwrap();

        let late = t0 + Duration::hours(24) + Duration::seconds(1);
        assert!(matches!(
            svc.verify(&issued.token, late),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_not_yet_valid_rejected() {
        let svc = service("unit-test-secret");
        let t0 = now();
        let issued = svc.issue(Uuid::new_v4(), "alice", t0).unwrap();

        assert!(matches!(
            svc.verify(&issued.token, t0 - Duration::seconds(10)),
            Err(TokenError::NotYetValid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = service("secret-one");
        let verifier = service("secret-two");
        let t0 = now();

        let issued = issuer.issue(Uuid::new_v4(), "alice", t0).unwrap();
        assert!(matches!(
            verifier.verify(&issued.token, t0),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service("unit-test-secret");
        let t0 = now();
        let issued = svc.issue(Uuid::new_v4(), "alice", t0).unwrap();

        // Flip a character inside the claims segment
        let mut parts: Vec<String> = issued.token.split('.').map(str::to_owned).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].bytes().collect();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert!(matches!(
            svc.verify(&tampered, t0),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_algorithm_confusion_rejected() {
        // Sign with HS384 using the same secret; verification must refuse it
        // even though the signature itself would check out.
        let secret = "unit-test-secret";
        let svc = service(secret);
        let t0 = now();

        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            username: "mallory".to_string(),
            iat: t0.timestamp(),
            nbf: t0.timestamp(),
            exp: (t0 + Duration::hours(1)).timestamp(),
        };
        let forged = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            svc.verify(&forged, t0),
            Err(TokenError::AlgorithmMismatch)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let svc = service("unit-test-secret");
        assert!(svc.verify("not-a-token", now()).is_err());
        assert!(svc.verify("", now()).is_err());
        assert!(svc.verify("a.b", now()).is_err());
    }
}
