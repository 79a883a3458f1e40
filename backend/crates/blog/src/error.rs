//! Blog Error Types
//!
//! This module provides blog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. The variants mirror
//! the backend's taxonomy: validation, authentication, authorization,
//! not-found, conflict, and internal/transaction failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{email::EmailError, username::UsernameError};
use platform::password::PasswordPolicyError;
use platform::token::TokenError;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Malformed or missing input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Password rejected by policy
    #[error("Password validation failed: {0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Authorization header missing or not `Bearer <token>`
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    /// Token failed verification (signature, algorithm, validity window)
    #[error("Token is invalid or expired: {0}")]
    InvalidToken(#[source] TokenError),

    /// Unknown username or wrong password; deliberately indistinct
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Authenticated, but not the resource's author
    #[error("Caller is not the resource's author")]
    NotResourceOwner,

    /// User absent or soft-deleted
    #[error("User not found")]
    UserNotFound,

    /// Post absent or soft-deleted
    #[error("Post not found")]
    PostNotFound,

    /// Comment absent or soft-deleted
    #[error("Comment not found")]
    CommentNotFound,

    /// Username already taken by a live user
    #[error("Username already exists")]
    UsernameTaken,

    /// Email already registered to a live user
    #[error("Email already exists")]
    EmailTaken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (includes cascade transactions that failed to commit;
    /// such transactions have been fully rolled back before this surfaces)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_) | BlogError::PasswordPolicy(_) => ErrorKind::BadRequest,
            BlogError::MissingToken
            | BlogError::InvalidToken(_)
            | BlogError::InvalidCredentials => ErrorKind::Unauthorized,
            BlogError::NotResourceOwner => ErrorKind::Forbidden,
            BlogError::UserNotFound | BlogError::PostNotFound | BlogError::CommentNotFound => {
                ErrorKind::NotFound
            }
            BlogError::UsernameTaken | BlogError::EmailTaken => ErrorKind::Conflict,
            BlogError::Database(e) => {
                // Unique violations surface as conflicts even when a racing
                // insert slips past the existence pre-check.
                if let sqlx::Error::Database(db_err) = e {
                    if db_err.code().as_deref() == Some("23505") {
                        return ErrorKind::Conflict;
                    }
                }
                ErrorKind::InternalServerError
            }
            BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            BlogError::InvalidToken(source) => {
                tracing::warn!(error = %source, "Rejected session token");
            }
            BlogError::NotResourceOwner => {
                tracing::warn!("Ownership check denied a mutation");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for BlogError {
    fn from(err: TokenError) -> Self {
        match err {
            // A missing secret is a deployment problem, not a bad token.
            TokenError::EmptySecret | TokenError::Encoding(_) => {
                BlogError::Internal(err.to_string())
            }
            _ => BlogError::InvalidToken(err),
        }
    }
}

impl From<UsernameError> for BlogError {
    fn from(err: UsernameError) -> Self {
        BlogError::Validation(err.to_string())
    }
}

impl From<EmailError> for BlogError {
    fn from(err: EmailError) -> Self {
        BlogError::Validation(err.to_string())
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        BlogError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            BlogError::Validation("x".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(BlogError::MissingToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(BlogError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(BlogError::NotResourceOwner.kind(), ErrorKind::Forbidden);
        assert_eq!(BlogError::PostNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BlogError::UsernameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            BlogError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_token_error_conversion() {
        let err: BlogError = TokenError::Expired.into();
        assert!(matches!(err, BlogError::InvalidToken(_)));
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err: BlogError = TokenError::EmptySecret.into();
        assert!(matches!(err, BlogError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            BlogError::NotResourceOwner.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(BlogError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::EmailTaken.status_code(), StatusCode::CONFLICT);
    }
}
