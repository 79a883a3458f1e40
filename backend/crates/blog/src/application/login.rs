//! Login Use Case
//!
//! Authenticates a user and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::{CredentialHasher, RawPassword};
use platform::token::TokenService;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::username::Username;
use crate::error::{BlogError, BlogResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Token expiry instant
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
    pub username: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<CredentialHasher>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<CredentialHasher>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    /// Authenticate at the given instant.
    ///
    /// Unknown username and wrong password both return `InvalidCredentials`;
    /// the response never reveals which check failed.
    pub async fn execute(&self, input: LoginInput, now: DateTime<Utc>) -> BlogResult<LoginOutput> {
        let username =
            Username::new(input.username).map_err(|_| BlogError::InvalidCredentials)?;

        let user = self
            .repo
            .find_user_by_username(&username)
            .await?
            .ok_or(BlogError::InvalidCredentials)?;

        let password = RawPassword::from_login(input.password);
        if !self.hasher.verify(&password, &user.password_hash) {
            return Err(BlogError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(user.user_id.into_uuid(), user.username.original(), now)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            token: issued.token,
            expires_at: issued.expires_at,
            user_id: user.user_id.to_string(),
            username: user.username.original().to_string(),
        })
    }
}
