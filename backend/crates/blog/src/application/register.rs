//! Register Use Case
//!
//! Creates a new account with a hashed credential.

use std::sync::Arc;

use platform::password::{CredentialHasher, RawPassword};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{BlogError, BlogResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: String,
    pub username: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    hasher: Arc<CredentialHasher>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    pub async fn execute(&self, input: RegisterInput) -> BlogResult<RegisterOutput> {
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        // Pre-checks give clean errors; the partial unique indexes still
        // catch racing inserts and surface as Conflict.
        if self.repo.exists_by_username(&username).await? {
            return Err(BlogError::UsernameTaken);
        }
        if self.repo.exists_by_email(&email).await? {
            return Err(BlogError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .map_err(|e| BlogError::Internal(e.to_string()))?;

        let user = User::new(username, email, password_hash);
        self.repo.create_user(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id.to_string(),
            username: user.username.original().to_string(),
        })
    }
}
