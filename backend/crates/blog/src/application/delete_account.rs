//! Delete Account Use Case
//!
//! Soft-deletes the calling user and everything the user owns.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::{BlogError, BlogResult};

/// Delete account use case
///
/// The cascade covers what the user owns: all of the user's posts and all of
/// the user's comments, including comments on other users' posts. Comments
/// other users left on the deleted user's posts are not cascaded; they simply
/// become unreachable with their post. Runs in one transaction.
pub struct DeleteAccountUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal_id: UserId) -> BlogResult<()> {
        // The principal came from a valid token, but the account may have
        // been deleted since the token was issued.
        self.repo
            .find_user_by_id(principal_id)
            .await?
            .ok_or(BlogError::UserNotFound)?;

        self.repo.delete_user_cascade(principal_id).await?;

        tracing::info!(user_id = %principal_id, "Account deleted");
        Ok(())
    }
}
