//! Delete Post Use Case
//!
//! Soft-deletes a post and all its comments, owner only.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::guard::authorize_owner;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Delete post use case
pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal_id: UserId, post_id: PostId) -> BlogResult<()> {
        let post = self
            .repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        authorize_owner(principal_id, post.user_id)?;

        // Post and its comments go together, in one transaction.
        self.repo.delete_post_cascade(post_id).await?;

        tracing::info!(post_id = %post_id, user_id = %principal_id, "Post deleted");
        Ok(())
    }
}
