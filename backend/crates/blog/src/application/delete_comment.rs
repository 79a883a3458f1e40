//! Delete Comment Use Case
//!
//! Soft-deletes a single comment, author only.

use std::sync::Arc;

use kernel::id::{CommentId, UserId};

use crate::domain::guard::authorize_owner;
use crate::domain::repository::CommentRepository;
use crate::error::{BlogError, BlogResult};

/// Delete comment use case
pub struct DeleteCommentUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCommentUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, principal_id: UserId, comment_id: CommentId) -> BlogResult<()> {
        let comment = self
            .repo
            .find_comment_by_id(comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        authorize_owner(principal_id, comment.user_id)?;

        self.repo.delete_comment(comment_id).await?;

        tracing::info!(comment_id = %comment_id, user_id = %principal_id, "Comment deleted");
        Ok(())
    }
}
