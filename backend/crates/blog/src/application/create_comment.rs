//! Create Comment Use Case

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Maximum comment length
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Create comment input
pub struct CreateCommentInput {
    pub content: String,
}

/// Create comment output: the persisted entity, so callers observe the
/// server-assigned ID and timestamps.
#[derive(Debug)]
pub struct CreateCommentOutput {
    pub comment: Comment,
}

/// Create comment use case
pub struct CreateCommentUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCommentUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Comment on a post. The post must exist and be live; commenting on a
    /// missing or deleted post fails with `PostNotFound` and writes nothing.
    pub async fn execute(
        &self,
        principal_id: UserId,
        post_id: PostId,
        input: CreateCommentInput,
    ) -> BlogResult<CreateCommentOutput> {
        let content = validate_comment(input.content)?;

        self.repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let comment = Comment::new(post_id, principal_id, content);
        self.repo.create_comment(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            user_id = %principal_id,
            "Comment created"
        );

        Ok(CreateCommentOutput { comment })
    }
}

fn validate_comment(raw: String) -> BlogResult<String> {
    let content = raw.trim().to_string();
    if content.is_empty() {
        return Err(BlogError::Validation("Comment cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(BlogError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(content)
}
