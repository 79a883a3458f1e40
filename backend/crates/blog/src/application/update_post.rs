//! Update Post Use Case
//!
//! Partial update of a post's title and content, owner only.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::application::create_post::{validate_content, validate_title};
use crate::domain::entity::post::Post;
use crate::domain::guard::authorize_owner;
use crate::domain::repository::{PostPatch, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Update post input; omitted fields are left untouched.
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Update post use case
pub struct UpdatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Apply the patch and return the updated post as persisted.
    pub async fn execute(
        &self,
        principal_id: UserId,
        post_id: PostId,
        input: UpdatePostInput,
    ) -> BlogResult<Post> {
        let patch = PostPatch {
            title: input.title.map(validate_title).transpose()?,
            content: input.content.map(validate_content).transpose()?,
        };
        if patch.is_empty() {
            return Err(BlogError::Validation(
                "Update requires at least one field".to_string(),
            ));
        }

        let post = self
            .repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        authorize_owner(principal_id, post.user_id)?;

        self.repo.update_post(post_id, &patch).await?;

        let updated = self
            .repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        tracing::info!(post_id = %post_id, user_id = %principal_id, "Post updated");
        Ok(updated)
    }
}
