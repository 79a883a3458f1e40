//! Create Post Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

/// Maximum post title length
pub const MAX_TITLE_LENGTH: usize = 200;

/// Create post input
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

/// Create post output: the persisted entity, so callers observe the
/// server-assigned ID and timestamps.
pub struct CreatePostOutput {
    pub post: Post,
}

/// Create post use case
pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a post owned by the authenticated principal. Any authenticated
    /// user may create; the caller becomes the owner.
    pub async fn execute(
        &self,
        principal_id: UserId,
        input: CreatePostInput,
    ) -> BlogResult<CreatePostOutput> {
        let title = validate_title(input.title)?;
        let content = validate_content(input.content)?;

        let post = Post::new(principal_id, title, content);
        self.repo.create_post(&post).await?;

        tracing::info!(post_id = %post.post_id, user_id = %principal_id, "Post created");

        Ok(CreatePostOutput { post })
    }
}

pub(crate) fn validate_title(raw: String) -> BlogResult<String> {
    let title = raw.trim().to_string();
    if title.is_empty() {
        return Err(BlogError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BlogError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title)
}

pub(crate) fn validate_content(raw: String) -> BlogResult<String> {
    if raw.trim().is_empty() {
        return Err(BlogError::Validation("Content cannot be empty".to_string()));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(validate_title("  Hello  ".into()).is_ok());
        assert!(matches!(
            validate_title("   ".into()),
            Err(BlogError::Validation(_))
        ));
        assert!(matches!(
            validate_title("x".repeat(MAX_TITLE_LENGTH + 1)),
            Err(BlogError::Validation(_))
        ));
    }

    #[test]
    fn test_content_validation() {
        assert!(validate_content("body".into()).is_ok());
        assert!(matches!(
            validate_content("".into()),
            Err(BlogError::Validation(_))
        ));
    }
}
