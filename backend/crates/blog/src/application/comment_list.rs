//! Comment List Use Case
//!
//! Public, paginated listing of a post's comments, oldest first.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentRepository, Page, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Comment list input: raw request values, normalized here.
pub struct CommentListInput {
    pub page_num: i64,
    pub page_size: i64,
}

/// Comment list output
pub struct CommentListOutput {
    pub comments: Vec<Comment>,
    pub total: i64,
    pub page: Page,
}

/// Comment list use case
pub struct CommentListUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> CommentListUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        post_id: PostId,
        input: CommentListInput,
    ) -> BlogResult<CommentListOutput> {
        // Listing comments on a missing post is a 404, not an empty page.
        self.repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let page = Page::normalized(input.page_num, input.page_size);
        let (comments, total) = self.repo.list_comments_by_post(post_id, &page).await?;

        Ok(CommentListOutput {
            comments,
            total,
            page,
        })
    }
}
