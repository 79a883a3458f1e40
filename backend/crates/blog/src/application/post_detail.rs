//! Post Detail Use Case
//!
//! A single post with its author's username and the first page of comments.

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{BlogRepository, Page};
use crate::error::{BlogError, BlogResult};

/// Post detail output
#[derive(Debug)]
pub struct PostDetailOutput {
    pub post: Post,
    /// Author's display username; `None` when the account has since been
    /// deleted while the post survived.
    pub author: Option<String>,
    /// First page of comments, oldest first
    pub comments: Vec<Comment>,
    /// Total live comments on the post
    pub comment_total: i64,
}

/// Post detail use case
pub struct PostDetailUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> PostDetailUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: PostId) -> BlogResult<PostDetailOutput> {
        let post = self
            .repo
            .find_post_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        let author = self
            .repo
            .find_user_by_id(post.user_id)
            .await?
            .map(|u| u.username.original().to_string());

        let (comments, comment_total) = self
            .repo
            .list_comments_by_post(post_id, &Page::default())
            .await?;

        Ok(PostDetailOutput {
            post,
            author,
            comments,
            comment_total,
        })
    }
}
