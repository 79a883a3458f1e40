//! Post List Use Case
//!
//! Public, paginated listing with optional keyword and owner filters.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::{Page, PostFilter, PostRepository};
use crate::error::BlogResult;

/// Post list input: raw request values, normalized here.
pub struct PostListInput {
    pub page_num: i64,
    pub page_size: i64,
    pub keyword: Option<String>,
    pub owner: Option<String>,
}

/// Post list output
pub struct PostListOutput {
    pub posts: Vec<Post>,
    /// Total matches across all pages
    pub total: i64,
    /// The window actually used, after normalization
    pub page: Page,
}

/// Post list use case
pub struct PostListUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> PostListUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: PostListInput) -> BlogResult<PostListOutput> {
        let page = Page::normalized(input.page_num, input.page_size);

        // An unparseable owner ID matches nothing rather than erroring, the
        // same as an unknown owner would.
        let owner = match input.owner.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match raw.parse::<UserId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    return Ok(PostListOutput {
                        posts: Vec::new(),
                        total: 0,
                        page,
                    });
                }
            },
            _ => None,
        };

        // A blank keyword means no filter.
        let filter = PostFilter {
            keyword: input
                .keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            owner,
        };

        let (posts, total) = self.repo.list_posts(&filter, &page).await?;

        Ok(PostListOutput { posts, total, page })
    }
}
