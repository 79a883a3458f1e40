//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! All reads return live rows only; soft-deleted rows are invisible to every
//! method here. The `delete_cascade` methods run their deletes in a single
//! transaction so a cascade either fully applies or leaves nothing changed.

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::{comment::Comment, post::Post, user::User};
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::BlogResult;

/// Upper bound on page size; requests above it fall back to the default.
pub const MAX_PAGE_SIZE: i64 = 100;
/// Page size used when the requested one is out of range.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A normalized pagination window.
///
/// Construction clamps nonsense values instead of rejecting them, so every
/// list query sees a usable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page_num: i64,
    page_size: i64,
}

impl Page {
    /// Normalize raw request values: a non-positive page number becomes 1,
    /// and a non-positive or over-limit page size becomes the default.
    pub fn normalized(page_num: i64, page_size: i64) -> Self {
        let page_num = if page_num <= 0 { 1 } else { page_num };
        let page_size = if page_size <= 0 || page_size > MAX_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            page_num,
            page_size,
        }
    }

    pub fn page_num(&self) -> i64 {
        self.page_num
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page_num - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::normalized(1, DEFAULT_PAGE_SIZE)
    }
}

/// Partial update for a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Filter for post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Substring match against title or content, case-insensitive.
    pub keyword: Option<String>,
    /// Restrict to posts owned by this user.
    pub owner: Option<UserId>,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create_user(&self, user: &User) -> BlogResult<()>;

    /// Find a live user by ID
    async fn find_user_by_id(&self, user_id: UserId) -> BlogResult<Option<User>>;

    /// Find a live user by canonical username
    async fn find_user_by_username(&self, username: &Username) -> BlogResult<Option<User>>;

    /// Check whether a live user holds this canonical username
    async fn exists_by_username(&self, username: &Username) -> BlogResult<bool>;

    /// Check whether a live user holds this canonical email
    async fn exists_by_email(&self, email: &Email) -> BlogResult<bool>;

    /// Soft-delete a user together with everything the user owns: all of the
    /// user's posts and all of the user's comments (wherever they sit), in
    /// one transaction. Other users' comments are never part of this cascade.
    async fn delete_user_cascade(&self, user_id: UserId) -> BlogResult<()>;
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post
    async fn create_post(&self, post: &Post) -> BlogResult<()>;

    /// Find a live post by ID
    async fn find_post_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>>;

    /// Apply a partial update; errors with `PostNotFound` when no live row
    /// matches.
    async fn update_post(&self, post_id: PostId, patch: &PostPatch) -> BlogResult<()>;

    /// Soft-delete a post and all its comments in one transaction; errors
    /// with `PostNotFound` when no live row matches.
    async fn delete_post_cascade(&self, post_id: PostId) -> BlogResult<()>;

    /// List live posts matching `filter`, newest first, plus the total count
    /// of matches.
    async fn list_posts(&self, filter: &PostFilter, page: &Page) -> BlogResult<(Vec<Post>, i64)>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a new comment
    async fn create_comment(&self, comment: &Comment) -> BlogResult<()>;

    /// Find a live comment by ID
    async fn find_comment_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>>;

    /// Soft-delete a single comment; errors with `CommentNotFound` when no
    /// live row matches.
    async fn delete_comment(&self, comment_id: CommentId) -> BlogResult<()>;

    /// List live comments on a post, oldest first, plus the total count.
    async fn list_comments_by_post(
        &self,
        post_id: PostId,
        page: &Page,
    ) -> BlogResult<(Vec<Comment>, i64)>;
}

/// Full persistence surface the application layer works against.
pub trait BlogRepository: UserRepository + PostRepository + CommentRepository {}

impl<T> BlogRepository for T where T: UserRepository + PostRepository + CommentRepository {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_in_range_is_kept() {
        let page = Page::normalized(3, 25);
        assert_eq!(page.page_num(), 3);
        assert_eq!(page.page_size(), 25);
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn test_page_num_clamped_to_one() {
        assert_eq!(Page::normalized(0, 10).page_num(), 1);
        assert_eq!(Page::normalized(-7, 10).page_num(), 1);
    }

    #[test]
    fn test_page_size_out_of_range_falls_back_to_default() {
        assert_eq!(Page::normalized(1, 0).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(Page::normalized(1, -1).page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(Page::normalized(1, 101).page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_at_limit_is_kept() {
        assert_eq!(Page::normalized(1, MAX_PAGE_SIZE).page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_empty_patch() {
        assert!(PostPatch::default().is_empty());
        assert!(
            !PostPatch {
                title: Some("t".into()),
                content: None,
            }
            .is_empty()
        );
    }
}
