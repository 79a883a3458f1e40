//! Comment entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

/// A comment on a post.
///
/// Belongs to exactly one post and records its author; both references are
/// immutable after creation. A comment cannot be created against a post that
/// does not exist (or is soft-deleted).
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    /// Author; immutable after creation
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; live queries must filter on this explicitly
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a new comment with server-assigned ID and timestamps.
    pub fn new(post_id: PostId, user_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            comment_id: CommentId::new(),
            post_id,
            user_id,
            content,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
