//! Post entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

/// A blog post.
///
/// `user_id` records the author at creation time and never changes; it is
/// the sole basis for mutation authorization. Deleting a post cascades over
/// its comments in one transaction.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    /// Owner; immutable after creation
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; live queries must filter on this explicitly
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new post owned by `user_id`, with server-assigned ID and
    /// timestamps.
    pub fn new(user_id: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            user_id,
            title,
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
