//! User entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::StoredPasswordHash;

use crate::domain::value_object::{email::Email, username::Username};

/// A registered account.
///
/// `username` and `email` are unique among live (non-deleted) users. The
/// stored credential is always a hash, never the raw password. A user owns
/// its posts and comments; deleting the user cascades over everything it
/// owns.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: StoredPasswordHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; live queries must filter on this explicitly
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with server-assigned ID and timestamps.
    pub fn new(username: Username, email: Email, password_hash: StoredPasswordHash) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{CredentialHasher, RawPassword};

    #[test]
    fn test_new_user_is_live() {
        let hasher = CredentialHasher::with_defaults();
        let hash = hasher
            .hash(&RawPassword::new("correct horse battery".into()).unwrap())
            .unwrap();
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            hash,
        );
        assert!(!user.is_deleted());
        assert_eq!(user.created_at, user.updated_at);
    }
}
