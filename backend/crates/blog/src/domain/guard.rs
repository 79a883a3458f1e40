//! Ownership Guard
//!
//! The single authorization rule of the backend: only a resource's recorded
//! owner may mutate or delete it. Pure and synchronous; the caller supplies
//! both IDs.
//!
//! Creation is covered by authentication alone (any authenticated user may
//! create a post or comment; the creator becomes the owner), so this guard
//! is only consulted on update and delete paths.

use kernel::id::UserId;

use crate::error::{BlogError, BlogResult};

/// Allow only when the acting principal is the recorded owner.
pub fn authorize_owner(principal_id: UserId, resource_owner_id: UserId) -> BlogResult<()> {
    if principal_id == resource_owner_id {
        Ok(())
    } else {
        Err(BlogError::NotResourceOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_owner_is_allowed() {
        let owner: UserId = Id::new();
        assert!(authorize_owner(owner, owner).is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let owner: UserId = Id::new();
        let other: UserId = Id::new();
        assert!(matches!(
            authorize_owner(other, owner),
            Err(BlogError::NotResourceOwner)
        ));
    }
}
