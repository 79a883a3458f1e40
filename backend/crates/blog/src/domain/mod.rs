//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the ownership
//! guard.

pub mod entity;
pub mod guard;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{comment::Comment, post::Post, user::User};
pub use repository::{BlogRepository, CommentRepository, Page, PostRepository, UserRepository};
