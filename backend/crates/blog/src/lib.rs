//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account registration and login with username + password
//! - Stateless HS256 bearer tokens for authenticated requests
//! - Posts and comments with author-only mutation
//! - Soft deletes with transactional cascades
//! - Paginated public listing with keyword search
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per hash
//! - Tokens carry identity only; authorization is checked per request
//!   against current ownership in the store
//! - Login failures never reveal whether the username or password was wrong

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
