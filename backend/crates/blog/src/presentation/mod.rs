//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::BlogAppState;
pub use middleware::{Principal, require_bearer_auth};
pub use router::{blog_router, blog_router_generic};
