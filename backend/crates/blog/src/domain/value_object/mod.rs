//! Value Objects
//!
//! Validated domain primitives.

pub mod email;
pub mod username;
