//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC string format)
//! - Stateless session tokens (HS256, explicit clock)

pub mod password;
pub mod token;
