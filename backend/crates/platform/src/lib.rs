//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Signed identity tokens (HS256 JWT)
//! - Credential extraction from cookies and the `Authorization` header
//! - Random bytes and Base64 helpers

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
