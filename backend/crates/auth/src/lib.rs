//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Account registration and login with email + password
//! - Stateless HS256 identity tokens (bearer header or `jwt` cookie)
//! - Role-based access (Standard, Admin) enforced by a single gate layer
//! - Self-or-admin access to profile, status and deletion
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking thread pool
//! - Emails unique after lower-casing (store-level constraint)
//! - Tokens are not revocable; logout only clears the cookie

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::Identity;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
#[cfg(any(test, feature = "test-util"))]
pub use infra::memory::MemoryAccountRepository;
pub use presentation::{AuthAppState, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
