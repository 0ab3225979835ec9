//! Application Layer
//!
//! Use cases and application services.

pub mod access;
pub mod account_status;
pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod login;
pub mod profile;
pub mod register;
pub mod token;

// Re-exports
pub use account_status::AccountStatusUseCase;
pub use admin::AdminUseCase;
pub use bootstrap::{BootstrapOutcome, bootstrap_admin};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::{ProfileUseCase, UpdateProfileInput};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{Identity, TokenIssuer, TokenValidator};
