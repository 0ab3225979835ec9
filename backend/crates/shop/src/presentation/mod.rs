//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Authentication and the admin gate come
//! from the `auth` crate's middleware.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ShopAppState;
pub use router::shop_router;
