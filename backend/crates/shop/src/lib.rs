//! Shop Backend Module
//!
//! Catalog, per-account cart and per-book reviews.
//!
//! Same layering as the `auth` crate:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (catalog, cart aggregation, review guard)
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - At most one cart entry per (account, book); repeated adds merge quantities
//! - At most one review per (account, book)
//!
//! Both are enforced by store-level unique constraints, with transactions and
//! row locks around the checks that precede them.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{ShopError, ShopResult};
pub use infra::postgres::PgShopRepository;
pub use presentation::{ShopAppState, shop_router};
