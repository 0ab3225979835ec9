//! Application Layer
//!
//! Use cases for the catalog, carts and reviews.

pub mod cart;
pub mod catalog;
pub mod review;

// Re-exports
pub use cart::CartAggregator;
pub use catalog::CatalogUseCase;
pub use review::{AddReviewInput, ReviewGuard};
