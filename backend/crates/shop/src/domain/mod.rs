//! Domain Layer
//!
//! Entities, value objects and repository traits for the shop.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{
    book::{Book, BookDraft, BookFields},
    cart_entry::CartEntry,
    review::{NewReview, Review},
};
pub use repository::{BookRepository, CartRepository, ReviewRepository};
