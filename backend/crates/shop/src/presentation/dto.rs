//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{book::Book, book::BookFields, cart_entry::CartEntry, review::Review};

// ============================================================================
// Books
// ============================================================================

/// Create / replace book request
///
/// `quantity` is the stock on hand.
#[derive(Debug, Clone, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub description: String,
}

impl From<BookRequest> for BookFields {
    fn from(req: BookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            isbn: req.isbn,
            genre: req.genre,
            price: req.price,
            stock: req.quantity,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub price: f64,
    pub quantity: i32,
    pub description: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.book_id.value(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
            price: book.price.value(),
            quantity: book.stock.value(),
            description: book.description.clone(),
        }
    }
}

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItemRequest {
    pub book_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartEntryResponse {
    pub book_id: i64,
    pub quantity: i32,
}

impl From<&CartEntry> for CartEntryResponse {
    fn from(entry: &CartEntry) -> Self {
        Self {
            book_id: entry.book_id.value(),
            quantity: entry.quantity.value(),
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AddReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub account_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.review_id.value(),
            account_id: review.account_id.value(),
            book_id: review.book_id.value(),
            rating: review.rating.value(),
            comment: review.comment.as_str().to_string(),
            created_at: review.created_at,
        }
    }
}
