//! Review Entity
//!
//! Immutable once written; at most one per (account, book).

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, BookId, ReviewId};

use crate::domain::value_object::{rating::Rating, review_comment::ReviewComment};

#[derive(Debug, Clone)]
pub struct Review {
    pub review_id: ReviewId,
    pub account_id: AccountId,
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: ReviewComment,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub account_id: AccountId,
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: ReviewComment,
}
