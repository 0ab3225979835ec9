//! Review Guard
//!
//! One review per (account, book). The repository runs the existence checks
//! and the insert in one transaction; the unique constraint is authoritative.

use std::sync::Arc;

use kernel::id::{AccountId, BookId};

use crate::domain::entity::review::{NewReview, Review};
use crate::domain::repository::{BookRepository, ReviewRepository};
use crate::domain::value_object::{rating::Rating, review_comment::ReviewComment};
use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone)]
pub struct AddReviewInput {
    pub rating: i32,
    pub comment: String,
}

pub struct ReviewGuard<R>
where
    R: ReviewRepository + BookRepository,
{
    repo: Arc<R>,
}

impl<R> ReviewGuard<R>
where
    R: ReviewRepository + BookRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn add(
        &self,
        account_id: AccountId,
        book_id: BookId,
        input: AddReviewInput,
    ) -> ShopResult<Review> {
        let review = NewReview {
            account_id,
            book_id,
            rating: Rating::new(input.rating)?,
            comment: ReviewComment::new(&input.comment)?,
        };

        let review = ReviewRepository::create(self.repo.as_ref(), &review).await?;

        tracing::info!(
            review_id = %review.review_id,
            account_id = %account_id,
            book_id = %book_id,
            "Review added"
        );

        Ok(review)
    }

    /// Reviews of an existing book
    pub async fn list_for_book(&self, book_id: BookId) -> ShopResult<Vec<Review>> {
        if BookRepository::find_by_id(self.repo.as_ref(), book_id)
            .await?
            .is_none()
        {
            return Err(ShopError::BookNotFound);
        }

        self.repo.list_for_book(book_id).await
    }
}
