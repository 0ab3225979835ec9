//! Repository Traits
//!
//! Implementations must keep the (account, book) uniqueness of cart entries
//! and reviews atomic; callers never check-then-act across two calls.

use kernel::id::{AccountId, BookId};

use crate::domain::entity::{
    book::{Book, BookDraft},
    cart_entry::CartEntry,
    review::{NewReview, Review},
};
use crate::domain::value_object::cart_quantity::CartQuantity;
use crate::error::ShopResult;

/// Book catalog
#[trait_variant::make(BookRepository: Send)]
pub trait LocalBookRepository {
    /// All books ordered by id
    async fn list(&self) -> ShopResult<Vec<Book>>;

    async fn find_by_id(&self, book_id: BookId) -> ShopResult<Option<Book>>;

    async fn create(&self, draft: &BookDraft) -> ShopResult<Book>;

    /// Replace every field; `None` if the book does not exist
    async fn replace(&self, book_id: BookId, draft: &BookDraft) -> ShopResult<Option<Book>>;

    /// Also removes the book's cart entries and reviews
    async fn delete(&self, book_id: BookId) -> ShopResult<bool>;
}

/// Per-account cart
#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Entries of one account ordered by book id
    async fn list(&self, account_id: AccountId) -> ShopResult<Vec<CartEntry>>;

    /// Insert, or add to the existing quantity, in one atomic step
    ///
    /// Fails with `BookNotFound` when the book does not exist and with
    /// `Validation` when the merged quantity leaves the allowed range.
    async fn add(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<CartEntry>;

    /// Overwrite the quantity; `None` if there is no entry
    async fn set_quantity(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<Option<CartEntry>>;

    /// `false` if there was no entry
    async fn remove(&self, account_id: AccountId, book_id: BookId) -> ShopResult<bool>;
}

/// Book reviews
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Checks, in order: account exists, book exists, no review for the pair
    async fn create(&self, review: &NewReview) -> ShopResult<Review>;

    /// Reviews of one book ordered by id
    async fn list_for_book(&self, book_id: BookId) -> ShopResult<Vec<Review>>;
}
