//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use auth::Identity;
use auth::presentation::dto::MessageResponse;
use kernel::extract::{ValidJson, ValidPath};
use kernel::id::BookId;
use std::sync::Arc;

use crate::application::{AddReviewInput, CartAggregator, CatalogUseCase, ReviewGuard};
use crate::domain::repository::{BookRepository, CartRepository, ReviewRepository};
use crate::error::{ShopError, ShopResult};
use crate::presentation::dto::{
    AddCartItemRequest, AddReviewRequest, BookRequest, BookResponse, CartEntryResponse,
    ReviewResponse, UpdateCartItemRequest,
};

/// Shared state for shop handlers
pub struct ShopAppState<R>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> ShopAppState<R>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl<R> Clone for ShopAppState<R>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Books
// ============================================================================

/// GET /api/books
pub async fn list_books<R>(State(state): State<ShopAppState<R>>) -> ShopResult<Json<Vec<BookResponse>>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let books = CatalogUseCase::new(state.repo.clone()).list().await?;

    Ok(Json(books.iter().map(BookResponse::from).collect()))
}

/// GET /api/books/{id}
pub async fn get_book<R>(
    State(state): State<ShopAppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> ShopResult<Json<BookResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let book = CatalogUseCase::new(state.repo.clone())
        .get(parse_book_id(id)?)
        .await?;

    Ok(Json(BookResponse::from(&book)))
}

/// POST /api/books (admin)
pub async fn create_book<R>(
    State(state): State<ShopAppState<R>>,
    ValidJson(req): ValidJson<BookRequest>,
) -> ShopResult<Json<BookResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let book = CatalogUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;

    Ok(Json(BookResponse::from(&book)))
}

/// PUT /api/books/{id} (admin)
pub async fn update_book<R>(
    State(state): State<ShopAppState<R>>,
    ValidPath(id): ValidPath<i64>,
    ValidJson(req): ValidJson<BookRequest>,
) -> ShopResult<Json<BookResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let book = CatalogUseCase::new(state.repo.clone())
        .update(parse_book_id(id)?, req.into())
        .await?;

    Ok(Json(BookResponse::from(&book)))
}

/// DELETE /api/books/{id} (admin)
pub async fn delete_book<R>(
    State(state): State<ShopAppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> ShopResult<Json<MessageResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    CatalogUseCase::new(state.repo.clone())
        .delete(parse_book_id(id)?)
        .await?;

    Ok(Json(MessageResponse::ok("Book deleted successfully")))
}

// ============================================================================
// Cart
// ============================================================================

/// GET /api/cart
pub async fn get_cart<R>(
    State(state): State<ShopAppState<R>>,
    identity: Identity,
) -> ShopResult<Json<Vec<CartEntryResponse>>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let entries = CartAggregator::new(state.repo.clone())
        .list(identity.account_id)
        .await?;

    Ok(Json(entries.iter().map(CartEntryResponse::from).collect()))
}

/// POST /api/cart/items
pub async fn add_cart_item<R>(
    State(state): State<ShopAppState<R>>,
    identity: Identity,
    ValidJson(req): ValidJson<AddCartItemRequest>,
) -> ShopResult<Json<CartEntryResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let entry = CartAggregator::new(state.repo.clone())
        .add(identity.account_id, parse_book_id(req.book_id)?, req.quantity)
        .await?;

    Ok(Json(CartEntryResponse::from(&entry)))
}

/// PUT /api/cart/items/{book_id}
pub async fn update_cart_item<R>(
    State(state): State<ShopAppState<R>>,
    identity: Identity,
    ValidPath(book_id): ValidPath<i64>,
    ValidJson(req): ValidJson<UpdateCartItemRequest>,
) -> ShopResult<Json<CartEntryResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let entry = CartAggregator::new(state.repo.clone())
        .update(identity.account_id, parse_book_id(book_id)?, req.quantity)
        .await?;

    Ok(Json(CartEntryResponse::from(&entry)))
}

/// DELETE /api/cart/items/{book_id}
pub async fn remove_cart_item<R>(
    State(state): State<ShopAppState<R>>,
    identity: Identity,
    ValidPath(book_id): ValidPath<i64>,
) -> ShopResult<Json<MessageResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    CartAggregator::new(state.repo.clone())
        .remove(identity.account_id, parse_book_id(book_id)?)
        .await?;

    Ok(Json(MessageResponse::ok("Item removed from cart")))
}

// ============================================================================
// Reviews
// ============================================================================

/// POST /api/books/{id}/reviews
pub async fn add_review<R>(
    State(state): State<ShopAppState<R>>,
    identity: Identity,
    ValidPath(id): ValidPath<i64>,
    ValidJson(req): ValidJson<AddReviewRequest>,
) -> ShopResult<Json<ReviewResponse>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let review = ReviewGuard::new(state.repo.clone())
        .add(
            identity.account_id,
            parse_book_id(id)?,
            AddReviewInput {
                rating: req.rating,
                comment: req.comment,
            },
        )
        .await?;

    Ok(Json(ReviewResponse::from(&review)))
}

/// GET /api/books/{id}/reviews
pub async fn list_reviews<R>(
    State(state): State<ShopAppState<R>>,
    ValidPath(id): ValidPath<i64>,
) -> ShopResult<Json<Vec<ReviewResponse>>>
where
    R: BookRepository + CartRepository + ReviewRepository + Send + Sync + 'static,
{
    let reviews = ReviewGuard::new(state.repo.clone())
        .list_for_book(parse_book_id(id)?)
        .await?;

    Ok(Json(reviews.iter().map(ReviewResponse::from).collect()))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_book_id(raw: i64) -> ShopResult<BookId> {
    BookId::parse(raw).ok_or_else(|| ShopError::Validation("Invalid ID format".into()))
}
