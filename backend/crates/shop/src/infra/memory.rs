//! In-Memory Repository
//!
//! Same contract as [`PgShopRepository`](super::postgres::PgShopRepository),
//! used by tests. Account existence is answered by the auth crate's
//! in-memory store, and its deletes cascade into cart entries and reviews.
//! Every operation holds one lock, so each is atomic.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use auth::AuthError;
use auth::infra::memory::MemoryAccountRepository;
use chrono::Utc;
use kernel::id::{AccountId, BookId, ReviewId};

use crate::domain::entity::{
    book::{Book, BookDraft},
    cart_entry::CartEntry,
    review::{NewReview, Review},
};
use crate::domain::repository::{BookRepository, CartRepository, ReviewRepository};
use crate::domain::value_object::cart_quantity::CartQuantity;
use crate::error::{ShopError, ShopResult};

#[derive(Default)]
struct State {
    next_book_id: i64,
    books: BTreeMap<i64, Book>,
    cart: BTreeMap<(i64, i64), CartEntry>,
    next_review_id: i64,
    reviews: BTreeMap<i64, Review>,
}

#[derive(Clone)]
pub struct MemoryShopRepository {
    accounts: MemoryAccountRepository,
    state: Arc<Mutex<State>>,
}

impl MemoryShopRepository {
    pub fn new(accounts: MemoryAccountRepository) -> ShopResult<Self> {
        let state = Arc::new(Mutex::new(State::default()));

        let cascade = state.clone();
        accounts
            .on_delete(move |account_id| {
                let mut state = cascade
                    .lock()
                    .map_err(|_| AuthError::Internal("Shop store lock poisoned".into()))?;
                state.cart.retain(|&(account, _), _| account != account_id.value());
                state.reviews.retain(|_, review| review.account_id != account_id);
                Ok(())
            })
            .map_err(|e| ShopError::Internal(e.to_string()))?;

        Ok(Self { accounts, state })
    }

    fn lock(&self) -> ShopResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| ShopError::Internal("Shop store lock poisoned".into()))
    }

    fn account_exists(&self, account_id: AccountId) -> ShopResult<bool> {
        self.accounts
            .contains(account_id)
            .map_err(|e| ShopError::Internal(e.to_string()))
    }

    /// Insert a book under a fixed id
    pub fn seed_book(&self, book_id: i64, draft: &BookDraft) -> ShopResult<Book> {
        let mut state = self.lock()?;
        let book = Self::build_book(BookId::from_db(book_id), draft);
        state.books.insert(book_id, book.clone());
        state.next_book_id = state.next_book_id.max(book_id);
        Ok(book)
    }

    fn build_book(book_id: BookId, draft: &BookDraft) -> Book {
        let now = Utc::now();
        Book {
            book_id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            isbn: draft.isbn.clone(),
            genre: draft.genre.clone(),
            price: draft.price,
            stock: draft.stock,
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl BookRepository for MemoryShopRepository {
    async fn list(&self) -> ShopResult<Vec<Book>> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn find_by_id(&self, book_id: BookId) -> ShopResult<Option<Book>> {
        Ok(self.lock()?.books.get(&book_id.value()).cloned())
    }

    async fn create(&self, draft: &BookDraft) -> ShopResult<Book> {
        let mut state = self.lock()?;
        state.next_book_id += 1;
        let book_id = state.next_book_id;
        let book = Self::build_book(BookId::from_db(book_id), draft);
        state.books.insert(book_id, book.clone());
        Ok(book)
    }

    async fn replace(&self, book_id: BookId, draft: &BookDraft) -> ShopResult<Option<Book>> {
        let mut state = self.lock()?;
        Ok(state.books.get_mut(&book_id.value()).map(|book| {
            let created_at = book.created_at;
            *book = Book {
                created_at,
                ..Self::build_book(book_id, draft)
            };
            book.clone()
        }))
    }

    async fn delete(&self, book_id: BookId) -> ShopResult<bool> {
        let mut state = self.lock()?;
        if state.books.remove(&book_id.value()).is_none() {
            return Ok(false);
        }
        state.cart.retain(|&(_, book), _| book != book_id.value());
        state.reviews.retain(|_, review| review.book_id != book_id);
        Ok(true)
    }
}

impl CartRepository for MemoryShopRepository {
    async fn list(&self, account_id: AccountId) -> ShopResult<Vec<CartEntry>> {
        let state = self.lock()?;
        Ok(state
            .cart
            .values()
            .filter(|entry| entry.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn add(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<CartEntry> {
        let mut state = self.lock()?;

        if !state.books.contains_key(&book_id.value()) {
            return Err(ShopError::BookNotFound);
        }
        if !self.account_exists(account_id)? {
            return Err(ShopError::AccountNotFound);
        }

        let key = (account_id.value(), book_id.value());
        let quantity = match state.cart.get(&key) {
            Some(existing) => existing.quantity.merge(quantity)?,
            None => quantity,
        };

        let entry = CartEntry {
            account_id,
            book_id,
            quantity,
            updated_at: Utc::now(),
        };
        state.cart.insert(key, entry.clone());

        Ok(entry)
    }

    async fn set_quantity(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<Option<CartEntry>> {
        let mut state = self.lock()?;
        Ok(state
            .cart
            .get_mut(&(account_id.value(), book_id.value()))
            .map(|entry| {
                entry.quantity = quantity;
                entry.updated_at = Utc::now();
                entry.clone()
            }))
    }

    async fn remove(&self, account_id: AccountId, book_id: BookId) -> ShopResult<bool> {
        Ok(self
            .lock()?
            .cart
            .remove(&(account_id.value(), book_id.value()))
            .is_some())
    }
}

impl ReviewRepository for MemoryShopRepository {
    async fn create(&self, review: &NewReview) -> ShopResult<Review> {
        let mut state = self.lock()?;

        if !self.account_exists(review.account_id)? {
            return Err(ShopError::AccountNotFound);
        }
        if !state.books.contains_key(&review.book_id.value()) {
            return Err(ShopError::BookNotFound);
        }
        if state
            .reviews
            .values()
            .any(|r| r.account_id == review.account_id && r.book_id == review.book_id)
        {
            return Err(ShopError::ReviewExists);
        }

        state.next_review_id += 1;
        let review_id = state.next_review_id;
        let created = Review {
            review_id: ReviewId::from_db(review_id),
            account_id: review.account_id,
            book_id: review.book_id,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Utc::now(),
        };
        state.reviews.insert(review_id, created.clone());

        Ok(created)
    }

    async fn list_for_book(&self, book_id: BookId) -> ShopResult<Vec<Review>> {
        Ok(self
            .lock()?
            .reviews
            .values()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect())
    }
}
