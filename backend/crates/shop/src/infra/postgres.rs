//! PostgreSQL Repository Implementations
//!
//! Cart merge and review creation each run in one transaction. The book row
//! (and for reviews the account row) is read `FOR SHARE` so it cannot be
//! deleted before the dependent row is written.

use chrono::{DateTime, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::{AccountId, BookId, ReviewId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entity::{
    book::{Book, BookDraft},
    cart_entry::CartEntry,
    review::{NewReview, Review},
};
use crate::domain::repository::{BookRepository, CartRepository, ReviewRepository};
use crate::domain::value_object::{
    cart_quantity::{CartQuantity, MAX_CART_QUANTITY},
    price::Price,
    rating::Rating,
    review_comment::ReviewComment,
    stock::Stock,
};
use crate::error::{ShopError, ShopResult};

/// SQLSTATE unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE check_violation
const CHECK_VIOLATION: &str = "23514";

const BOOK_COLUMNS: &str = r#"
    id,
    title,
    author,
    isbn,
    genre,
    price,
    stock,
    description,
    created_at,
    updated_at
"#;

const CART_COLUMNS: &str = "account_id, book_id, quantity, updated_at";

const REVIEW_COLUMNS: &str = "id, account_id, book_id, rating, comment, created_at";

/// PostgreSQL-backed catalog, cart and review repository
#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map constraint violations on `cart_items` writes
fn map_cart_write_error(err: sqlx::Error) -> ShopError {
    match sqlstate(&err).as_deref() {
        Some(CHECK_VIOLATION) => ShopError::Validation(format!(
            "Quantity must be between 1 and {MAX_CART_QUANTITY}"
        )),
        // The book row is locked, so the missing parent is the account
        Some(FOREIGN_KEY_VIOLATION) => ShopError::AccountNotFound,
        _ => ShopError::Database(err),
    }
}

/// Map constraint violations on `reviews` writes
fn map_review_write_error(err: sqlx::Error) -> ShopError {
    match sqlstate(&err).as_deref() {
        Some(UNIQUE_VIOLATION) => ShopError::ReviewExists,
        Some(FOREIGN_KEY_VIOLATION) => ShopError::AccountNotFound,
        _ => ShopError::Database(err),
    }
}

/// Lock a book row against deletion for the rest of the transaction
async fn lock_book(tx: &mut Transaction<'_, Postgres>, book_id: BookId) -> ShopResult<()> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM books WHERE id = $1 FOR SHARE")
        .bind(book_id.value())
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or(ShopError::BookNotFound)
}

// ============================================================================
// Book Repository Implementation
// ============================================================================

impl BookRepository for PgShopRepository {
    async fn list(&self) -> ShopResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookRow::into_book).collect())
    }

    async fn find_by_id(&self, book_id: BookId) -> ShopResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookRow::into_book))
    }

    async fn create(&self, draft: &BookDraft) -> ShopResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            INSERT INTO books (
                title,
                author,
                isbn,
                genre,
                price,
                stock,
                description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.isbn)
        .bind(&draft.genre)
        .bind(draft.price.value())
        .bind(draft.stock.value())
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_book())
    }

    async fn replace(&self, book_id: BookId, draft: &BookDraft) -> ShopResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books SET
                title = $2,
                author = $3,
                isbn = $4,
                genre = $5,
                price = $6,
                stock = $7,
                description = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(book_id.value())
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.isbn)
        .bind(&draft.genre)
        .bind(draft.price.value())
        .bind(draft.stock.value())
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookRow::into_book))
    }

    async fn delete(&self, book_id: BookId) -> ShopResult<bool> {
        // cart_items and reviews cascade
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgShopRepository {
    async fn list(&self, account_id: AccountId) -> ShopResult<Vec<CartEntry>> {
        let rows = sqlx::query_as::<_, CartRow>(&format!(
            "SELECT {CART_COLUMNS} FROM cart_items WHERE account_id = $1 ORDER BY book_id"
        ))
        .bind(account_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartRow::into_entry).collect())
    }

    async fn add(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<CartEntry> {
        let mut tx = self.pool.begin().await?;

        lock_book(&mut tx, book_id).await?;

        // Concurrent adds serialize on the (account_id, book_id) unique index
        let row = sqlx::query_as::<_, CartRow>(&format!(
            r#"
            INSERT INTO cart_items (account_id, book_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, book_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                updated_at = now()
            RETURNING {CART_COLUMNS}
            "#
        ))
        .bind(account_id.value())
        .bind(book_id.value())
        .bind(quantity.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_cart_write_error)?;

        tx.commit().await?;

        Ok(row.into_entry())
    }

    async fn set_quantity(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: CartQuantity,
    ) -> ShopResult<Option<CartEntry>> {
        let row = sqlx::query_as::<_, CartRow>(&format!(
            r#"
            UPDATE cart_items SET quantity = $3, updated_at = now()
            WHERE account_id = $1 AND book_id = $2
            RETURNING {CART_COLUMNS}
            "#
        ))
        .bind(account_id.value())
        .bind(book_id.value())
        .bind(quantity.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_cart_write_error)?;

        Ok(row.map(CartRow::into_entry))
    }

    async fn remove(&self, account_id: AccountId, book_id: BookId) -> ShopResult<bool> {
        let deleted = sqlx::query("DELETE FROM cart_items WHERE account_id = $1 AND book_id = $2")
            .bind(account_id.value())
            .bind(book_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for PgShopRepository {
    async fn create(&self, review: &NewReview) -> ShopResult<Review> {
        let mut tx = self.pool.begin().await?;

        let account = sqlx::query_scalar::<_, i64>("SELECT id FROM accounts WHERE id = $1 FOR SHARE")
            .bind(review.account_id.value())
            .fetch_optional(&mut *tx)
            .await?;
        if account.is_none() {
            return Err(ShopError::AccountNotFound);
        }

        lock_book(&mut tx, review.book_id).await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE account_id = $1 AND book_id = $2)",
        )
        .bind(review.account_id.value())
        .bind(review.book_id.value())
        .fetch_one(&mut *tx)
        .await?;
        if exists {
            return Err(ShopError::ReviewExists);
        }

        // A concurrent insert that passed the check above hits the unique index
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            INSERT INTO reviews (account_id, book_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.account_id.value())
        .bind(review.book_id.value())
        .bind(review.rating.value())
        .bind(review.comment.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_review_write_error)?;

        tx.commit().await?;

        Ok(row.into_review())
    }

    async fn list_for_book(&self, book_id: BookId) -> ShopResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE book_id = $1 ORDER BY id"
        ))
        .bind(book_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewRow::into_review).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    isbn: String,
    genre: String,
    price: f64,
    stock: i32,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookRow {
    fn into_book(self) -> Book {
        Book {
            book_id: BookId::from_db(self.id),
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            genre: self.genre,
            price: Price::from_db(self.price),
            stock: Stock::from_db(self.stock),
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    account_id: i64,
    book_id: i64,
    quantity: i32,
    updated_at: DateTime<Utc>,
}

impl CartRow {
    fn into_entry(self) -> CartEntry {
        CartEntry {
            account_id: AccountId::from_db(self.account_id),
            book_id: BookId::from_db(self.book_id),
            quantity: CartQuantity::from_db(self.quantity),
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    account_id: i64,
    book_id: i64,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            review_id: ReviewId::from_db(self.id),
            account_id: AccountId::from_db(self.account_id),
            book_id: BookId::from_db(self.book_id),
            rating: Rating::from_db(self.rating),
            comment: ReviewComment::from_db(self.comment),
            created_at: self.created_at,
        }
    }
}
