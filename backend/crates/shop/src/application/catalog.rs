//! Catalog Use Case
//!
//! Reads are open to any authenticated account; writes sit behind the admin
//! gate at the router.

use std::sync::Arc;

use kernel::id::BookId;

use crate::domain::entity::book::{Book, BookDraft, BookFields};
use crate::domain::repository::BookRepository;
use crate::error::{ShopError, ShopResult};

pub struct CatalogUseCase<R>
where
    R: BookRepository,
{
    repo: Arc<R>,
}

impl<R> CatalogUseCase<R>
where
    R: BookRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ShopResult<Vec<Book>> {
        self.repo.list().await
    }

    pub async fn get(&self, book_id: BookId) -> ShopResult<Book> {
        self.repo
            .find_by_id(book_id)
            .await?
            .ok_or(ShopError::BookNotFound)
    }

    pub async fn create(&self, fields: BookFields) -> ShopResult<Book> {
        let draft = BookDraft::new(fields)?;
        let book = self.repo.create(&draft).await?;

        tracing::info!(book_id = %book.book_id, title = %book.title, "Book created");

        Ok(book)
    }

    pub async fn update(&self, book_id: BookId, fields: BookFields) -> ShopResult<Book> {
        let draft = BookDraft::new(fields)?;
        let book = self
            .repo
            .replace(book_id, &draft)
            .await?
            .ok_or(ShopError::BookNotFound)?;

        tracing::info!(book_id = %book_id, "Book updated");

        Ok(book)
    }

    pub async fn delete(&self, book_id: BookId) -> ShopResult<()> {
        if !self.repo.delete(book_id).await? {
            return Err(ShopError::BookNotFound);
        }

        tracing::info!(book_id = %book_id, "Book deleted");

        Ok(())
    }
}
