//! Book Entity

use chrono::{DateTime, Utc};
use kernel::id::BookId;

use crate::domain::value_object::catalog_text::{
    self, AUTHOR_MAX_LENGTH, DESCRIPTION_MAX_LENGTH, GENRE_MAX_LENGTH, ISBN_MAX_LENGTH,
    TITLE_MAX_LENGTH,
};
use crate::domain::value_object::{price::Price, stock::Stock};
use crate::error::ShopResult;

#[derive(Debug, Clone)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub price: Price,
    pub stock: Stock,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated book fields as received
#[derive(Debug, Clone, Default)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub price: f64,
    pub stock: i32,
    pub description: String,
}

/// Validated book contents, used for create and full replacement
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub price: Price,
    pub stock: Stock,
    pub description: String,
}

impl BookDraft {
    pub fn new(fields: BookFields) -> ShopResult<Self> {
        Ok(Self {
            title: catalog_text::required("Title", &fields.title, TITLE_MAX_LENGTH)?,
            author: catalog_text::required("Author", &fields.author, AUTHOR_MAX_LENGTH)?,
            isbn: catalog_text::optional("ISBN", &fields.isbn, ISBN_MAX_LENGTH)?,
            genre: catalog_text::optional("Genre", &fields.genre, GENRE_MAX_LENGTH)?,
            price: Price::new(fields.price)?,
            stock: Stock::new(fields.stock)?,
            description: catalog_text::optional(
                "Description",
                &fields.description,
                DESCRIPTION_MAX_LENGTH,
            )?,
        })
    }
}
