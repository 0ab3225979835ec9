//! Cart Aggregator
//!
//! Keeps at most one entry per (account, book). Adding a book that is
//! already in the cart increases the existing quantity; the merge happens
//! inside the repository as a single atomic write.

use std::sync::Arc;

use kernel::id::{AccountId, BookId};

use crate::domain::entity::cart_entry::CartEntry;
use crate::domain::repository::CartRepository;
use crate::domain::value_object::cart_quantity::CartQuantity;
use crate::error::{ShopError, ShopResult};

pub struct CartAggregator<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
}

impl<R> CartAggregator<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The account's cart ordered by book id
    pub async fn list(&self, account_id: AccountId) -> ShopResult<Vec<CartEntry>> {
        self.repo.list(account_id).await
    }

    /// Add `quantity` units, merging with an existing entry
    pub async fn add(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: i32,
    ) -> ShopResult<CartEntry> {
        let quantity = CartQuantity::new(quantity)?;
        let entry = self.repo.add(account_id, book_id, quantity).await?;

        tracing::info!(
            account_id = %account_id,
            book_id = %book_id,
            quantity = entry.quantity.value(),
            "Cart entry added"
        );

        Ok(entry)
    }

    /// Replace the quantity of an existing entry
    pub async fn update(
        &self,
        account_id: AccountId,
        book_id: BookId,
        quantity: i32,
    ) -> ShopResult<CartEntry> {
        let quantity = CartQuantity::new(quantity)?;

        self.repo
            .set_quantity(account_id, book_id, quantity)
            .await?
            .ok_or(ShopError::CartEntryNotFound)
    }

    pub async fn remove(&self, account_id: AccountId, book_id: BookId) -> ShopResult<()> {
        if !self.repo.remove(account_id, book_id).await? {
            return Err(ShopError::CartEntryNotFound);
        }

        tracing::info!(account_id = %account_id, book_id = %book_id, "Cart entry removed");

        Ok(())
    }
}
