//! Cart Entry Entity
//!
//! Keyed by (account, book); there is at most one entry per pair.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, BookId};

use crate::domain::value_object::cart_quantity::CartQuantity;

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub account_id: AccountId,
    pub book_id: BookId,
    pub quantity: CartQuantity,
    pub updated_at: DateTime<Utc>,
}
