//! Cart Quantity Value Object

use serde::Serialize;

use crate::error::{ShopError, ShopResult};

/// Upper bound per cart line, also after merging
pub const MAX_CART_QUANTITY: i32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CartQuantity(i32);

impl CartQuantity {
    pub fn new(value: i32) -> ShopResult<Self> {
        if (1..=MAX_CART_QUANTITY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ShopError::Validation(format!(
                "Quantity must be between 1 and {MAX_CART_QUANTITY}"
            )))
        }
    }

    /// Sum of an existing line and an added amount
    ///
    /// Exceeding the bound is a validation error, never a silent clamp.
    pub fn merge(self, added: CartQuantity) -> ShopResult<Self> {
        Self::new(self.0 + added.0)
    }

    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
