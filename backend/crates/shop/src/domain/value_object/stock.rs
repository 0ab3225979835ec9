//! Stock Value Object
//!
//! Units on hand. Carts do not reserve stock.

use serde::Serialize;

use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Stock(i32);

impl Stock {
    pub fn new(value: i32) -> ShopResult<Self> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(ShopError::Validation("Quantity must not be negative".into()))
        }
    }

    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
