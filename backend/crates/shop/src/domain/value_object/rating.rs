//! Rating Value Object

use serde::Serialize;

use crate::error::{ShopError, ShopResult};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(i32);

impl Rating {
    pub fn new(value: i32) -> ShopResult<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ShopError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )))
        }
    }

    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
