//! Price Value Object

use serde::Serialize;

use crate::error::{ShopError, ShopResult};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Finite and non-negative
    pub fn new(value: f64) -> ShopResult<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(ShopError::Validation(
                "Price must be a non-negative number".into(),
            ))
        }
    }

    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
