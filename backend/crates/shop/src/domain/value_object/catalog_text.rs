//! Catalog Text Fields
//!
//! Trimmed free text with a per-field length limit.

use crate::error::{ShopError, ShopResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const AUTHOR_MAX_LENGTH: usize = 200;
pub const ISBN_MAX_LENGTH: usize = 32;
pub const GENRE_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 5000;

/// Trim and validate a field that must not be empty
pub fn required(field: &str, raw: &str, max: usize) -> ShopResult<String> {
    let value = optional(field, raw, max)?;
    if value.is_empty() {
        return Err(ShopError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Trim and validate a field that may be empty
pub fn optional(field: &str, raw: &str, max: usize) -> ShopResult<String> {
    let value = raw.trim();

    if value.chars().count() > max {
        return Err(ShopError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }

    // Newlines are allowed in descriptions
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\t')
    {
        return Err(ShopError::Validation(format!(
            "{field} contains invalid characters"
        )));
    }

    Ok(value.to_string())
}
