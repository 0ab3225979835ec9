//! Review Comment Value Object

use serde::Serialize;

use crate::domain::value_object::catalog_text;
use crate::error::ShopResult;

pub const COMMENT_MAX_LENGTH: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReviewComment(String);

impl ReviewComment {
    /// Trimmed; may be empty
    pub fn new(raw: &str) -> ShopResult<Self> {
        catalog_text::optional("Comment", raw, COMMENT_MAX_LENGTH).map(Self)
    }

    pub fn from_db(comment: String) -> Self {
        Self(comment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_length() {
        assert!(ReviewComment::new("").is_ok());
        assert!(ReviewComment::new(&"a".repeat(COMMENT_MAX_LENGTH)).is_ok());
        assert!(ReviewComment::new(&"a".repeat(COMMENT_MAX_LENGTH + 1)).is_err());
    }
}
