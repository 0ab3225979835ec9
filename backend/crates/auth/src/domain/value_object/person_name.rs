//! Person Name Value Object
//!
//! First or last name. Optional at registration, so the empty name is valid.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum name length in Unicode code points
pub const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Trim, NFKC-normalize and validate
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().trim().nfkc().collect();

        if normalized.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be at most {} characters",
                PERSON_NAME_MAX_LENGTH
            )));
        }

        if normalized.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Name contains invalid characters".into(),
            ));
        }

        Ok(Self(normalized))
    }

    /// `None` becomes the empty name
    pub fn optional(raw: Option<&str>) -> AuthResult<Self> {
        raw.map_or_else(|| Ok(Self::default()), Self::new)
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_trimmed() {
        let name = PersonName::new("  Ada ").unwrap();
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn test_person_name_optional() {
        assert_eq!(PersonName::optional(None).unwrap().as_str(), "");
        assert_eq!(PersonName::optional(Some("Grace")).unwrap().as_str(), "Grace");
    }

    #[test]
    fn test_person_name_length() {
        assert!(PersonName::new("a".repeat(PERSON_NAME_MAX_LENGTH)).is_ok());
        assert!(PersonName::new("a".repeat(PERSON_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_person_name_control_chars() {
        assert!(matches!(
            PersonName::new("Ada\u{0000}"),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_person_name_nfkc() {
        // Fullwidth "ＡＢ" normalizes to "AB"
        assert_eq!(PersonName::new("\u{FF21}\u{FF22}").unwrap().as_str(), "AB");
    }
}
