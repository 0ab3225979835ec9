use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Standard,
    Admin,
}

impl AccountRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AccountRole::Standard => "standard",
            AccountRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }

    /// Parse the stored code; unknown codes are a data error, not a panic
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "standard" => Some(AccountRole::Standard),
            "admin" => Some(AccountRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_role_from_code() {
        assert_eq!(AccountRole::from_code("standard"), Some(AccountRole::Standard));
        assert_eq!(AccountRole::from_code("admin"), Some(AccountRole::Admin));
        assert_eq!(AccountRole::from_code("super_admin"), None);
        assert_eq!(AccountRole::from_code("Admin"), None);
    }

    #[test]
    fn test_account_role_display() {
        assert_eq!(AccountRole::Standard.to_string(), "standard");
        assert_eq!(AccountRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_account_role_checks() {
        assert!(!AccountRole::Standard.is_admin());
        assert!(AccountRole::Admin.is_admin());
        assert_eq!(AccountRole::default(), AccountRole::Standard);
    }

    #[test]
    fn test_account_role_serde() {
        assert_eq!(
            serde_json::to_string(&AccountRole::Admin).unwrap(),
            "\"admin\""
        );
    }
}
