//! Account Password Value Objects
//!
//! Domain wrappers over `platform::password`. Hashing and verification run on
//! the blocking thread pool so Argon2 never stalls request dispatch.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn demo() -> auth::AuthResult<()> {
//! use auth::domain::value_object::account_password::{AccountPassword, RawPassword};
//! use platform::password::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = AccountPassword::hash(&hasher, RawPassword::new("p".to_string())?).await?;
//! assert!(digest.verify(&hasher, RawPassword::new("p".to_string())?).await?);
//! # Ok(())
//! # }
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate (non-empty, at most 128 characters, no control characters)
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

/// Stored password digest (Argon2id PHC string)
///
/// The string is not parsed on load; a corrupt digest fails at verification
/// as an internal error, never as a wrong password.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(String);

impl AccountPassword {
    /// Hash a raw password on the blocking pool
    pub async fn hash(hasher: &PasswordHasher, raw: RawPassword) -> AuthResult<Self> {
        let hasher = hasher.clone();

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&raw.0))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Verify a raw password on the blocking pool
    ///
    /// `Ok(false)` means mismatch.
    pub async fn verify(&self, hasher: &PasswordHasher, raw: RawPassword) -> AuthResult<bool> {
        let hashed = HashedPassword::from_phc_string(self.0.as_str())?;
        let hasher = hasher.clone();

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&hashed, &raw.0))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verify task failed: {e}")))??;

        Ok(matches)
    }

    /// Create from database value
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(phc_string.into())
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
