//! Identity Token Issuing and Validation
//!
//! Stateless: no store access, the signature and `expires_at` are the only
//! checks.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::AccountId;
use platform::token::IdentityClaims;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, inserted into request extensions by the middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
}

/// Mints tokens `{account_id, issued_at, expires_at = issued_at + 24h}`
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, account_id: AccountId) -> AuthResult<String> {
        self.issue_at(account_id, Utc::now().timestamp())
    }

    /// Same as [`issue`](Self::issue) with an explicit clock (Unix seconds)
    pub fn issue_at(&self, account_id: AccountId, now: i64) -> AuthResult<String> {
        let claims = IdentityClaims::new(account_id.value(), now, self.config.token_ttl_secs());
        Ok(self.config.token_keys.sign(&claims)?)
    }
}

/// Verifies signature and expiry
pub struct TokenValidator {
    config: Arc<AuthConfig>,
}

impl TokenValidator {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn validate(&self, token: &str) -> AuthResult<Identity> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Valid iff the signature checks out and `expires_at > now`
    pub fn validate_at(&self, token: &str, now: i64) -> AuthResult<Identity> {
        let claims = self.config.token_keys.verify_at(token, now)?;

        let account_id =
            AccountId::parse(claims.account_id).ok_or(AuthError::Unauthenticated)?;

        Ok(Identity { account_id })
    }
}
