//! Signed Identity Tokens
//!
//! HS256 JWT carrying `{account_id, issued_at, expires_at}`.
//!
//! Expiry is checked here against an explicit `now` instead of inside
//! `jsonwebtoken`, so callers control the clock.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum HMAC secret length in bytes (256 bits)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Token claims
///
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub account_id: i64,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl IdentityClaims {
    /// Claims for a token minted at `now` and living `ttl_secs` seconds
    pub fn new(account_id: i64, now: i64, ttl_secs: i64) -> Self {
        Self {
            account_id,
            issued_at: now,
            expires_at: now.saturating_add(ttl_secs),
        }
    }

    /// A token is valid strictly before its expiry instant
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token secret must be at least {min} bytes (got {actual})")]
    WeakSecret { min: usize, actual: usize },

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,
}

/// Signing and verification keys derived from one symmetric secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Registered claims are not used; expiry lives in `expires_at`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn sign(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and algorithm, then require `expires_at > now`
    pub fn verify_at(&self, token: &str, now: i64) -> Result<IdentityClaims, TokenError> {
        let claims = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
