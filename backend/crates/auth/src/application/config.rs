//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::PasswordHasher;
use platform::token::{TokenError, TokenKeys};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Identity token lifetime (24 hours)
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token cookie name
    pub cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Identity token lifetime
    pub token_ttl: Duration,
    /// HS256 keys derived from the token secret
    pub token_keys: TokenKeys,
    /// Argon2id parameters, fixed for the process
    pub password_hasher: PasswordHasher,
}

impl AuthConfig {
    /// Create config from a token secret (at least 32 bytes)
    pub fn new(token_secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            cookie_name: "jwt".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            token_ttl: TOKEN_TTL,
            token_keys: TokenKeys::from_secret(token_secret)?,
            password_hasher: PasswordHasher::new(),
        })
    }

    /// Create config with a random token secret
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Result<Self, TokenError> {
        Self::new(&platform::crypto::random_bytes(32))
    }

    /// Create config for development (random secret, insecure cookie)
    pub fn development() -> Result<Self, TokenError> {
        Ok(Self {
            cookie_secure: false,
            ..Self::with_random_secret()?
        })
    }

    /// Replace the password hasher (tests use cheap parameters)
    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.password_hasher = hasher;
        self
    }

    /// Token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Cookie settings for the token cookie; Max-Age matches the token TTL
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl_secs()),
        }
    }
}
