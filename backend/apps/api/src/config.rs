//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::num::NonZeroU32;

use anyhow::{Context, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

/// Credentials of the admin created at startup
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Decoded `JWT_SECRET`; `None` means a random development secret
    pub jwt_secret: Option<Vec<u8>>,
    pub cookie_secure: bool,
    pub frontend_origins: Vec<String>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
                .get(),
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = get("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let jwt_secret = match get("JWT_SECRET") {
            Some(raw) => Some(
                platform::crypto::from_base64(&raw).context("JWT_SECRET must be base64")?,
            ),
            None if cfg!(debug_assertions) => None,
            None => bail!("JWT_SECRET must be set in release builds"),
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).context("COOKIE_SECURE must be true or false")?,
            None => true,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let bootstrap_admin = match (get("BOOTSTRAP_ADMIN_EMAIL"), get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => bail!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            jwt_secret,
            cookie_secure,
            frontend_origins,
            bootstrap_admin,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/books")]).unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.cookie_secure);
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_database_url_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "postgres://db/books"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8="),
            ("COOKIE_SECURE", "false"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@x.io"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "secret"),
        ])
        .unwrap();

        assert_eq!(config.max_connections, 20);
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret.as_ref().map(Vec::len), Some(32));
        assert!(!config.cookie_secure);
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.bootstrap_admin.unwrap().email, "root@x.io");
    }

    #[test]
    fn test_invalid_values() {
        let base = ("DATABASE_URL", "postgres://db/books");
        assert!(config(&[base, ("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config(&[base, ("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config(&[base, ("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[base, ("JWT_SECRET", "***")]).is_err());
        assert!(config(&[base, ("COOKIE_SECURE", "maybe")]).is_err());
        assert!(config(&[base, ("BOOTSTRAP_ADMIN_EMAIL", "root@x.io")]).is_err());
    }
}
