/// Configuration management for the authenticated items app
///
/// # Environment Variables
///
/// - `WEB_HOST`: Host to bind to (default: 0.0.0.0)
/// - `WEB_PORT`: Port to bind to (default: 5001)
/// - `DATABASE_URL`: SQLite URL (default: sqlite://items_auth.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `SESSION_TTL_HOURS`: Lifetime of an ordinary login (default: 24)
/// - `REMEMBER_ME_DAYS`: Lifetime of a "remember me" login (default: 30)
/// - `COOKIE_SECURE`: Mark cookies `Secure` and send HSTS (default: false)
/// - `RUST_LOG`: Log filter (default: itemlist_web=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines

use itemlist_shared::db::pool;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub database: DatabaseConfig,
}

/// HTTP server and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,

    /// Ordinary session lifetime, in hours
    pub session_ttl_hours: i64,

    /// Remembered session lifetime, in days
    pub remember_me_days: i64,

    /// Set when served over HTTPS
    pub cookie_secure: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Pool settings for this database
    pub fn pool_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            ..Default::default()
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to something unparsable or a
    /// session lifetime is rejected by [`Config::validate`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            web: WebConfig {
                host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("WEB_PORT", 5001)?,
                session_ttl_hours: parse_var("SESSION_TTL_HOURS", 24)?,
                remember_me_days: parse_var("REMEMBER_ME_DAYS", 30)?,
                cookie_secure: parse_var("COOKIE_SECURE", false)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://items_auth.db".to_string()),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that both session lifetimes are positive and fit in seconds
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.web.session_ttl_hours <= 0 || self.web.remember_me_days <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS and REMEMBER_ME_DAYS must be positive");
        }
        if self.web.session_ttl_hours.checked_mul(3600).is_none() {
            anyhow::bail!("SESSION_TTL_HOURS is too large");
        }
        if self
            .web
            .remember_me_days
            .checked_mul(24 * 3600)
            .is_none()
        {
            anyhow::bail!("REMEMBER_ME_DAYS is too large");
        }
        Ok(())
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }

    /// Session lifetime in seconds
    pub fn session_ttl_seconds(&self, remember: bool) -> i64 {
        if remember {
            self.web.remember_me_days.saturating_mul(24 * 3600)
        } else {
            self.web.session_ttl_hours.saturating_mul(3600)
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid: {}", name, e)),
        Err(_) => Ok(default),
    }
}
