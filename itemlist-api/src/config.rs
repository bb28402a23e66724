/// Configuration management for the public items API
///
/// Configuration is read from environment variables (and a `.env` file when
/// present) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `DATABASE_URL`: SQLite URL (default: sqlite://items.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `RUST_LOG`: Log filter (default: itemlist_api=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for plain text
///
/// # Example
///
/// ```no_run
/// use itemlist_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use itemlist_shared::db::pool;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `["*"]` allows any origin
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
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
    /// Returns an error if a numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT must be a port number: {}", e))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://items.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a number: {}", e))?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()));

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// True when any origin may call the API
    pub fn cors_is_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
