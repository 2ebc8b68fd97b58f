//! Application configuration

use std::env;

use anyhow::{bail, Context, Result};

/// Where catalog records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local list; lost on restart.
    Memory,
    /// One JSON document per record in a SQLite file.
    Sqlite { path: String },
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any). Unset disables CORS.
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Lifetime of the cached catalog snapshot (minutes)
    pub cache_ttl_minutes: u32,

    pub store: StoreBackend,
    /// Artificial delay added to every in-memory storage call (milliseconds)
    pub store_latency_ms: u64,
    /// Populate an empty in-memory store with sample records at startup
    pub seed_data: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let server_port = var("SERVER_PORT")
            .or_else(|| var("PORT"))
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("SERVER_PORT must be a valid port number")?;

        let cache_ttl_minutes = env_or("CATALOG_CACHE_TTL_MINUTES", "15")
            .parse()
            .context("CATALOG_CACHE_TTL_MINUTES must be a whole number of minutes")?;

        let store_latency_ms = env_or("CATALOG_STORE_LATENCY_MS", "0")
            .parse()
            .context("CATALOG_STORE_LATENCY_MS must be a whole number of milliseconds")?;

        let store = match env_or("CATALOG_STORE", "memory").to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "sqlite" => StoreBackend::Sqlite {
                path: env_or("CATALOG_DB_PATH", "catalog.db"),
            },
            other => bail!("CATALOG_STORE must be 'memory' or 'sqlite', got '{other}'"),
        };

        Ok(Self {
            server_host: env_or("SERVER_HOST", "0.0.0.0"),
            server_port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            cache_ttl_minutes,
            store,
            store_latency_ms,
            seed_data: matches!(
                env_or("CATALOG_SEED_DATA", "false").to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ),
        })
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cache_ttl_minutes))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
