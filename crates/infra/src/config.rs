//! Configuration loading and representation.
//!
//! Everything comes from the environment. A missing `DATABASE_URL` is a valid
//! configuration (local-only mode); malformed values fail startup.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8080,http://localhost:8081,http://localhost:8082,http://localhost:8083,http://localhost:5173";
pub const DEFAULT_PRODUCTS_TABLE: &str = "produits";
pub const DEFAULT_PRICES_TABLE: &str = "prix_telephones";
pub const DEFAULT_CATALOG_CSV: &str = "tab_cleaned.csv";
pub const DEFAULT_MIRROR_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Remote mirror connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    pub database_url: String,
    pub products_table: String,
    pub prices_table: String,
    pub timeout: Duration,
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub catalog_csv: PathBuf,
    /// `None` means local-only mode.
    pub mirror: Option<MirrorConfig>,
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (tests inject a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = parse_origins(&get("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()));

        let catalog_csv = PathBuf::from(get("CATALOG_CSV").unwrap_or_else(|| DEFAULT_CATALOG_CSV.to_string()));

        let timeout_ms = match get("MIRROR_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "MIRROR_TIMEOUT_MS",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_MIRROR_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "MIRROR_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "timeout must be at least 1 ms".to_string(),
            });
        }

        let products_table = get("PRODUCTS_TABLE").unwrap_or_else(|| DEFAULT_PRODUCTS_TABLE.to_string());
        validate_table_name("PRODUCTS_TABLE", &products_table)?;
        let prices_table = get("PRICE_TABLE").unwrap_or_else(|| DEFAULT_PRICES_TABLE.to_string());
        validate_table_name("PRICE_TABLE", &prices_table)?;

        let mirror = match get("DATABASE_URL") {
            Some(database_url) => Some(MirrorConfig {
                database_url,
                products_table,
                prices_table,
                timeout: Duration::from_millis(timeout_ms),
            }),
            None => {
                tracing::warn!("DATABASE_URL not set; remote mirror disabled (local-only mode)");
                None
            }
        };

        Ok(Self {
            port,
            cors_origins,
            catalog_csv,
            mirror,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept `table` or `schema.table`, each part a plain SQL identifier.
pub fn validate_table_name(key: &'static str, name: &str) -> Result<(), ConfigError> {
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() <= 2 && parts.iter().all(|p| valid_part(p)) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            value: name.to_string(),
            reason: "expected an identifier like `produits` or `public.produits`".to_string(),
        })
    }
}
