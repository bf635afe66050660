//! Engine configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` (or `PORT`) | `8001` |
//! | `DATABASE_PATH` | `gang_npcs.db` (`:memory:` allowed) |
//! | `CORS_ALLOWED_ORIGINS` | unset: CORS disabled; `*` or comma list |
//! | `FACTION_CATALOG_PATH` | unset: built-in catalog |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gangnpc_domain::{Faction, FactionCatalog, FactionProfile};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_DATABASE_PATH: &str = "gang_npcs.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read faction catalog {path}: {message}")]
    CatalogRead { path: PathBuf, message: String },

    #[error("Invalid faction catalog {path}: {message}")]
    CatalogInvalid { path: PathBuf, message: String },
}

/// Which origins may call the API cross-origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Disabled,
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return CorsOrigins::Disabled;
        };
        if raw == "*" {
            return CorsOrigins::Any;
        }

        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() {
            CorsOrigins::Disabled
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub cors_origins: CorsOrigins,
    pub faction_catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests never touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server_port = match non_empty("SERVER_PORT").or_else(|| non_empty("PORT")) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid server port, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port,
            database_path: non_empty("DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            cors_origins: CorsOrigins::parse(lookup("CORS_ALLOWED_ORIGINS").as_deref()),
            faction_catalog_path: non_empty("FACTION_CATALOG_PATH").map(PathBuf::from),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// The configured catalog override, or the built-in table.
    pub fn load_faction_catalog(&self) -> Result<FactionCatalog, ConfigError> {
        match &self.faction_catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(FactionCatalog::builtin()),
        }
    }
}

/// Parse a JSON object keyed by faction tag into a validated catalog.
pub fn load_catalog_file(path: &Path) -> Result<FactionCatalog, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let invalid = |message: String| ConfigError::CatalogInvalid {
        path: path.to_path_buf(),
        message,
    };
    let profiles: BTreeMap<Faction, FactionProfile> =
        serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))?;
    FactionCatalog::new(profiles).map_err(|e| invalid(e.to_string()))
}
