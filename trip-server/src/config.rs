//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::cache::QuoteCacheConfig;
use crate::catalog::{CatalogClient, CatalogClientConfig, CatalogError, CatalogSource};

/// A variable was set but could not be parsed.
#[derive(Debug, Error)]
#[error("invalid {key}: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Local catalog file; takes precedence over `catalog_url`
    pub catalog_path: Option<PathBuf>,
    pub catalog_url: Option<String>,
    pub catalog_refresh: Duration,
    pub quote_cache_ttl: Duration,
    pub quote_cache_capacity: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: None,
            catalog_url: None,
            catalog_refresh: Duration::from_secs(3600),
            quote_cache_ttl: Duration::from_secs(300),
            quote_cache_capacity: 1000,
        }
    }
}

impl AppConfig {
    /// Read the `TRIP_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, defaulting unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: try_load(&lookup, "TRIP_BIND_ADDR", defaults.bind_addr)?,
            catalog_path: optional(&lookup, "TRIP_CATALOG_PATH").map(PathBuf::from),
            catalog_url: optional(&lookup, "TRIP_CATALOG_URL"),
            catalog_refresh: Duration::from_secs(try_load(
                &lookup,
                "TRIP_CATALOG_REFRESH_SECS",
                defaults.catalog_refresh.as_secs(),
            )?),
            quote_cache_ttl: Duration::from_secs(try_load(
                &lookup,
                "TRIP_QUOTE_CACHE_TTL_SECS",
                defaults.quote_cache_ttl.as_secs(),
            )?),
            quote_cache_capacity: try_load(
                &lookup,
                "TRIP_QUOTE_CACHE_CAPACITY",
                defaults.quote_cache_capacity,
            )?,
        })
    }

    /// Catalog source selected by this configuration.
    pub fn catalog_source(&self) -> Result<CatalogSource, CatalogError> {
        if let Some(path) = &self.catalog_path {
            return Ok(CatalogSource::File(path.clone()));
        }
        if let Some(url) = &self.catalog_url {
            let client = CatalogClient::new(CatalogClientConfig::new(url))?;
            return Ok(CatalogSource::Remote(client));
        }
        Ok(CatalogSource::Sample)
    }

    pub fn quote_cache(&self) -> QuoteCacheConfig {
        QuoteCacheConfig {
            ttl: self.quote_cache_ttl,
            max_capacity: self.quote_cache_capacity,
        }
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional(lookup, key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError {
                key,
                message: e.to_string(),
            }
        }),
    }
}
