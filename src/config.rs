//! Configuration management for the product search sync service.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the .env
//! file silently if present.

use crate::error::{ConfigError, ConfigResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use tracing_subscriber::EnvFilter;

/// Index names and collection ids are used verbatim in request paths.
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("identifier pattern is valid"));

/// Configuration for the product search sync service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Index service base URL
    pub index_api_url: String,

    /// Index service application id
    pub index_app_id: String,

    /// Index service API key (needs write access for sync)
    pub index_api_key: String,

    /// Name of the index holding product entries
    pub index_name: String,

    /// Primary store REST base URL
    pub store_api_url: String,

    /// Primary store database resource path, e.g. `projects/shop/databases/(default)`
    pub store_database: String,

    /// Bearer token for the primary store (optional)
    pub store_access_token: Option<String>,

    /// Collection holding products (default: "products")
    pub store_collection: String,

    /// Maximum ids per batch fetch (default: 10)
    pub store_batch_limit: usize,

    /// Maximum batch fetches in flight per query (default: 4)
    pub store_fetch_concurrency: usize,

    /// Hits requested from the index per query (default: 20)
    pub search_hits_per_page: usize,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `INDEX_API_URL`: Base URL of the index service
    /// - `INDEX_APP_ID`: Index service application id
    /// - `INDEX_API_KEY`: Index service API key
    /// - `INDEX_NAME`: Name of the product index
    /// - `STORE_API_URL`: Base URL of the primary store REST API
    /// - `STORE_DATABASE`: Database resource path
    ///
    /// Optional environment variables:
    /// - `STORE_ACCESS_TOKEN`: Bearer token for the store
    /// - `STORE_COLLECTION`: Product collection (default: products)
    /// - `STORE_BATCH_LIMIT`: Max ids per batch fetch (default: 10)
    /// - `STORE_FETCH_CONCURRENCY`: Concurrent batch fetches (default: 4)
    /// - `SEARCH_HITS_PER_PAGE`: Index page size (default: 20)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // We use dotenvy::dotenv() which doesn't print to stdout
        let _ = dotenvy::dotenv();

        let index_api_url = Self::require("INDEX_API_URL")?;
        let index_app_id = Self::require("INDEX_APP_ID")?;
        let index_api_key = Self::require("INDEX_API_KEY")?;
        let index_name = Self::require("INDEX_NAME")?;
        let store_api_url = Self::require("STORE_API_URL")?;
        let store_database = Self::require("STORE_DATABASE")?;

        Self::validate_url("INDEX_API_URL", &index_api_url)?;
        Self::validate_url("STORE_API_URL", &store_api_url)?;
        Self::validate_not_blank("INDEX_APP_ID", &index_app_id)?;
        Self::validate_not_blank("INDEX_API_KEY", &index_api_key)?;
        Self::validate_not_blank("STORE_DATABASE", &store_database)?;
        Self::validate_identifier("INDEX_NAME", &index_name)?;

        let store_collection =
            env::var("STORE_COLLECTION").unwrap_or_else(|_| "products".to_string());
        Self::validate_identifier("STORE_COLLECTION", &store_collection)?;

        let store_access_token = env::var("STORE_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let store_batch_limit = Self::parse_env_usize("STORE_BATCH_LIMIT", 10)?;
        if store_batch_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "STORE_BATCH_LIMIT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let store_fetch_concurrency = Self::parse_env_usize("STORE_FETCH_CONCURRENCY", 4)?;
        if store_fetch_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                var: "STORE_FETCH_CONCURRENCY".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let search_hits_per_page = Self::parse_env_usize("SEARCH_HITS_PER_PAGE", 20)?;
        if !(1..=1000).contains(&search_hits_per_page) {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_HITS_PER_PAGE".to_string(),
                reason: "Must be between 1 and 1000".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            index_api_url,
            index_app_id,
            index_api_key,
            index_name,
            store_api_url,
            store_database,
            store_access_token,
            store_collection,
            store_batch_limit,
            store_fetch_concurrency,
            search_hits_per_page,
            request_timeout,
            log_level,
        })
    }

    fn require(var_name: &str) -> ConfigResult<String> {
        env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))
    }

    fn validate_url(var_name: &str, value: &str) -> ConfigResult<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    fn validate_not_blank(var_name: &str, value: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn validate_identifier(var_name: &str, value: &str) -> ConfigResult<()> {
        if !IDENTIFIER_PATTERN.is_match(value) {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!(
                    "Must contain only letters, digits, '_', '.' or '-', got: {}",
                    value
                ),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_api_url: String::new(),
            index_app_id: String::new(),
            index_api_key: String::new(),
            index_name: String::new(),
            store_api_url: String::new(),
            store_database: String::new(),
            store_access_token: None,
            store_collection: "products".to_string(),
            store_batch_limit: 10,
            store_fetch_concurrency: 4,
            search_hits_per_page: 20,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

/// Build the tracing filter.
///
/// `RUST_LOG` wins when set and valid; otherwise the configured `LOG_LEVEL` is
/// used. Anything unparsable falls back to `error`.
pub fn log_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| log_level.and_then(|level| EnvFilter::try_new(level).ok()))
        .unwrap_or_else(|| EnvFilter::new("error"))
}
