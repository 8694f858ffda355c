//! Configuration module for the cache store.
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::error::{CacheError, Result};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Sizing for the process-wide store.
    pub cache: CacheConfig,

    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first if present. All variables are optional:
    /// - `CACHE_INITIAL_CAPACITY` - entries to reserve up front
    /// - `CACHE_SHARD_AMOUNT` - shard count, a power of two greater than 1
    /// - `CACHE_LOG_FILTER` - default tracing filter
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cache = CacheConfig::default();

        if let Some(capacity) = parse_var(&lookup, "CACHE_INITIAL_CAPACITY")? {
            cache = cache.initial_capacity(capacity);
        }

        if let Some(shards) = parse_var(&lookup, "CACHE_SHARD_AMOUNT")? {
            cache = cache.shard_amount(shards);
        }

        cache.validate().map_err(|_| CacheError::InvalidConfig {
            var: "CACHE_SHARD_AMOUNT",
            reason: "must be a power of two greater than 1".to_string(),
        })?;

        let log_filter = lookup("CACHE_LOG_FILTER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self { cache, log_filter })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse()
        .map(Some)
        .map_err(|err: T::Err| CacheError::InvalidConfig {
            var,
            reason: format!("'{raw}': {err}"),
        })
}
