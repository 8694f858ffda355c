//! cachestore - Typed In-Memory Object Store
//!
//! A concurrent registry holding at most one value per (type, qualifier)
//! key, with insert-if-absent semantics for racing creators.
//!
//! ## Architecture
//!
//! - `cache` - The store, its keys and sizing config
//! - `config` - Environment configuration
//! - `error` - Error types

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheConfig, CacheKey, CacheStore, global};
pub use config::Config;
pub use error::{CacheError, Result};
