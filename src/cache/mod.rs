//! Cache module - typed object store backed by DashMap.
//!
//! This module provides a store that keeps one value per (type, qualifier)
//! pair, so unrelated call sites can share singletons without agreeing on
//! anything but the type.
//!
//! ## Architecture
//!
//! - `CacheStore` - Cloneable handle over the shared map
//! - `CacheKey` - Composite key of `TypeId` and qualifier string
//! - `CacheConfig` - Sizing for the backing map
//! - `global()` - Lazily created process-wide store
//!
//! ## Usage
//!
//! ```rust
//! use cachestore::CacheStore;
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//! }
//!
//! impl From<&str> for Person {
//!     fn from(name: &str) -> Self {
//!         Self { name: name.to_string() }
//!     }
//! }
//!
//! let store = CacheStore::new();
//!
//! // First creator wins
//! let created = store.create_from::<Person, _>(Some("k2"), "Altjen").unwrap();
//! assert_eq!(created.unwrap().name, "Altjen");
//!
//! // Later creators get None and the original stays
//! let again = store.create_from::<Person, _>(Some("k2"), "Other").unwrap();
//! assert!(again.is_none());
//! assert_eq!(store.get::<Person>(Some("k2")).unwrap().name, "Altjen");
//! ```

mod config;
mod global;
mod key;
mod store;

pub use config::CacheConfig;
pub use global::global;
pub use key::CacheKey;
pub use store::CacheStore;
