//! Cache store - process-wide registry of typed values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use super::{CacheConfig, CacheKey};
use crate::error::{CacheError, Result};

/// Concurrent store of heterogeneous values keyed by type and qualifier.
///
/// Every operation is addressed by a type parameter `T` and an optional
/// qualifier. Inserts are insert-if-absent: the first writer for a key wins
/// and later writers are no-ops until the entry is removed.
///
/// Cloning is cheap and shares the same underlying map.
///
/// ## Example
///
/// ```rust
/// use cachestore::CacheStore;
///
/// struct Person {
///     name: String,
/// }
///
/// let store = CacheStore::new();
/// store.add(Some("k1"), Person { name: "Skerdi".into() });
/// assert!(store.exists::<Person>(Some("k1")));
///
/// let person = store.get::<Person>(Some("k1")).unwrap();
/// assert_eq!(person.name, "Skerdi");
/// ```
#[derive(Clone)]
pub struct CacheStore {
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
}

/// Internal entry storing a type-erased value.
struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl CacheEntry {
    fn new<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

fn type_mismatch(key: &CacheKey, entry: &CacheEntry) -> CacheError {
    CacheError::TypeMismatch {
        qualifier: key.qualifier().to_string(),
        expected: key.type_name(),
        found: entry.type_name,
    }
}

impl CacheStore {
    /// Create a new empty store with the default config.
    pub fn new() -> Self {
        info!("Cache store initialized");
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Create a new empty store sized by `config`.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let entries = match config.shard_amount {
            Some(shards) => {
                DashMap::with_capacity_and_shard_amount(config.initial_capacity, shards)
            }
            None => DashMap::with_capacity(config.initial_capacity),
        };

        info!(
            "Cache store initialized (capacity: {}, shards: {:?})",
            config.initial_capacity, config.shard_amount
        );
        Ok(Self {
            entries: Arc::new(entries),
        })
    }

    /// Check if an entry exists for `T` under `qualifier`.
    pub fn exists<T>(&self, qualifier: Option<&str>) -> bool
    where
        T: Any + Send + Sync,
    {
        self.entries.contains_key(&CacheKey::of::<T>(qualifier))
    }

    /// Get the value stored for `T` under `qualifier`.
    ///
    /// Returns `None` if there is no such entry.
    ///
    /// # Panics
    /// Panics if the stored value is not a `T`. Use [`CacheStore::try_get`]
    /// to get the mismatch as an error instead.
    pub fn get<T>(&self, qualifier: Option<&str>) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        match self.try_get(qualifier) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Get the value stored for `T` under `qualifier`, reporting a stored
    /// value of the wrong type as [`CacheError::TypeMismatch`].
    pub fn try_get<T>(&self, qualifier: Option<&str>) -> Result<Option<Arc<T>>>
    where
        T: Any + Send + Sync,
    {
        let key = CacheKey::of::<T>(qualifier);
        let Some(entry) = self.entries.get(&key) else {
            return Ok(None);
        };

        entry
            .downcast::<T>()
            .map(Some)
            .ok_or_else(|| type_mismatch(&key, &entry))
    }

    /// Insert `value` unless an entry for `T` under `qualifier` exists.
    ///
    /// Returns `true` if the value was inserted. An existing entry is left
    /// untouched and the call returns `false`.
    pub fn add<T>(&self, qualifier: Option<&str>, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.add_shared(qualifier, Arc::new(value))
    }

    /// Same as [`CacheStore::add`] for a value that is already shared.
    pub fn add_shared<T>(&self, qualifier: Option<&str>, value: Arc<T>) -> bool
    where
        T: Any + Send + Sync,
    {
        match self.entries.entry(CacheKey::of::<T>(qualifier)) {
            Entry::Occupied(occupied) => {
                debug!("Cache entry {} already present, skipping insert", occupied.key());
                false
            }
            Entry::Vacant(vacant) => {
                debug!("Adding cache entry: {}", vacant.key());
                vacant.insert(CacheEntry::new(value));
                true
            }
        }
    }

    /// Build a `T` with `factory` and insert it if no entry exists.
    ///
    /// Returns the stored value to the caller that inserted it. If another
    /// entry was already present the new value is dropped and `None` is
    /// returned; call [`CacheStore::get`] to read the existing one.
    pub fn create<T, F>(&self, qualifier: Option<&str>, factory: F) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let value = Arc::new(factory());
        self.add_shared(qualifier, Arc::clone(&value))
            .then_some(value)
    }

    /// Like [`CacheStore::create`] with a fallible factory.
    ///
    /// A factory error is returned as-is and nothing is inserted.
    pub fn try_create<T, E, F>(
        &self,
        qualifier: Option<&str>,
        factory: F,
    ) -> std::result::Result<Option<Arc<T>>, E>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let value = factory()?;
        Ok(self.create(qualifier, || value))
    }

    /// Build a `T` from `args` through its `TryFrom` conversion and insert it
    /// if no entry exists.
    ///
    /// `args` may be a single value or a tuple of constructor arguments.
    pub fn create_from<T, A>(
        &self,
        qualifier: Option<&str>,
        args: A,
    ) -> std::result::Result<Option<Arc<T>>, T::Error>
    where
        T: Any + Send + Sync + TryFrom<A>,
    {
        self.try_create(qualifier, || T::try_from(args))
    }

    /// Get the value for `T` under `qualifier`, inserting the product of
    /// `factory` if there is none.
    ///
    /// The factory runs while the key's shard is locked and must not call
    /// back into this store.
    ///
    /// # Panics
    /// Panics if the stored value is not a `T`.
    pub fn get_or_create<T, F>(&self, qualifier: Option<&str>, factory: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        match self.entries.entry(CacheKey::of::<T>(qualifier)) {
            Entry::Occupied(occupied) => match occupied.get().downcast::<T>() {
                Some(value) => value,
                None => panic!("{}", type_mismatch(occupied.key(), occupied.get())),
            },
            Entry::Vacant(vacant) => {
                debug!("Creating cache entry: {}", vacant.key());
                let value = Arc::new(factory());
                vacant.insert(CacheEntry::new(Arc::clone(&value)));
                value
            }
        }
    }

    /// Remove the entry for `T` under `qualifier`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove<T>(&self, qualifier: Option<&str>) -> bool
    where
        T: Any + Send + Sync,
    {
        let removed = self.entries.remove(&CacheKey::of::<T>(qualifier));
        if let Some((key, _)) = &removed {
            debug!("Removed cache entry: {}", key);
        }
        removed.is_some()
    }

    /// Get the number of stored entries.
    ///
    /// Note: This may be stale by the time it returns under concurrent writes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a list of all stored keys, rendered as `type[qualifier]`.
    pub fn type_names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().to_string()).collect()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entry_count", &self.entries.len())
            .field("entries", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Plant a value under a key whose type does not match it.
    fn store_with_mismatched_entry() -> CacheStore {
        let store = CacheStore::new();
        store.entries.insert(
            CacheKey::of::<u32>(Some("port")),
            CacheEntry::new(Arc::new(String::from("8080"))),
        );
        store
    }

    #[test]
    fn try_get_reports_type_mismatch() {
        let store = store_with_mismatched_entry();
        match store.try_get::<u32>(Some("port")) {
            Err(CacheError::TypeMismatch {
                qualifier,
                expected,
                found,
            }) => {
                assert_eq!(qualifier, "port");
                assert_eq!(expected, "u32");
                assert_eq!(found, std::any::type_name::<String>());
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "type mismatch")]
    fn get_panics_on_type_mismatch() {
        let store = store_with_mismatched_entry();
        let _ = store.get::<u32>(Some("port"));
    }

    #[test]
    #[should_panic(expected = "type mismatch")]
    fn get_or_create_panics_on_type_mismatch() {
        let store = store_with_mismatched_entry();
        let _ = store.get_or_create::<u32, _>(Some("port"), || 1);
    }

    #[test]
    fn with_config_rejects_invalid_shards() {
        let err = CacheStore::with_config(CacheConfig::default().shard_amount(3));
        assert!(matches!(err, Err(CacheError::InvalidConfig { .. })));
    }

    #[test]
    fn with_config_builds_empty_store() {
        let store = CacheStore::with_config(CacheConfig::small()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn debug_lists_entries() {
        let store = CacheStore::new();
        store.add(Some("answer"), 42u64);
        let rendered = format!("{store:?}");
        assert!(rendered.contains("entry_count: 1"));
        assert!(rendered.contains("u64[answer]"));
    }
}
