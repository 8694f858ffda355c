//! Cache store configuration.

use crate::error::{CacheError, Result};

/// Configuration for a cache store instance.
///
/// There are no eviction knobs: entries live until they are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entries to reserve space for up front.
    pub initial_capacity: usize,

    /// Number of shards in the backing map.
    /// `None` lets dashmap pick its default based on available parallelism.
    pub shard_amount: Option<usize>,
}

impl CacheConfig {
    /// Create a new cache config with the given initial capacity.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Default::default()
        }
    }

    /// Set initial capacity (builder pattern).
    #[must_use]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the shard amount. Must be a power of two greater than 1.
    #[must_use]
    pub fn shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = Some(shard_amount);
        self
    }

    /// Create config for a small store holding a handful of singletons.
    pub fn small() -> Self {
        Self {
            initial_capacity: 16,
            shard_amount: Some(4),
        }
    }

    /// Check the config against the backing map's constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(shards) = self.shard_amount
            && (shards < 2 || !shards.is_power_of_two())
        {
            return Err(CacheError::InvalidConfig {
                var: "shard_amount",
                reason: format!("{shards} is not a power of two greater than 1"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(CacheConfig::small().validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = CacheConfig::with_capacity(64).shard_amount(8);
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.shard_amount, Some(8));
    }

    #[test]
    fn rejects_bad_shard_amounts() {
        for shards in [0, 1, 3, 12] {
            let err = CacheConfig::default().shard_amount(shards).validate();
            assert!(
                matches!(err, Err(CacheError::InvalidConfig { var: "shard_amount", .. })),
                "{shards} should be rejected"
            );
        }
    }
}
