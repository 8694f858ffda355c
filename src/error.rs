//! Error types for the cache store.

/// Errors surfaced by the cache store and its configuration.
///
/// Absence and key conflicts are not errors; they come back as `None` or
/// `false` from the store operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The entry stored under a key does not hold the requested type.
    #[error("type mismatch for qualifier '{qualifier}': expected {expected}, found {found}")]
    TypeMismatch {
        qualifier: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An environment variable could not be turned into a config value.
    #[error("invalid value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },
}

/// Result alias for cache store operations.
pub type Result<T> = std::result::Result<T, CacheError>;
