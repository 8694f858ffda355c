//! Process-wide store instance.

use once_cell::sync::Lazy;
use tracing::warn;

use super::CacheStore;
use crate::config::Config;

static GLOBAL: Lazy<CacheStore> = Lazy::new(|| {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring cache configuration: {}", err);
            Config::default()
        }
    };

    CacheStore::with_config(config.cache).unwrap_or_else(|err| {
        warn!("Falling back to default cache store: {}", err);
        CacheStore::new()
    })
});

/// Get the process-wide store, creating it on first use.
///
/// Prefer passing a [`CacheStore`] handle around; this exists for call
/// sites that cannot be handed one.
pub fn global() -> &'static CacheStore {
    &GLOBAL
}
