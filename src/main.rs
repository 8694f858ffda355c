//! cachestore - demo binary
//!
//! Walks the process-wide store through add, lookup, removal and racing
//! creation, logging each step.

use std::sync::{Arc, Barrier};
use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cachestore::{Config, global};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const CREATORS: usize = 8;

#[derive(Debug)]
struct Person {
    name: String,
}

impl From<&str> for Person {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // If RUST_LOG is not set, fall back to the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("cachestore=info"))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting cachestore demo...");
    info!("Cache config: {:?}", config.cache);

    let store = global();

    store.add(Some("k1"), Person::from("Skerdi"));
    info!("k1 exists after add: {}", store.exists::<Person>(Some("k1")));

    store.remove::<Person>(Some("k1"));
    info!("k1 exists after remove: {}", store.exists::<Person>(Some("k1")));

    let created = store.create_from::<Person, _>(Some("k2"), "Altjen")?;
    info!("First create for k2 returned: {:?}", created.map(|p| p.name.clone()));

    let again = store.create_from::<Person, _>(Some("k2"), "Other")?;
    info!("Second create for k2 returned: {:?}", again.map(|p| p.name.clone()));

    if let Some(person) = store.get::<Person>(Some("k2")) {
        info!("k2 holds: {}", person.name);
    }

    // Race several creators on one key; exactly one should win
    let barrier = Arc::new(Barrier::new(CREATORS));
    let handles: Vec<_> = (0..CREATORS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                global()
                    .create(Some("race"), || Person {
                        name: format!("creator-{i}"),
                    })
                    .is_some()
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.join().map_err(|_| anyhow::anyhow!("creator thread panicked"))? {
            winners += 1;
        }
    }

    let stored = store
        .get::<Person>(Some("race"))
        .map(|p| p.name.clone())
        .unwrap_or_default();
    info!("{} of {} creators won, stored value: {}", winners, CREATORS, stored);
    info!("Store contents: {:?}", store);

    Ok(())
}
