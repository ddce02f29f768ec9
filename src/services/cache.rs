//! Time-bounded cache of translated responses.
//!
//! Maps the verbatim request target to a previously translated response.
//! Expired entries are treated as absent on read; a background sweeper
//! removes them for real once a minute. There is no size bound; unbounded
//! growth under sustained unique-key traffic is an accepted limitation.
//!
//! Spawn the sweeper from `main` via `tokio::spawn(cache.clone().run_sweeper())`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::services::translate::HumanReadableResponse;

/// Sweep cadence, independent of the configured TTL.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: HumanReadableResponse,
    expires_at: Instant,
}

/// Shared response cache. Cloning is cheap and all clones see the same map.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a response by request target. Expired entries are absent even
    /// if the sweeper has not removed them yet.
    pub async fn get(&self, key: &str) -> Option<HumanReadableResponse> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Store a response. An existing entry for the key is replaced and its
    /// expiry reset.
    pub async fn put(&self, key: String, value: HumanReadableResponse, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Remove every expired entry, returning how many were dropped.
    async fn remove_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Run the periodic sweep. Never returns; spawn on the runtime.
    pub async fn run_sweeper(self) {
        tracing::info!("Cache sweeper started");
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            ticker.tick().await;
            let removed = self.remove_expired().await;
            if removed > 0 {
                tracing::debug!("Cache sweep removed {} expired entries", removed);
            }
        }
    }
}
