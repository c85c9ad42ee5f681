//! Time-to-live memoisation for loaded snapshots.
//!
//! Entries are keyed by source identity (the resolved file path) and shared
//! as `Arc`s so a render can hold on to a table while the cache refreshes.
//! Failed loads are never stored.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

struct Entry<V> {
    value: Arc<V>,
    loaded_at: Instant,
}

pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: Duration) {
        self.ttl = ttl;
    }

    /// Return the cached value for `key` if still fresh at `now`, otherwise
    /// run `load` and remember its result.
    pub fn get_or_load<E, F>(&mut self, key: &K, now: Instant, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(entry) = self.entries.get(key) {
            if now.saturating_duration_since(entry.loaded_at) < self.ttl {
                debug!(?key, "snapshot cache hit");
                return Ok(entry.value.clone());
            }
            info!(?key, "snapshot cache entry expired; reloading");
        }

        let value = Arc::new(load()?);
        self.entries.insert(
            key.clone(),
            Entry {
                value: value.clone(),
                loaded_at: now,
            },
        );
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fresh_entries_are_reused() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(300));
        let loads = Cell::new(0);
        let start = Instant::now();

        for offset in [0, 10, 299] {
            let value = cache
                .get_or_load::<(), _>(&"over_time", start + Duration::from_secs(offset), || {
                    loads.set(loads.get() + 1);
                    Ok(7)
                })
                .unwrap();
            assert_eq!(*value, 7);
        }
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn expired_entries_reload() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(300));
        let start = Instant::now();

        let first = cache.get_or_load::<(), _>(&"gaps", start, || Ok(1)).unwrap();
        let second = cache
            .get_or_load::<(), _>(&"gaps", start + Duration::from_secs(300), || Ok(2))
            .unwrap();
        assert_eq!((*first, *second), (1, 2));
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(300));
        let start = Instant::now();

        let err = cache.get_or_load(&"pct", start, || Err("offline"));
        assert_eq!(err.unwrap_err(), "offline");

        let ok = cache.get_or_load::<&str, _>(&"pct", start, || Ok(3)).unwrap();
        assert_eq!(*ok, 3);
    }

    #[test]
    fn clear_forces_reload() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(300));
        let start = Instant::now();
        cache.get_or_load::<(), _>(&"k", start, || Ok(1)).unwrap();
        cache.clear();
        let again = cache.get_or_load::<(), _>(&"k", start, || Ok(9)).unwrap();
        assert_eq!(*again, 9);
    }
}
