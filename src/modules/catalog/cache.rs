use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Unbounded map whose entries go stale after a fixed TTL.
///
/// Concurrent misses for the same key are not coalesced: each caller fetches
/// and the last insert wins.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, (DateTime<Utc>, V)>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: TimeDelta, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl, clock }
    }

    /// Returns a live entry; an expired one is evicted on the way out.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.utc();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            None => return None,
            Some((stored_at, _)) => now - *stored_at > self.ttl,
        };

        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|(_, value)| value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let now = self.clock.utc();
        self.lock().insert(key, (now, value));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (DateTime<Utc>, V)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::MutableClock;

    fn cache(clock: &Arc<MutableClock>) -> TtlCache<i64, &'static str> {
        TtlCache::new(TimeDelta::seconds(60), clock.clone())
    }

    #[test]
    fn entry_is_served_until_ttl_passes() {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let cache = cache(&clock);
        cache.insert(1, "zelda");

        clock.advance_seconds(60);
        assert_eq!(cache.get(&1), Some("zelda"));

        clock.advance_seconds(1);
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn reinserting_restarts_the_window() {
        let clock = Arc::new(MutableClock::new(Utc::now()));
        let cache = cache(&clock);
        cache.insert(1, "old");

        clock.advance_seconds(45);
        cache.insert(1, "new");
        clock.advance_seconds(45);

        assert_eq!(cache.get(&1), Some("new"));
        assert_eq!(cache.len(), 1);
    }
}
