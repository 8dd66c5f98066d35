//! Time-bounded memoization of fetch and selection results.
//!
//! Each cached call is stored as `(value, inserted_at)` under its full
//! parameter tuple. Every read checks the entry's age against the TTL, so an
//! expired entry is never returned even if it has not been evicted yet.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::models::{Expansion, ExpansionResult, Game, ProductPayload};
use crate::selector::SelectionParams;

/// A map from key to `(value, inserted_at)` with a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (V, Instant)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a clone of the cached value if it is still fresh.
    ///
    /// A stale entry is removed on the way out.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_entry(key).map(|(v, _)| v)
    }

    /// Like [`get`](Self::get), but also return when the value was stored.
    pub fn get_entry(&mut self, key: &K) -> Option<(V, Instant)> {
        let fresh = match self.entries.get(key) {
            Some((_, inserted_at)) => inserted_at.elapsed() < self.ttl,
            None => return None,
        };
        if fresh {
            self.entries.get(key).map(|(v, at)| (v.clone(), *at))
        } else {
            self.entries.remove(key);
            None
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Store a value derived from older data under that data's timestamp, so
    /// it expires together with its source.
    pub fn insert_at(&mut self, key: K, value: V, inserted_at: Instant) {
        self.entries.insert(key, (value, inserted_at));
    }

    /// Return the fresh cached value, or compute, store and return a new one.
    ///
    /// Errors from `fetch` are returned as-is and nothing is cached.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(v) = self.get(&key) {
            return Ok(v);
        }
        let value = fetch()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop every entry older than the TTL. Returns how many were removed.
    pub fn evict_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, (_, inserted_at)| inserted_at.elapsed() < ttl);
        before - self.entries.len()
    }

    /// Number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// SessionCache
// ---------------------------------------------------------------------------

/// Cache key for a best-price computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BestPriceKey {
    pub expansion_id: u64,
    pub params: SelectionParams,
}

/// One TTL cache per memoized call, each keyed by that call's parameters.
pub struct SessionCache {
    pub games: TtlCache<(), Rc<Vec<Game>>>,
    pub expansions: TtlCache<(), Rc<Vec<Expansion>>>,
    pub products: TtlCache<(u64, String), Rc<ProductPayload>>,
    pub best_prices: TtlCache<BestPriceKey, Rc<ExpansionResult>>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            games: TtlCache::new(ttl),
            expansions: TtlCache::new(ttl),
            products: TtlCache::new(ttl),
            best_prices: TtlCache::new(ttl),
        }
    }

    /// Total stored entries across all calls.
    pub fn len(&self) -> usize {
        self.games.len() + self.expansions.len() + self.products.len() + self.best_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn evict_expired(&mut self) -> usize {
        self.games.evict_expired()
            + self.expansions.evict_expired()
            + self.products.evict_expired()
            + self.best_prices.evict_expired()
    }

    pub fn clear(&mut self) {
        self.games.clear();
        self.expansions.clear();
        self.products.clear();
        self.best_prices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeated_key_hits_cache() {
        let mut cache: TtlCache<(u64, String), u32> = TtlCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);
        let fetch = || -> Result<u32, ()> {
            calls.set(calls.get() + 1);
            Ok(42)
        };

        assert_eq!(cache.get_or_try_insert_with((1, "it".into()), fetch), Ok(42));
        assert_eq!(cache.get_or_try_insert_with((1, "it".into()), fetch), Ok(42));
        assert_eq!(calls.get(), 1);

        assert_eq!(cache.get_or_try_insert_with((1, "en".into()), fetch), Ok(42));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache: TtlCache<u8, u8> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get_or_try_insert_with(1, || Err("down")), Err("down"));
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_try_insert_with(1, || Ok::<_, &str>(7)), Ok(7));
    }

    #[test]
    fn stale_entries_are_not_returned() {
        let mut cache: TtlCache<u8, u8> = TtlCache::new(Duration::from_millis(20));
        cache.insert(1, 1);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn evict_expired_removes_only_stale() {
        let mut cache: TtlCache<u8, u8> = TtlCache::new(Duration::from_millis(30));
        cache.insert(1, 1);
        std::thread::sleep(Duration::from_millis(50));
        cache.insert(2, 2);
        assert_eq!(cache.evict_expired(), 1);
        assert_eq!(cache.get(&2), Some(2));
    }

    #[test]
    fn insert_at_keeps_source_age() {
        let mut cache: TtlCache<u8, u8> = TtlCache::new(Duration::from_millis(60));
        cache.insert(1, 1);
        let (_, source_at) = cache.get_entry(&1).unwrap();
        std::thread::sleep(Duration::from_millis(40));
        cache.insert_at(2, 2, source_at);
        assert_eq!(cache.get(&2), Some(2));
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn zero_ttl_never_hits() {
        let mut cache: TtlCache<u8, u8> = TtlCache::new(Duration::ZERO);
        cache.insert(1, 1);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn session_cache_counts_all_calls() {
        let mut cache = SessionCache::new(Duration::from_secs(60));
        cache.games.insert((), Rc::new(Vec::new()));
        cache.products.insert((5, "it".into()), Rc::new(ProductPayload::new()));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
