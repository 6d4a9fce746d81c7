use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;

/// Cache key for a memoized `explore(key, remaining_depth)` call. Keyed on
/// the full `(position_key, remaining_depth, alpha, beta)` tuple — the
/// conservative option the spec allows, sound regardless of whether the
/// caller always reseeds alpha/beta from the same configured window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub position_key: u128,
    pub remaining_depth: i32,
    pub alpha: i64,
    pub beta: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub magnitude: i64,
    pub winner: u32,
    pub column: Option<u32>,
}

/// LRU-bounded transposition cache. Capacity 0 disables caching entirely
/// rather than panicking on a zero-sized `LruCache`.
pub struct TranspositionTable {
    inner: Option<LruCache<CacheKey, CacheEntry>>,
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable").field("len", &self.len()).finish()
    }
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Self {
        Self { inner: NonZeroUsize::new(capacity).map(LruCache::new) }
    }

    /// A hit promotes the entry to most-recently-used.
    pub fn get(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let hit = self.inner.as_mut().and_then(|c| c.get(key).copied());
        if hit.is_some() {
            debug!("cache hit at depth {}", key.remaining_depth);
        }
        hit
    }

    /// Inserting past capacity evicts the least-recently-used entry.
    pub fn insert(&mut self, key: CacheKey, entry: CacheEntry) {
        if let Some(c) = self.inner.as_mut() {
            if c.len() == c.cap().get() && !c.contains(&key) {
                debug!("cache full at capacity {}, evicting LRU entry", c.cap());
            }
            c.put(key, entry);
        }
    }

    /// Required whenever `Configuration` changes (board size, K, P).
    pub fn clear(&mut self) {
        if let Some(c) = self.inner.as_mut() {
            c.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |c| c.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u128) -> CacheKey {
        CacheKey { position_key: n, remaining_depth: 5, alpha: -1, beta: 1 }
    }

    fn entry(m: i64) -> CacheEntry {
        CacheEntry { magnitude: m, winner: 1, column: Some(3) }
    }

    #[test]
    fn insert_then_get_hits() {
        let mut table = TranspositionTable::new(4);
        table.insert(key(1), entry(10));
        assert_eq!(table.get(&key(1)), Some(entry(10)));
    }

    #[test]
    fn zero_capacity_never_caches() {
        let mut table = TranspositionTable::new(0);
        table.insert(key(1), entry(10));
        assert_eq!(table.get(&key(1)), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut table = TranspositionTable::new(2);
        table.insert(key(1), entry(1));
        table.insert(key(2), entry(2));
        // touch key(1) so key(2) becomes the LRU entry.
        assert!(table.get(&key(1)).is_some());
        table.insert(key(3), entry(3));

        assert!(table.get(&key(1)).is_some());
        assert!(table.get(&key(2)).is_none());
        assert!(table.get(&key(3)).is_some());
    }

    #[test]
    fn clear_empties_the_table() {
        let mut table = TranspositionTable::new(4);
        table.insert(key(1), entry(1));
        table.clear();
        assert_eq!(table.len(), 0);
    }
}
