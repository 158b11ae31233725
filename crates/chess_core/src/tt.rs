//! Transposition table: a map from [`ZobristKey`] to a search-specific payload.
//!
//! The table has no eviction; entries live until they are overwritten or the
//! table is cleared. Each strategy owns its own table and touches it from a
//! single thread, so no locking is done. Sharing one across search threads
//! would need sharded locks or a lock-free map.

use rustc_hash::FxHashMap;

use crate::zobrist::ZobristKey;

#[derive(Debug, Clone)]
pub struct TranspositionTable<V> {
    entries: FxHashMap<ZobristKey, V>,
}

impl<V> Default for TranspositionTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TranspositionTable<V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn get(&self, key: ZobristKey) -> Option<&V> {
        self.entries.get(&key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: ZobristKey) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    /// Stores `value` under `key`, returning the entry it replaced.
    #[inline]
    pub fn insert(&mut self, key: ZobristKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn contains(&self, key: ZobristKey) -> bool {
        self.entries.contains_key(&key)
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut tt = TranspositionTable::new();
        assert!(tt.insert(1, "a").is_none());
        assert_eq!(tt.insert(1, "b"), Some("a"));
        assert_eq!(tt.get(1), Some(&"b"));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn clear_empties_table() {
        let mut tt = TranspositionTable::new();
        tt.insert(3, 30);
        tt.insert(4, 40);
        if let Some(v) = tt.get_mut(3) {
            *v += 1;
        }
        assert_eq!(tt.get(3), Some(&31));
        tt.clear();
        assert!(tt.is_empty());
        assert!(!tt.contains(4));
    }
}
