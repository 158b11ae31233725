//! Depth-keyed score cache for the negamax search.

use chess_core::{TranspositionTable, ZobristKey};
use serde::{Deserialize, Serialize};

/// What to do when a score is stored for a key that already has an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// The newest score always wins, even if it was searched shallower than
    /// the entry it replaces.
    #[default]
    AlwaysReplace,
    /// Keep an existing entry that was searched deeper than the new one.
    PreferDeeper,
}

/// Score of a node together with the remaining depth it was searched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: u8,
    pub score: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    entries: TranspositionTable<TtEntry>,
    policy: ReplacementPolicy,
}

impl ScoreTable {
    pub fn new(policy: ReplacementPolicy) -> Self {
        Self {
            entries: TranspositionTable::new(),
            policy,
        }
    }

    /// Cached score for `key`, only if it was searched at least `depth` deep.
    #[inline]
    pub fn probe(&self, key: ZobristKey, depth: u8) -> Option<i32> {
        self.entries
            .get(key)
            .filter(|e| e.depth >= depth)
            .map(|e| e.score)
    }

    pub fn store(&mut self, key: ZobristKey, depth: u8, score: i32) {
        if self.policy == ReplacementPolicy::PreferDeeper
            && self.entries.get(key).is_some_and(|e| e.depth > depth)
        {
            return;
        }
        self.entries.insert(key, TtEntry { depth, score });
    }

    pub fn entry(&self, key: ZobristKey) -> Option<TtEntry> {
        self.entries.get(key).copied()
    }

    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
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
    fn probe_requires_enough_depth() {
        let mut table = ScoreTable::new(ReplacementPolicy::AlwaysReplace);
        table.store(7, 2, 55);

        assert_eq!(table.probe(7, 0), Some(55));
        assert_eq!(table.probe(7, 2), Some(55));
        assert_eq!(table.probe(7, 3), None, "shallow entry must not answer a deeper query");
        assert_eq!(table.probe(8, 0), None);
    }

    #[test]
    fn always_replace_overwrites_deeper_entry() {
        let mut table = ScoreTable::new(ReplacementPolicy::AlwaysReplace);
        table.store(1, 4, 100);
        table.store(1, 1, -20);

        assert_eq!(table.entry(1), Some(TtEntry { depth: 1, score: -20 }));
        assert_eq!(table.probe(1, 2), None);
    }

    #[test]
    fn prefer_deeper_keeps_deeper_entry() {
        let mut table = ScoreTable::new(ReplacementPolicy::PreferDeeper);
        table.store(1, 4, 100);
        table.store(1, 1, -20);
        assert_eq!(table.entry(1), Some(TtEntry { depth: 4, score: 100 }));

        // Equal or greater depth still replaces.
        table.store(1, 4, 90);
        assert_eq!(table.probe(1, 4), Some(90));
        table.store(1, 6, 80);
        assert_eq!(table.entry(1), Some(TtEntry { depth: 6, score: 80 }));
        assert_eq!(table.len(), 1);
    }
}
