//! Memo table with lookup counters.
//!
//! The diagram builder keeps two of them per call: the construction table
//! keyed by `(index, sum)` and the unique table keyed by [`Gate`]. Both map to
//! a [`GateId`], and their hit counts end up in [`BddStats`].
//!
//! [`Gate`]: crate::gate::Gate
//! [`GateId`]: crate::gate::GateId
//! [`BddStats`]: crate::bdd::BddStats

use std::collections::HashMap;
use std::hash::Hash;

pub(crate) struct Cache<K, V> {
    entries: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Successful lookups so far.
    pub(crate) fn hits(&self) -> usize {
        self.hits
    }

    pub(crate) fn misses(&self) -> usize {
        self.misses
    }

    #[inline]
    pub(crate) fn get(&mut self, key: &K) -> Option<V> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Entries are never replaced: a node, once built, stays the answer for its key.
    #[inline]
    pub(crate) fn insert(&mut self, key: K, value: V) {
        self.entries.entry(key).or_insert(value);
    }
}
