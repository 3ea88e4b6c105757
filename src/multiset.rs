//! Ordered multiset backed by an occurrence-count map.
//!
//! Shadows an insertion-ordered container (ring buffer or bounded list)
//! and answers "all elements in sorted order, with duplicates" without
//! re-sorting: O(log n) increment/decrement, O(n) in-order expansion.
//!
//! Duplicates are indistinguishable: within equal keys there is no
//! defined inter-occurrence order.
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::multiset::OrderedMultiset;
//!
//! let mut set = OrderedMultiset::new();
//! set.increment(3);
//! set.increment(1);
//! set.increment(3);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.count_of(&3), 2);
//! assert_eq!(set.expanded(), vec![1, 3, 3]);
//!
//! assert!(set.decrement(&3));
//! assert_eq!(set.expanded(), vec![1, 3]);
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
/// Ordered key → occurrence-count map with O(log n) updates.
pub struct OrderedMultiset<K> {
    counts: BTreeMap<K, usize>,
    /// Total occurrences across all keys; kept so `len` is O(1).
    len: usize,
}

impl<K: Ord> OrderedMultiset<K> {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            len: 0,
        }
    }

    /// Total number of occurrences (the logical size of the shadowed
    /// container).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no occurrences are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct keys.
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if `k` has at least one occurrence.
    pub fn contains(&self, k: &K) -> bool {
        self.counts.contains_key(k)
    }

    /// Occurrence count for `k` (zero when absent).
    pub fn count_of(&self, k: &K) -> usize {
        self.counts.get(k).copied().unwrap_or(0)
    }

    /// Adds one occurrence of `k`.
    pub fn increment(&mut self, k: K) {
        *self.counts.entry(k).or_insert(0) += 1;
        self.len += 1;
    }

    /// Removes one occurrence of `k`; the key disappears when its count
    /// reaches zero.
    ///
    /// Returns `false` (no-op) when `k` is absent; a count can never go
    /// negative.
    pub fn decrement(&mut self, k: &K) -> bool {
        match self.counts.get_mut(k) {
            Some(count) if *count > 1 => {
                *count -= 1;
            }
            Some(_) => {
                self.counts.remove(k);
            }
            None => return false,
        }
        self.len -= 1;
        true
    }

    /// Iterates `(key, occurrence_count)` pairs in ascending key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, &count)| (k, count))
    }

    /// Removes all occurrences.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.len = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let total: usize = self.counts.values().sum();
        assert_eq!(total, self.len);
        assert!(self.counts.values().all(|&count| count > 0));
    }
}

impl<K: Ord> Default for OrderedMultiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> OrderedMultiset<K> {
    /// Appends the fully expanded multiset to `out`: each key repeated
    /// `count` times, ascending. O(n) total.
    pub fn expand_into(&self, out: &mut Vec<K>) {
        out.reserve(self.len);
        for (k, count) in self.iter() {
            for _ in 0..count {
                out.push(k.clone());
            }
        }
    }

    /// Returns the fully expanded multiset in ascending key order.
    pub fn expanded(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len);
        self.expand_into(&mut out);
        out
    }
}
