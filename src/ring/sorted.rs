//! Ring buffer with an order-statistics overlay.
//!
//! Pairs a [`RingBuffer`] (authoritative insertion order and capacity
//! enforcement) with an [`OrderedMultiset`] (authoritative sorted view).
//! The two halves are mutated together: every insertion is mirrored by an
//! increment, every eviction by a decrement, so the sorted view is always
//! available in O(n) without re-sorting the window.
//!
//! When the ring is full, `push` explicitly pops the oldest element
//! before inserting; the popped value is what gets decremented. Relying
//! on the ring's silent overwrite instead would lose track of which value
//! left the window.
//!
//! Capacity is fixed for the lifetime of the view: shrinking the circular
//! store drops elements without surfacing which values were dropped,
//! which would desynchronize the multiset short of a full rebuild. Use
//! [`SortedBoundedList`](crate::list::SortedBoundedList) when runtime
//! resize is needed.
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ring::SortedRingBuffer;
//!
//! let mut buf = SortedRingBuffer::new(3);
//! buf.push(4);
//! buf.push(3);
//! buf.push(2);
//! buf.push(1); // evicts 4
//!
//! assert_eq!(buf.to_vec(), vec![3, 2, 1]);
//! assert_eq!(buf.sorted_vec(), vec![1, 2, 3]);
//! ```

use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::multiset::OrderedMultiset;
use crate::ring::buffer::RingBuffer;

#[derive(Debug, Clone)]
/// Fixed-capacity ring buffer shadowed by a sorted multiset view.
pub struct SortedRingBuffer<T> {
    ring: RingBuffer<T>,
    set: OrderedMultiset<T>,
}

impl<T: Ord + Clone> SortedRingBuffer<T> {
    /// Creates a sorted ring with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
            set: OrderedMultiset::new(),
        }
    }

    /// Fallible constructor for user-configurable capacities.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            ring: RingBuffer::try_new(capacity)?,
            set: OrderedMultiset::new(),
        })
    }

    /// Returns the number of stored elements.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns `true` if the next `push` will evict the oldest element.
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Appends `v`, evicting (and returning) the oldest element when full.
    ///
    /// The eviction is performed as an explicit pop-before-insert so the
    /// multiset can be decremented with the exact value that left.
    pub fn push(&mut self, v: T) -> Option<T> {
        let evicted = if self.ring.is_full() {
            self.pop_front()
        } else {
            None
        };
        self.set.increment(v.clone());
        let overwritten = self.ring.push(v);
        debug_assert!(overwritten.is_none());
        evicted
    }

    /// Removes and returns the logically oldest element.
    pub fn pop_front(&mut self) -> Option<T> {
        let value = self.ring.pop_front()?;
        let removed = self.set.decrement(&value);
        debug_assert!(removed);
        Some(value)
    }

    /// Returns the oldest element without removing it.
    pub fn front(&self) -> Option<&T> {
        self.ring.front()
    }

    /// Returns the newest element without removing it.
    pub fn back(&self) -> Option<&T> {
        self.ring.back()
    }

    /// Returns the element at logical index `i` (negative = from newest).
    pub fn get(&self, i: isize) -> Option<&T> {
        self.ring.get(i)
    }

    /// Iterates the window in insertion order (oldest → newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.ring.iter()
    }

    /// Materializes the window in insertion order (oldest → newest).
    pub fn to_vec(&self) -> Vec<T> {
        self.ring.to_vec()
    }

    /// Materializes the window in ascending order, duplicates included.
    pub fn sorted_vec(&self) -> Vec<T> {
        self.set.expanded()
    }

    /// Writes the ascending view into `buf` (cleared first), reusing its
    /// allocation across calls.
    pub fn sorted_into(&self, buf: &mut Vec<T>) {
        buf.clear();
        self.set.expand_into(buf);
    }

    /// Resets both halves to empty; capacity is retained.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.set.clear();
    }

    #[cfg(any(test, debug_assertions))]
    /// Verifies that the multiset still mirrors the ring exactly.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.set.len() != self.ring.len() {
            return Err(InvariantError::new(format!(
                "multiset length {} does not match ring length {}",
                self.set.len(),
                self.ring.len()
            )));
        }
        let mut expect = self.ring.to_vec();
        expect.sort_unstable();
        if self.set.expanded() != expect {
            return Err(InvariantError::new(
                "multiset expansion does not match sorted window",
            ));
        }
        Ok(())
    }
}
