//! Bounded list with an order-maintained overlay.
//!
//! Pairs a [`BoundedList`] (insertion order, eviction) with an
//! [`OrderedMultiset`](crate::multiset::OrderedMultiset) mirror so the
//! same window can be read back sorted without re-sorting on every
//! query. Every mutation updates both sides, including evictions, so
//! the mirror always expands to exactly the list's contents.

use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::list::arena::NodeId;
use crate::list::bounded::BoundedList;
use crate::multiset::OrderedMultiset;

#[derive(Debug)]
/// A [`BoundedList`] whose contents are also readable in sorted order.
pub struct SortedBoundedList<T: Ord + Clone> {
    list: BoundedList<T>,
    set: OrderedMultiset<T>,
}

impl<T: Ord + Clone> SortedBoundedList<T> {
    /// Creates a sorted bounded list holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: BoundedList::new(capacity),
            set: OrderedMultiset::new(),
        }
    }

    /// Fallible constructor for configuration paths.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            list: BoundedList::try_new(capacity)?,
            set: OrderedMultiset::new(),
        })
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the maximum number of values.
    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// Returns `true` when the next push will evict.
    pub fn is_full(&self) -> bool {
        self.list.is_full()
    }

    /// Appends at the back, evicting the front when full.
    pub fn push_back(&mut self, value: T) -> (NodeId, Option<T>) {
        self.set.increment(value.clone());
        let (id, evicted) = self.list.push_back(value);
        if let Some(ref old) = evicted {
            self.set.decrement(old);
        }
        (id, evicted)
    }

    /// Prepends at the front, evicting the back when full.
    pub fn push_front(&mut self, value: T) -> (NodeId, Option<T>) {
        self.set.increment(value.clone());
        let (id, evicted) = self.list.push_front(value);
        if let Some(ref old) = evicted {
            self.set.decrement(old);
        }
        (id, evicted)
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        let value = self.list.pop_front()?;
        self.set.decrement(&value);
        Some(value)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let value = self.list.pop_back()?;
        self.set.decrement(&value);
        Some(value)
    }

    /// Removes the node `id` and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or not in this list.
    pub fn remove(&mut self, id: NodeId) -> T {
        let value = self.list.remove(id);
        self.set.decrement(&value);
        value
    }

    /// Returns the front (insertion order) value.
    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    /// Returns the back (insertion order) value.
    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    /// Returns the value for `id`, if the handle is live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.list.get(id)
    }

    /// Returns the smallest stored value.
    pub fn min(&self) -> Option<&T> {
        self.set.iter().next().map(|(k, _)| k)
    }

    /// Returns the largest stored value.
    pub fn max(&self) -> Option<&T> {
        self.set.iter().next_back().map(|(k, _)| k)
    }

    /// Changes the capacity, evicting oldest-first when shrinking.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    pub fn set_capacity(&mut self, new_capacity: usize) -> Vec<T> {
        let evicted = self.list.set_capacity(new_capacity);
        for value in &evicted {
            self.set.decrement(value);
        }
        evicted
    }

    /// Materializes the values in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.list.to_vec()
    }

    /// Materializes the values in ascending order.
    pub fn sorted_vec(&self) -> Vec<T> {
        self.set.expanded()
    }

    /// Writes the values in ascending order into `out` (cleared first),
    /// reusing its allocation across calls.
    pub fn sorted_into(&self, out: &mut Vec<T>) {
        out.clear();
        self.set.expand_into(out);
    }

    /// Removes all values. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.list.clear();
        self.set.clear();
    }

    /// Verifies that the sorted mirror expands to exactly the list's
    /// contents.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.set.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "sorted mirror holds {} values but list holds {}",
                self.set.len(),
                self.list.len()
            )));
        }
        let mut from_list = self.list.to_vec();
        from_list.sort();
        let from_set = self.set.expanded();
        if from_list != from_set {
            return Err(InvariantError::new(
                "sorted mirror diverged from list contents".to_string(),
            ));
        }
        self.list.debug_validate_invariants();
        self.set.debug_validate_invariants();
        Ok(())
    }
}
