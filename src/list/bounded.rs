//! Capacity-bounded list with eviction at the far end.
//!
//! Wraps [`LinkedList`] with a hard element cap. Pushing into a full
//! list evicts from the opposite end and hands the evicted value back to
//! the caller, so recency windows never silently drop data.
//!
//! ## Operations
//!
//! | Operation        | Behavior when full                       | Complexity |
//! |------------------|------------------------------------------|------------|
//! | `push_back`      | evicts front (oldest), returns it        | O(1)       |
//! | `push_front`     | evicts back (newest), returns it         | O(1)       |
//! | `set_capacity`   | evicts oldest-first down to the new cap  | O(evicted) |

use crate::error::ConfigError;
use crate::list::arena::NodeId;
use crate::list::linked::{Iter, LinkedList};

#[derive(Debug)]
/// A [`LinkedList`] that never holds more than `capacity` values.
pub struct BoundedList<T> {
    list: LinkedList<T>,
    capacity: usize,
}

impl<T> BoundedList<T> {
    /// Creates a bounded list holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self {
            list: LinkedList::with_capacity(capacity),
            capacity,
        }
    }

    /// Fallible constructor for configuration paths.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self::new(capacity))
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
        self.capacity
    }

    /// Returns `true` when the next push will evict.
    pub fn is_full(&self) -> bool {
        self.list.len() == self.capacity
    }

    /// Appends at the back. When full, the front (oldest) value is
    /// evicted and returned.
    pub fn push_back(&mut self, value: T) -> (NodeId, Option<T>) {
        let evicted = if self.is_full() {
            self.list.pop_front()
        } else {
            None
        };
        (self.list.push_back(value), evicted)
    }

    /// Prepends at the front. When full, the back (newest) value is
    /// evicted and returned.
    pub fn push_front(&mut self, value: T) -> (NodeId, Option<T>) {
        let evicted = if self.is_full() {
            self.list.pop_back()
        } else {
            None
        };
        (self.list.push_front(value), evicted)
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Removes the node `id` and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or not in this list.
    pub fn remove(&mut self, id: NodeId) -> T {
        self.list.remove(id)
    }

    /// Returns the front value.
    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    /// Returns the back value.
    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    /// Returns the handle of the front node.
    pub fn front_id(&self) -> Option<NodeId> {
        self.list.front_id()
    }

    /// Returns the handle of the back node.
    pub fn back_id(&self) -> Option<NodeId> {
        self.list.back_id()
    }

    /// Returns the value for `id`, if the handle is live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.list.get(id)
    }

    /// Returns a mutable reference to the value for `id`, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.list.get_mut(id)
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: NodeId) -> bool {
        self.list.contains(id)
    }

    /// Changes the capacity. Shrinking evicts oldest-first; the evicted
    /// values are returned in eviction order.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    pub fn set_capacity(&mut self, new_capacity: usize) -> Vec<T> {
        assert!(new_capacity > 0, "capacity must be greater than zero");
        let mut evicted = Vec::new();
        while self.list.len() > new_capacity {
            if let Some(value) = self.list.pop_front() {
                evicted.push(value);
            }
        }
        self.capacity = new_capacity;
        evicted
    }

    /// Iterates values front → back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Removes all values. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.capacity > 0);
        assert!(self.list.len() <= self.capacity);
        self.list.debug_validate_invariants();
    }
}

impl<T: Clone> BoundedList<T> {
    /// Materializes the values front → back.
    pub fn to_vec(&self) -> Vec<T> {
        self.list.to_vec()
    }
}
