//! Thread-safe wrapper around [`BoundedList`] using a `parking_lot::Mutex`.
//!
//! Every method acquires the lock for the duration of the call, so
//! individual operations are atomic but sequences of calls are not.
//! Values are read through `_with` closures rather than returned
//! references, which keeps lock guards from escaping the wrapper.
//!
//! Node handles are not exposed here: a handle taken under
//! one lock acquisition could go stale before the next, so the API stays
//! at the ends of the list.

use parking_lot::Mutex;

use crate::error::ConfigError;
use crate::list::bounded::BoundedList;

#[derive(Debug)]
/// Mutex-guarded bounded list for sharing across threads.
pub struct SyncBoundedList<T> {
    inner: Mutex<BoundedList<T>>,
}

impl<T> SyncBoundedList<T> {
    /// Creates a bounded list holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(BoundedList::new(capacity)),
        }
    }

    /// Fallible constructor for configuration paths.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Mutex::new(BoundedList::try_new(capacity)?),
        })
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum number of values.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns `true` when the next push will evict.
    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    /// Appends at the back, returning the evicted front value when full.
    pub fn push_back(&self, value: T) -> Option<T> {
        self.inner.lock().push_back(value).1
    }

    /// Tries to append at the back without blocking. Returns `None` when
    /// the lock is contended, `Some(evicted)` otherwise.
    pub fn try_push_back(&self, value: T) -> Option<Option<T>> {
        let mut list = self.inner.try_lock()?;
        Some(list.push_back(value).1)
    }

    /// Prepends at the front, returning the evicted back value when full.
    pub fn push_front(&self, value: T) -> Option<T> {
        self.inner.lock().push_front(value).1
    }

    /// Removes and returns the front value.
    pub fn pop_front(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    /// Removes and returns the back value.
    pub fn pop_back(&self) -> Option<T> {
        self.inner.lock().pop_back()
    }

    /// Runs `f` on a shared reference to the front value, if any.
    pub fn front_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let list = self.inner.lock();
        list.front().map(f)
    }

    /// Runs `f` on a shared reference to the back value, if any.
    pub fn back_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let list = self.inner.lock();
        list.back().map(f)
    }

    /// Changes the capacity, returning values evicted oldest-first.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    pub fn set_capacity(&self, new_capacity: usize) -> Vec<T> {
        self.inner.lock().set_capacity(new_capacity)
    }

    /// Removes all values. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access to the whole list, for compound
    /// operations that must be atomic.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut BoundedList<T>) -> R) -> R {
        let mut list = self.inner.lock();
        f(&mut list)
    }
}

impl<T: Clone> SyncBoundedList<T> {
    /// Materializes the values front → back.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.lock().to_vec()
    }
}
