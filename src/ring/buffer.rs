//! Fixed-capacity circular buffer with runtime resize.
//!
//! Stores the last `capacity` pushed values in a circular array, providing
//! O(1) insertion with overwrite-oldest-on-full, logical indexing from
//! either end, and an explicit `resize` that preserves logical order and
//! recency. Essential for sliding windows over ticks, events, and metrics
//! where memory must stay fixed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        RingBuffer<T> Layout                         │
//! │                                                                     │
//! │   data: Vec<Option<T>>        tail: next write slot                 │
//! │   count: logical length       head = (tail - count) mod cap         │
//! │                                                                     │
//! │   After push(1), push(2), push(3), push(4) at capacity 3:           │
//! │                                                                     │
//! │   Index:     0     1     2                                          │
//! │            ┌─────┬─────┬─────┐                                      │
//! │   data:    │  4  │  2  │  3  │                                      │
//! │            └─────┴─────┴─────┘                                      │
//! │                    ▲                                                │
//! │                    │                                                │
//! │              head = tail = 1 (full: next write overwrites 2)        │
//! │                                                                     │
//! │   Logical window (oldest → newest): 2, 3, 4                         │
//! │   get(i) maps logical i to physical (head + i) mod cap              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Description                             | Complexity |
//! |------------------|-----------------------------------------|------------|
//! | [`push`]         | Append, overwriting oldest when full    | O(1)       |
//! | [`pop_front`]    | Remove the logically oldest value       | O(1)       |
//! | [`get`]          | Logical index, negative = from newest   | O(1)       |
//! | [`resize`]       | Change capacity, preserving order       | O(n)       |
//! | [`to_vec`]       | Materialize oldest → newest             | O(n)       |
//! | [`sorted_into`]  | Copy + ascending sort into a buffer     | O(n log n) |
//!
//! [`push`]: RingBuffer::push
//! [`pop_front`]: RingBuffer::pop_front
//! [`get`]: RingBuffer::get
//! [`resize`]: RingBuffer::resize
//! [`to_vec`]: RingBuffer::to_vec
//! [`sorted_into`]: RingBuffer::sorted_into
//!
//! ## Resize semantics
//!
//! Growth never reorders, drops, or duplicates elements: the wrapped tail
//! fragment is spliced into the newly appended slots. Shrinking keeps the
//! most recently pushed `min(count, new_capacity)` elements and returns
//! the dropped (oldest) ones, consistent with "a ring buffer forgets the
//! oldest data first".
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ring::RingBuffer;
//!
//! let mut buf = RingBuffer::new(3);
//! buf.push(1);
//! buf.push(2);
//! buf.push(3);
//! buf.push(4); // overwrites 1
//!
//! assert_eq!(buf.to_vec(), vec![2, 3, 4]);
//! assert_eq!(buf.get(0), Some(&2));   // oldest
//! assert_eq!(buf.get(-1), Some(&4));  // newest
//!
//! // Growing mid-wrap preserves the logical sequence.
//! let dropped = buf.resize(5);
//! assert!(dropped.is_empty());
//! assert_eq!(buf.to_vec(), vec![2, 3, 4]);
//! ```

use std::cmp::Ordering;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
/// Fixed-capacity circular buffer that overwrites the oldest element when full.
pub struct RingBuffer<T> {
    data: Vec<Option<T>>,
    /// Physical index of the next write slot.
    tail: usize,
    /// Logical length, `0 <= count <= capacity`.
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a buffer with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity ring has no valid
    /// write slot and every index computation would divide by zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be > 0");
        let mut data = Vec::with_capacity(capacity);
        data.resize_with(capacity, || None);
        Self {
            data,
            tail: 0,
            count: 0,
        }
    }

    /// Fallible constructor for user-configurable capacities.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("ring buffer capacity must be > 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Returns the number of stored elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current capacity.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the next `push` will overwrite the oldest element.
    pub fn is_full(&self) -> bool {
        self.count == self.data.len()
    }

    /// Physical index of the logically oldest element.
    fn head(&self) -> usize {
        let cap = self.data.len();
        (self.tail + cap - self.count) % cap
    }

    /// Appends `v`, overwriting (and returning) the oldest element when full.
    pub fn push(&mut self, v: T) -> Option<T> {
        let cap = self.data.len();
        // When full, head == tail, so the slot being written holds the oldest.
        let evicted = self.data[self.tail].replace(v);
        self.tail = (self.tail + 1) % cap;
        if self.count < cap {
            self.count += 1;
            debug_assert!(evicted.is_none());
        }
        evicted
    }

    /// Returns the element at logical index `i`.
    ///
    /// `i >= 0` counts from the oldest element (0-based); `i < 0` counts
    /// from the newest (`-1` = newest). Returns `None` outside
    /// `[-len, len)`.
    pub fn get(&self, i: isize) -> Option<&T> {
        let count = self.count as isize;
        if i < -count || i >= count {
            return None;
        }
        let logical = if i < 0 { count + i } else { i } as usize;
        let phys = (self.head() + logical) % self.data.len();
        self.data[phys].as_ref()
    }

    /// Removes and returns the logically oldest element.
    ///
    /// The vacated slot stays physically present and is overwritten by
    /// future writes; no compaction happens.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let head = self.head();
        let value = self.data[head].take();
        self.count -= 1;
        value
    }

    /// Returns the oldest element without removing it.
    pub fn front(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        self.data[self.head()].as_ref()
    }

    /// Returns the newest element without removing it.
    pub fn back(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        let cap = self.data.len();
        self.data[(self.tail + cap - 1) % cap].as_ref()
    }

    /// Iterates oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let head = self.head();
        let cap = self.data.len();
        (0..self.count).map(move |i| {
            self.data[(head + i) % cap]
                .as_ref()
                .expect("window slot missing")
        })
    }

    /// Changes the capacity to `new_capacity`, preserving logical order.
    ///
    /// Growing relocates the wrapped tail fragment into the appended slots
    /// and never reorders, drops, or duplicates. Shrinking keeps the most
    /// recently pushed `min(len, new_capacity)` elements and returns the
    /// dropped (oldest) ones in eviction order.
    ///
    /// # Panics
    ///
    /// Panics if `new_capacity` is zero.
    pub fn resize(&mut self, new_capacity: usize) -> Vec<T> {
        assert!(new_capacity > 0, "ring buffer capacity must be > 0");
        let old_cap = self.data.len();
        match new_capacity.cmp(&old_cap) {
            Ordering::Equal => Vec::new(),
            Ordering::Greater => {
                self.grow(new_capacity);
                Vec::new()
            }
            Ordering::Less => self.shrink(new_capacity),
        }
    }

    fn grow(&mut self, new_capacity: usize) {
        let old_cap = self.data.len();
        let delta = new_capacity - old_cap;
        let head = self.head();
        // The window wraps when tail sits at or before head while elements
        // exist; a full buffer with tail == head also counts.
        let wrapped = self.tail < head || self.count == old_cap;
        self.data.resize_with(new_capacity, || None);
        if !wrapped {
            return;
        }
        if self.tail <= delta {
            // The whole wrapped fragment [0, tail) fits in the appended slots.
            for i in 0..self.tail {
                self.data[old_cap + i] = self.data[i].take();
            }
            self.tail = (self.tail + old_cap) % new_capacity;
        } else {
            // Move the first `delta` of the fragment, shift the rest left.
            for i in 0..delta {
                self.data[old_cap + i] = self.data[i].take();
            }
            for i in delta..self.tail {
                self.data[i - delta] = self.data[i].take();
            }
            self.tail -= delta;
        }
    }

    fn shrink(&mut self, new_capacity: usize) -> Vec<T> {
        let kept = self.count.min(new_capacity);
        let mut dropped = Vec::with_capacity(self.count - kept);
        while self.count > kept {
            dropped.push(self.pop_front().expect("window slot missing"));
        }
        let mut keep = Vec::with_capacity(kept);
        while let Some(v) = self.pop_front() {
            keep.push(v);
        }
        let mut data = Vec::with_capacity(new_capacity);
        data.resize_with(new_capacity, || None);
        for (i, v) in keep.into_iter().enumerate() {
            data[i] = Some(v);
        }
        self.data = data;
        self.count = kept;
        self.tail = kept % new_capacity;
        dropped
    }

    /// Resets to empty; capacity is retained.
    pub fn clear(&mut self) {
        for slot in &mut self.data {
            *slot = None;
        }
        self.tail = 0;
        self.count = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let cap = self.data.len();
        assert!(cap > 0);
        assert!(self.count <= cap);
        assert!(self.tail < cap);
        let head = self.head();
        for i in 0..cap {
            let in_window = (0..self.count).any(|j| (head + j) % cap == i);
            assert_eq!(self.data[i].is_some(), in_window, "slot {i} out of place");
        }
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Materializes the logical contents oldest → newest.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Copies the logical contents into `out` (oldest → newest).
    ///
    /// # Panics
    ///
    /// Panics unless `out.len()` equals `self.len()`.
    pub fn copy_to_slice(&self, out: &mut [T]) {
        assert_eq!(
            out.len(),
            self.count,
            "output slice length does not match ring buffer length"
        );
        for (slot, v) in out.iter_mut().zip(self.iter()) {
            slot.clone_from(v);
        }
    }
}

impl<T: Clone + Ord> RingBuffer<T> {
    /// Copies the contents and sorts ascending.
    pub fn to_sorted_vec(&self) -> Vec<T> {
        let mut out = self.to_vec();
        out.sort_unstable();
        out
    }

    /// Copies the contents into `buf` (cleared first) and sorts ascending.
    ///
    /// Reuses `buf`'s allocation across calls; undefined for key types
    /// without a total order — use [`sorted_into_by`](Self::sorted_into_by)
    /// for floats.
    pub fn sorted_into(&self, buf: &mut Vec<T>) {
        buf.clear();
        buf.extend(self.iter().cloned());
        buf.sort_unstable();
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copies the contents into `buf` (cleared first) and sorts with `cmp`.
    ///
    /// This is the NaN-tolerant materialization path: with a total-order
    /// comparator such as [`f64::total_cmp`], every incomparable value is
    /// preserved (exact count) and lands at a deterministic position while
    /// the remaining values are correctly ordered.
    ///
    /// ```
    /// use ringkit::ring::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new(4);
    /// buf.push(2.0_f64);
    /// buf.push(f64::NAN);
    /// buf.push(1.0);
    ///
    /// let mut sorted = Vec::new();
    /// buf.sorted_into_by(&mut sorted, f64::total_cmp);
    /// assert_eq!(&sorted[..2], &[1.0, 2.0]);
    /// assert!(sorted[2].is_nan());
    /// ```
    pub fn sorted_into_by(&self, buf: &mut Vec<T>, mut cmp: impl FnMut(&T, &T) -> Ordering) {
        buf.clear();
        buf.extend(self.iter().cloned());
        buf.sort_unstable_by(&mut cmp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_within_capacity_keeps_order() {
        let mut buf = RingBuffer::new(3);
        assert!(buf.is_empty());
        assert_eq!(buf.push(1), None);
        assert_eq!(buf.push(2), None);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.to_vec(), vec![1, 2]);
        assert_eq!(buf.front(), Some(&1));
        assert_eq!(buf.back(), Some(&2));
        buf.debug_validate_invariants();
    }

    #[test]
    fn push_over_capacity_overwrites_oldest() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert!(buf.is_full());
        assert_eq!(buf.push(4), Some(1));
        assert_eq!(buf.to_vec(), vec![2, 3, 4]);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.front(), Some(&2));
        buf.debug_validate_invariants();
    }

    #[test]
    fn get_indexes_from_both_ends() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        assert_eq!(buf.get(0), Some(&1));
        assert_eq!(buf.get(-1), Some(&1));

        buf.push(2);
        buf.push(3);
        buf.push(4);
        assert_eq!(buf.get(0), Some(&2));
        assert_eq!(buf.get(1), Some(&3));
        assert_eq!(buf.get(2), Some(&4));
        assert_eq!(buf.get(-1), Some(&4));
        assert_eq!(buf.get(-2), Some(&3));
        assert_eq!(buf.get(-3), Some(&2));
        assert_eq!(buf.get(3), None);
        assert_eq!(buf.get(-4), None);
    }

    #[test]
    fn get_agrees_with_to_vec() {
        let mut buf = RingBuffer::new(4);
        for v in 0..9 {
            buf.push(v);
        }
        let window = buf.to_vec();
        let count = buf.len() as isize;
        for i in 0..count {
            assert_eq!(buf.get(i), Some(&window[i as usize]));
            assert_eq!(buf.get(i - count), Some(&window[i as usize]));
        }
        assert_eq!(buf.get(0), buf.front());
        assert_eq!(buf.get(-1), buf.back());
    }

    #[test]
    fn pop_front_removes_oldest() {
        let mut buf = RingBuffer::new(3);
        assert_eq!(buf.pop_front(), None);
        buf.push(1);
        buf.push(2);
        assert_eq!(buf.pop_front(), Some(1));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.to_vec(), vec![2]);
        assert_eq!(buf.pop_front(), Some(2));
        assert_eq!(buf.pop_front(), None);
        buf.debug_validate_invariants();
    }

    #[test]
    fn pop_then_push_reuses_slots() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        buf.push(2);
        buf.push(3);
        assert_eq!(buf.pop_front(), Some(1));
        buf.push(4);
        buf.push(5); // overwrites 2
        assert_eq!(buf.to_vec(), vec![3, 4, 5]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn grow_without_wrap_is_a_plain_extension() {
        let mut buf = RingBuffer::new(4);
        buf.push(1);
        buf.push(2);
        assert!(buf.resize(6).is_empty());
        assert_eq!(buf.capacity(), 6);
        assert_eq!(buf.to_vec(), vec![1, 2]);
        buf.push(3);
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn grow_mid_wrap_preserves_order() {
        let mut buf = RingBuffer::new(3);
        for v in 1..=5 {
            buf.push(v); // window [3, 4, 5], wrapped
        }
        assert!(buf.resize(5).is_empty());
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.to_vec(), vec![3, 4, 5]);
        buf.push(6);
        buf.push(7);
        assert_eq!(buf.to_vec(), vec![3, 4, 5, 6, 7]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn grow_with_tail_past_delta_shifts_fragment() {
        // tail > delta exercises the split-fragment branch.
        let mut buf = RingBuffer::new(4);
        for v in 1..=7 {
            buf.push(v); // tail = 3, window [4, 5, 6, 7]
        }
        assert!(buf.resize(5).is_empty());
        assert_eq!(buf.to_vec(), vec![4, 5, 6, 7]);
        buf.push(8);
        assert_eq!(buf.to_vec(), vec![4, 5, 6, 7, 8]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn grow_full_buffer_with_tail_at_zero() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        buf.push(2);
        buf.push(3); // tail wraps back to 0, full and contiguous
        assert!(buf.resize(5).is_empty());
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
        buf.push(4);
        assert_eq!(buf.to_vec(), vec![1, 2, 3, 4]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn shrink_keeps_most_recent_and_reports_dropped() {
        let mut buf = RingBuffer::new(5);
        for v in 1..=5 {
            buf.push(v);
        }
        let dropped = buf.resize(3);
        assert_eq!(dropped, vec![1, 2]);
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.to_vec(), vec![3, 4, 5]);
        assert!(buf.is_full());
        assert_eq!(buf.push(6), Some(3));
        assert_eq!(buf.to_vec(), vec![4, 5, 6]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn shrink_below_count_then_push_lands_correctly() {
        let mut buf = RingBuffer::new(5);
        buf.push(1);
        buf.push(2);
        let dropped = buf.resize(4);
        assert!(dropped.is_empty());
        buf.push(3);
        buf.push(4);
        buf.push(5); // now full at the new capacity
        assert_eq!(buf.to_vec(), vec![2, 3, 4, 5]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn resize_to_same_capacity_is_a_noop() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        buf.push(2);
        assert!(buf.resize(3).is_empty());
        assert_eq!(buf.to_vec(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_construction_panics() {
        let _ = RingBuffer::<u64>::new(0);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_resize_panics() {
        let mut buf = RingBuffer::new(2);
        buf.push(1);
        buf.resize(0);
    }

    #[test]
    fn try_new_rejects_zero_capacity() {
        let err = RingBuffer::<u64>::try_new(0).unwrap_err();
        assert!(err.to_string().contains("capacity"));
        assert!(RingBuffer::<u64>::try_new(1).is_ok());
    }

    #[test]
    fn clear_resets_but_keeps_capacity() {
        let mut buf = RingBuffer::new(3);
        buf.push(9);
        buf.push(8);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.front(), None);
        assert_eq!(buf.back(), None);
        assert_eq!(buf.get(0), None);
        assert_eq!(buf.to_vec(), Vec::<i32>::new());
        buf.push(7);
        assert_eq!(buf.to_vec(), vec![7]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn copy_to_slice_fills_exact_window() {
        let mut buf = RingBuffer::new(3);
        for v in 1..=5 {
            buf.push(v);
        }
        let mut out = [0; 3];
        buf.copy_to_slice(&mut out);
        assert_eq!(out, [3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn copy_to_slice_length_mismatch_panics() {
        let mut buf = RingBuffer::new(3);
        buf.push(1);
        let mut out = [0; 3];
        buf.copy_to_slice(&mut out);
    }

    #[test]
    fn sorted_views_order_ascending() {
        let mut buf = RingBuffer::new(5);
        for v in [5, 1, 3, 4, 2] {
            buf.push(v);
        }
        assert_eq!(buf.to_vec(), vec![5, 1, 3, 4, 2]);
        assert_eq!(buf.to_sorted_vec(), vec![1, 2, 3, 4, 5]);

        let mut reuse = Vec::new();
        buf.sorted_into(&mut reuse);
        assert_eq!(reuse, vec![1, 2, 3, 4, 5]);
        // Second call reuses the same allocation.
        buf.sorted_into(&mut reuse);
        assert_eq!(reuse, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sorted_into_by_total_cmp_preserves_nans() {
        let mut buf = RingBuffer::new(6);
        for v in [2.0_f64, f64::NAN, 0.5, f64::NAN, 1.5] {
            buf.push(v);
        }
        let mut sorted = Vec::new();
        buf.sorted_into_by(&mut sorted, f64::total_cmp);
        assert_eq!(sorted.len(), 5);
        let nans = sorted.iter().filter(|v| v.is_nan()).count();
        assert_eq!(nans, 2);
        assert_eq!(&sorted[..3], &[0.5, 1.5, 2.0]);
        assert!(sorted[3].is_nan() && sorted[4].is_nan());
    }
}
