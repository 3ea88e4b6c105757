//! Lock-free, lossy ring buffer for busy-polling consumers.
//!
//! One writer, any number of independent readers, no locks and no
//! blocking. The writer owns all shared state; each reader owns only a
//! private cursor. Readers that fall behind silently skip data once the
//! writer wraps past them — this is the documented behavior of the
//! design, not a defect.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       BusyPollBuffer<T> Layout                      │
//! │                                                                     │
//! │   slots: Box<[UnsafeCell<T>]>   fixed capacity                      │
//! │   from:  AtomicUsize            start of the last committed span    │
//! │   to:    AtomicUsize            next write slot (publish point)     │
//! │                                                                     │
//! │   writer:  store slot ──► store from ──► release-store to           │
//! │   reader:  acquire-load to ──► read slot at cursor ──► advance      │
//! │                                                                     │
//! │   A reader created now snapshots `from` as its cursor and sees      │
//! │   only the most recent committed span; data between cursor and      │
//! │   `to` may be overwritten at any time by a full wrap.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Publication guarantee
//!
//! A reader never observes a slot the writer has not finished writing:
//! the writer populates the slot, then release-stores `to`; readers
//! acquire-load `to` before touching any slot strictly before it. That
//! pairing is the only synchronization.
//!
//! ## Caveat: lapped readers race the writer
//!
//! Once the writer wraps a full lap past a slow reader's cursor, the
//! reader's next slot load overlaps an unsynchronized `UnsafeCell` store
//! from the writer. In memory-model terms this is a data race, not just
//! a stale read: the reader may observe the old value, the new value, or
//! (for multi-word `T`) a torn mix of both, and tools such as Miri or
//! TSan will flag the access. The `T: Copy` bound keeps the outcome a
//! garbage *value* rather than a memory-safety violation (no pointers,
//! no drop glue), which is the trade this design makes for a writer that
//! never waits. Size the capacity against the reader's worst-case lag if
//! that trade is unacceptable.
//!
//! ## Example Usage
//!
//! ```
//! use ringkit::ring::BusyPollBuffer;
//!
//! let mut buf = BusyPollBuffer::new(3);
//! let mut reader = buf.reader();
//!
//! for v in 1..=5u64 {
//!     buf.write(v);
//! }
//!
//! // Capacity 3, five writes: the reader's cursor predates the wrap, so
//! // only the post-wrap survivors 4 and 5 are observable.
//! assert_eq!(reader.read(), Some(4));
//! assert_eq!(reader.read(), Some(5));
//! assert_eq!(reader.read(), None);
//! ```

use std::cell::UnsafeCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ConfigError;

struct Shared<T> {
    slots: Box<[UnsafeCell<T>]>,
    /// Physical index of the start of the last committed span.
    from: AtomicUsize,
    /// Physical index of the next write slot; stores publish.
    to: AtomicUsize,
}

// Safety: cross-thread access to `slots` is mediated by the
// release/acquire pair on `to`: a reader only dereferences slots strictly
// before the acquired `to`, which the single writer populated before the
// release store. After a full wrap the writer's store can overlap a
// lapped reader's load, an unsynchronized race on plain `Copy` data (see
// the module-level caveat); `T: Copy` rules out pointers and drop glue,
// so a racy read yields at worst a garbage value, never UB beyond the
// race itself.
unsafe impl<T: Copy + Send> Send for Shared<T> {}
unsafe impl<T: Copy + Send> Sync for Shared<T> {}

/// Single-writer handle to a lock-free, lossy ring buffer.
///
/// The handle is not `Clone`: write methods take `&mut self`, so the
/// single-writer discipline is enforced statically. Readers are created
/// with [`reader`](Self::reader) and are independent of each other.
pub struct BusyPollBuffer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> std::fmt::Debug for BusyPollBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyPollBuffer")
            .field("capacity", &self.shared.slots.len())
            .field("from", &self.shared.from)
            .field("to", &self.shared.to)
            .finish()
    }
}

/// Independent read cursor over a [`BusyPollBuffer`].
///
/// The cursor starts at the buffer's `from` at creation time. There is no
/// bound on how stale the cursor may become: once the writer wraps past
/// it, the skipped values are unrecoverable.
pub struct BusyPollReader<T> {
    shared: Arc<Shared<T>>,
    current: usize,
}

impl<T> std::fmt::Debug for BusyPollReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyPollReader")
            .field("current", &self.current)
            .finish()
    }
}

impl<T: Copy + Default + Send> BusyPollBuffer<T> {
    /// Creates a buffer with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "busy-poll buffer capacity must be > 0");
        let slots: Box<[UnsafeCell<T>]> =
            (0..capacity).map(|_| UnsafeCell::new(T::default())).collect();
        Self {
            shared: Arc::new(Shared {
                slots,
                from: AtomicUsize::new(0),
                to: AtomicUsize::new(0),
            }),
        }
    }

    /// Fallible constructor for user-configurable capacities.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("busy-poll buffer capacity must be > 0"));
        }
        Ok(Self::new(capacity))
    }
}

impl<T: Copy + Send> BusyPollBuffer<T> {
    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.shared.slots.len()
    }

    fn wrap(&self, i: usize) -> usize {
        if i >= self.capacity() { i - self.capacity() } else { i }
    }

    /// Writes `v` and publishes it.
    ///
    /// `from` moves to the written slot: the committed span visible to a
    /// reader created after this call is exactly this one write.
    pub fn write(&mut self, v: T) {
        let to = self.shared.to.load(Ordering::Relaxed);
        // Safety: `to` is the staging slot; no reader dereferences it
        // until the release store below publishes it.
        unsafe {
            *self.shared.slots[to].get() = v;
        }
        self.shared.from.store(to, Ordering::Relaxed);
        self.shared.to.store(self.wrap(to + 1), Ordering::Release);
    }

    /// Begins a two-phase write, returning the staging slot in place.
    ///
    /// The slot is invisible to readers (they only consider indices
    /// strictly before `to`) until [`end_write`](Self::end_write)
    /// publishes it. Avoids a copy for large `T`.
    pub fn begin_write(&mut self) -> &mut T {
        let to = self.shared.to.load(Ordering::Relaxed);
        // Safety: exclusive via `&mut self`; readers never dereference
        // the slot at `to`.
        unsafe { &mut *self.shared.slots[to].get() }
    }

    /// Publishes the slot populated since [`begin_write`](Self::begin_write).
    pub fn end_write(&mut self) {
        let to = self.shared.to.load(Ordering::Relaxed);
        self.shared.from.store(to, Ordering::Relaxed);
        self.shared.to.store(self.wrap(to + 1), Ordering::Release);
    }

    /// Writes a batch and publishes it as a single committed span.
    ///
    /// `from` records the start of the batch, so a reader created after
    /// this call sees the whole batch (unlike [`write`](Self::write),
    /// which commits a one-element span). A batch at least as long as the
    /// capacity overwrites its own earlier values; the committed span is
    /// then clamped to the newest `capacity - 1` values. Values older
    /// than the batch remain physically present but are not part of the
    /// committed span.
    pub fn write_many(&mut self, vs: &[T]) {
        if vs.is_empty() {
            return;
        }
        let start = self.shared.to.load(Ordering::Relaxed);
        let mut to = start;
        for &v in vs {
            // Safety: the single writer stages slots ahead of the publish
            // below; readers bound themselves by the previous `to`.
            unsafe {
                *self.shared.slots[to].get() = v;
            }
            to = self.wrap(to + 1);
        }
        let from = if vs.len() >= self.capacity() {
            // The batch lapped itself; `start` no longer marks valid data.
            self.wrap(to + 1)
        } else {
            start
        };
        self.shared.from.store(from, Ordering::Relaxed);
        self.shared.to.store(to, Ordering::Release);
    }

    /// Creates a reader whose cursor starts at the current `from`.
    pub fn reader(&self) -> BusyPollReader<T> {
        BusyPollReader {
            shared: Arc::clone(&self.shared),
            current: self.shared.from.load(Ordering::Acquire),
        }
    }
}

impl<T: Copy + Send> BusyPollReader<T> {
    /// Returns the next unread value, or `None` when the cursor has
    /// caught up with the writer.
    ///
    /// There is no staleness bound: if the writer wrapped past this
    /// cursor, the overwritten values are skipped without notice, and the
    /// slot load races the writer's overwrite (see the module-level
    /// caveat on lapped readers).
    pub fn read(&mut self) -> Option<T> {
        let to = self.shared.to.load(Ordering::Acquire);
        if self.current == to {
            return None;
        }
        // Safety: `current != to`, so the slot was published by a
        // release store of `to` that this load acquired. A writer a full
        // lap ahead may be overwriting it concurrently; `T: Copy` bounds
        // that race to a garbage value.
        let value = unsafe { *self.shared.slots[self.current].get() };
        self.current += 1;
        if self.current >= self.shared.slots.len() {
            self.current = 0;
        }
        Some(value)
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.shared.slots.len()
    }
}
