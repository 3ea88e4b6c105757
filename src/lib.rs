//! ringkit: bounded, eviction-aware sequence containers.
//!
//! Ring buffers (plain, sorted-view, and lock-free busy-poll),
//! arena-backed lists with capacity bounds, and a time-bounded sample
//! window. All containers report what they evict instead of dropping
//! it silently.

pub mod error;
pub mod list;
pub mod multiset;
pub mod prelude;
pub mod ring;
pub mod window;
