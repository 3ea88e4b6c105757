pub use crate::error::{ConfigError, InvariantError};
pub use crate::list::{BoundedList, LinkedList, NodeArena, NodeId, SortedBoundedList};
pub use crate::multiset::OrderedMultiset;
pub use crate::ring::{BusyPollBuffer, BusyPollReader, RingBuffer, SortedRingBuffer};
pub use crate::window::TimeWindow;

#[cfg(feature = "concurrency")]
pub use crate::list::SyncBoundedList;
