pub mod buffer;
pub mod busy_poll;
pub mod sorted;

pub use buffer::RingBuffer;
pub use busy_poll::{BusyPollBuffer, BusyPollReader};
pub use sorted::SortedRingBuffer;
