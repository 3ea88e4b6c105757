pub mod arena;
pub mod bounded;
pub mod linked;
pub mod sorted;
#[cfg(feature = "concurrency")]
pub mod sync;

pub use arena::{NodeArena, NodeId};
pub use bounded::BoundedList;
pub use linked::LinkedList;
pub use sorted::SortedBoundedList;
#[cfg(feature = "concurrency")]
pub use sync::SyncBoundedList;
