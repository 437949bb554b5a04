//! Index structures over the quad population.
//!
//! Two strategies keep quads findable:
//!
//! | Structure | Strategy | Lookup |
//! | --------- | -------- | ------ |
//! | [`PostingSet`] | Hash: one set per term and position, plus the canonical set | O(smallest bound set) |
//! | [`SortedIndex`] | Sorted: total orders over whole quads, range scanned | O(log n + matches) |
//! | [`OrderCache`] | Holds sorted orders synthesized on demand | - |
//!
//! Posting sets are maintained under both strategies; they also serve
//! duplicate detection on insert and orphan detection on removal.

mod cache;
mod order;
mod posting;
mod sorted;

pub use cache::OrderCache;
pub use order::{IndexOrder, OrderKey, Slot};
pub use posting::PostingSet;
pub use sorted::{SortedEntries, SortedIndex, SortedIndexes};
