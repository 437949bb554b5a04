//! # quadrant-core
//!
//! The storage engine behind Quadrant: an indexed, in-memory set of RDF quads.
//!
//! - [`term`] - Term table: interning and per-term posting sets
//! - [`index`] - Posting sets, sorted orders and the order cache
//! - [`storage`] - The quad arena
//! - [`pattern`] - Quad patterns and context selection
//! - [`cursor`] - Live cursors that can remove what they visit
//! - [`store`] - [`QuadStore`], the facade tying it together
//! - [`view`] - Term views, filtered views and read-only views over a store
//!
//! Cursors and views are detached from the store they read: every call takes
//! the store as an argument, `&QuadStore` to read and `&mut QuadStore` to
//! change it.

pub mod cursor;
pub mod index;
pub mod pattern;
pub mod storage;
pub mod store;
pub mod term;
pub mod view;

pub use cursor::{Cursor, MatchIter};
pub use pattern::{ContextSelector, QuadPattern};
pub use store::{IndexStrategy, QuadStore, StoreOptions, StoreStats};
pub use view::{FilteredView, ReadOnlyView, TermIter, TermView};
