//! Collection type aliases for Quadrant.
//!
//! Every hashed structure in the store (the term dictionary, posting set
//! lookups, the quad arena) goes through these aliases so hashing stays
//! consistent across the workspace.
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`QuadrantMap`] | Term dictionary, quad arena |
//! | [`QuadrantIndexMap`] | Namespace prefixes, anything iterated in insertion order |
//! | [`QuadrantIndexSet`] | Seen-sets of term views |
//!
//! ```rust
//! use quadrant_common::collections::{quadrant_index_set, QuadrantMap};
//!
//! let mut map: QuadrantMap<u64, usize> = QuadrantMap::default();
//! map.insert(7, 0);
//!
//! let mut seen = quadrant_index_set::<&str>();
//! seen.insert("b");
//! seen.insert("a");
//! assert_eq!(seen.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

use rustc_hash::FxBuildHasher;

/// HashMap with FxHash (fast, non-cryptographic).
///
/// Keys are small integers and interned strings, which FxHash handles well.
pub type QuadrantMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Map preserving insertion order.
pub type QuadrantIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Set preserving insertion order.
pub type QuadrantIndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Create a new empty [`QuadrantMap`].
#[inline]
#[must_use]
pub fn quadrant_map<K, V>() -> QuadrantMap<K, V> {
    QuadrantMap::with_hasher(FxBuildHasher)
}

/// Create a new [`QuadrantMap`] with the specified capacity.
#[inline]
#[must_use]
pub fn quadrant_map_with_capacity<K, V>(capacity: usize) -> QuadrantMap<K, V> {
    QuadrantMap::with_capacity_and_hasher(capacity, FxBuildHasher)
}

/// Create a new empty [`QuadrantIndexMap`].
#[inline]
#[must_use]
pub fn quadrant_index_map<K, V>() -> QuadrantIndexMap<K, V> {
    QuadrantIndexMap::with_hasher(FxBuildHasher)
}

/// Create a new empty [`QuadrantIndexSet`].
#[inline]
#[must_use]
pub fn quadrant_index_set<T>() -> QuadrantIndexSet<T> {
    QuadrantIndexSet::with_hasher(FxBuildHasher)
}
