//! Identifier types for interned terms, stored quads and store instances.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of an interned term within one store.
///
/// Ids index the term table directly. When a term stops being referenced by
/// any quad its slot may be recycled for a different term.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl TermId {
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value as a table index.
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermId({})", self.0)
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TermId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Identity of a stored quad.
///
/// QuadIds are assigned sequentially and never reused within a store, so a
/// stale id held by a cursor can never alias a newer quad.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(transparent)]
pub struct QuadId(pub u64);

impl QuadId {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for QuadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuadId({})", self.0)
    }
}

impl fmt::Display for QuadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuadId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<QuadId> for u64 {
    fn from(id: QuadId) -> Self {
        id.0
    }
}

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a store instance, used to reject cursors opened on another
/// store.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StoreId(u64);

impl StoreId {
    /// Allocates an id no other store in this process has.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreId({})", self.0)
    }
}
