//! Insertion-ordered sets of quad ids.
//!
//! Removal leaves a tombstone in place instead of shifting later entries, so
//! a cursor's position into a set stays valid across removals made by that
//! cursor or by anyone else. Tombstones are only swept on insert, once they
//! outnumber live entries, and never while another holder shares the set
//! (the store only mutates through `Arc::make_mut`).

use quadrant_common::collections::{QuadrantMap, quadrant_map};
use quadrant_common::types::QuadId;

/// Tombstone count below which a set is never compacted.
const COMPACTION_FLOOR: usize = 32;

/// A set of quad ids that iterates in insertion order.
///
/// # Example
///
/// ```
/// use quadrant_core::index::PostingSet;
/// use quadrant_common::types::QuadId;
///
/// let mut set = PostingSet::new();
/// set.insert(QuadId::new(4));
/// set.insert(QuadId::new(1));
/// set.insert(QuadId::new(9));
/// set.remove(QuadId::new(1));
///
/// // Slot 1 is a tombstone now; scanning from it lands on the next live id.
/// assert_eq!(set.next_from(1), Some((2, QuadId::new(9))));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostingSet {
    /// Ids in insertion order, `None` where an id was removed.
    slots: Vec<Option<QuadId>>,
    /// Slot of every live id.
    positions: QuadrantMap<QuadId, usize>,
}

impl PostingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            positions: quadrant_map(),
        }
    }

    /// Number of live ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: QuadId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Appends `id`. Returns false if it was already present.
    pub fn insert(&mut self, id: QuadId) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        if self.tombstones() > self.len().max(COMPACTION_FLOOR) {
            self.compact();
        }
        self.positions.insert(id, self.slots.len());
        self.slots.push(Some(id));
        true
    }

    /// Removes `id`, leaving a tombstone. Returns false if it was absent.
    pub fn remove(&mut self, id: QuadId) -> bool {
        let Some(slot) = self.positions.remove(&id) else {
            return false;
        };
        self.slots[slot] = None;
        true
    }

    /// The first live id at or after slot `from`, with its slot.
    #[must_use]
    pub fn next_from(&self, from: usize) -> Option<(usize, QuadId)> {
        self.slots
            .get(from..)?
            .iter()
            .enumerate()
            .find_map(|(offset, slot)| slot.map(|id| (from + offset, id)))
    }

    /// Live ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = QuadId> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Number of slots, live or not.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.slots.len() - self.positions.len()
    }

    /// Drops every tombstone. Slot numbers of live ids change.
    pub fn compact(&mut self) {
        if self.tombstones() == 0 {
            return;
        }
        self.slots.retain(Option::is_some);
        for (slot, id) in self.slots.iter().enumerate() {
            if let Some(id) = id {
                self.positions.insert(*id, slot);
            }
        }
    }

    /// Approximate heap footprint in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Option<QuadId>>()
            + self.positions.capacity()
                * (std::mem::size_of::<QuadId>() + std::mem::size_of::<usize>())
    }
}

impl FromIterator<QuadId> for PostingSet {
    fn from_iter<I: IntoIterator<Item = QuadId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
