use quadrant_common::collections::{QuadrantMap, quadrant_map_with_capacity};
use quadrant_common::types::{Position, QuadId, TermId};

/// A stored quad: the ids of its four terms in statement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadRecord {
    terms: [TermId; 4],
}

impl QuadRecord {
    #[must_use]
    pub const fn new(terms: [TermId; 4]) -> Self {
        Self { terms }
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, position: Position) -> TermId {
        self.terms[position.index()]
    }

    #[inline]
    #[must_use]
    pub const fn terms(&self) -> [TermId; 4] {
        self.terms
    }
}

/// Owns every live quad record, addressed by [`QuadId`].
///
/// Ids come from a counter that only moves forward, clearing included, so a
/// dead id never comes back to life under a different quad.
#[derive(Debug, Default)]
pub struct QuadArena {
    records: QuadrantMap<QuadId, QuadRecord>,
    next_id: QuadId,
}

impl QuadArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: quadrant_map_with_capacity(capacity),
            next_id: QuadId::default(),
        }
    }

    /// Stores `record` under a fresh id.
    pub fn allocate(&mut self, record: QuadRecord) -> QuadId {
        let id = self.next_id;
        self.next_id = id.next();
        self.records.insert(id, record);
        id
    }

    #[must_use]
    pub fn get(&self, id: QuadId) -> Option<&QuadRecord> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn is_live(&self, id: QuadId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn remove(&mut self, id: QuadId) -> Option<QuadRecord> {
        self.records.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.records.capacity()
            * (std::mem::size_of::<QuadId>() + std::mem::size_of::<QuadRecord>())
    }

    /// Drops every record. The id counter keeps going.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u32) -> QuadRecord {
        QuadRecord::new([TermId(n), TermId(n + 1), TermId(n + 2), TermId(0)])
    }

    #[test]
    fn test_allocate_and_get() {
        let mut arena = QuadArena::with_capacity(2);
        let a = arena.allocate(record(1));
        let b = arena.allocate(record(5));

        assert_ne!(a, b);
        assert_eq!(arena.get(b).map(|r| r.get(Position::Object)), Some(TermId(7)));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut arena = QuadArena::new();
        let a = arena.allocate(record(1));
        assert!(arena.remove(a).is_some());
        assert!(!arena.is_live(a));

        arena.clear();
        let b = arena.allocate(record(1));
        assert!(b > a);
        assert!(arena.get(a).is_none());
        assert!(!arena.is_empty());
    }
}
