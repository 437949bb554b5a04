//! Live cursors over pattern matches.
//!
//! A [`Cursor`] does not borrow the store. It holds a reference-counted
//! snapshot of the collection it scans (a posting set, the canonical set or
//! the entries of a sorted index) and takes the store as an argument on
//! every call. That is what lets a cursor remove the quad it just returned
//! while other cursors are open:
//!
//! - the store updates every collection through `Arc::make_mut`, so a
//!   collection another cursor still holds is copied and that cursor keeps
//!   seeing the old one;
//! - before removing, the cursor drops its own handle if it is the store's
//!   current collection, letting the store update it in place, and takes it
//!   back afterwards;
//! - posting sets leave tombstones, so the cursor's position stays valid.
//!
//! Quads removed through any cursor are skipped by all others. Quads
//! inserted after a cursor was opened are not returned by it.

use std::ops::Bound;
use std::sync::Arc;

use quadrant_common::types::{Position, Quad, QuadId, StoreId, TermId};
use quadrant_common::utils::error::{CursorError, Result};
use tracing::trace;

use crate::index::{IndexOrder, OrderKey, PostingSet, SortedEntries};
use crate::pattern::ResolvedPattern;
use crate::store::QuadStore;

/// The store collection a posting scan reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    /// Every live quad.
    Canonical,
    /// Quads holding a term at a position.
    Term(TermId, Position),
}

#[derive(Debug)]
enum Source {
    Exhausted,
    Postings {
        binding: Binding,
        set: Option<Arc<PostingSet>>,
        next: usize,
    },
    Sorted {
        order: IndexOrder,
        entries: Option<Arc<SortedEntries>>,
        from: Bound<OrderKey>,
        upper: Bound<OrderKey>,
    },
}

impl Source {
    fn next_id(&mut self) -> Option<QuadId> {
        match self {
            Self::Exhausted => None,
            Self::Postings { set, next, .. } => {
                let (slot, id) = set.as_ref()?.next_from(*next)?;
                *next = slot + 1;
                Some(id)
            }
            Self::Sorted {
                entries,
                from,
                upper,
                ..
            } => {
                let (key, id) = entries
                    .as_ref()?
                    .range((from.as_ref(), upper.as_ref()))
                    .next()
                    .map(|(key, id)| (key.clone(), *id))?;
                *from = Bound::Excluded(key);
                Some(id)
            }
        }
    }
}

/// A removal-capable traversal of the quads matching a pattern.
///
/// Open one with [`QuadStore::matching`] or [`QuadStore::cursor`].
///
/// # Example
///
/// ```
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::Term;
///
/// let mut store = QuadStore::new();
/// let knows = Term::iri("http://example.org/knows");
/// for name in ["b", "c", "d"] {
///     let object = Term::iri(format!("http://example.org/{name}"));
///     store.add(&Term::iri("http://example.org/a"), &knows, &object, &[]).unwrap();
/// }
///
/// let mut cursor = store.matching(None, Some(&knows), None, &[]);
/// while let Some(quad) = cursor.advance(&store).unwrap() {
///     if quad.object != Term::iri("http://example.org/c") {
///         cursor.remove_current(&mut store).unwrap();
///     }
/// }
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct Cursor {
    store: StoreId,
    source: Source,
    filter: Option<ResolvedPattern>,
    peeked: Option<(QuadId, Quad)>,
    current: Option<(QuadId, Quad)>,
    removed: bool,
}

impl Cursor {
    /// A cursor that yields nothing.
    pub(crate) fn empty(store: StoreId) -> Self {
        Self::with_source(store, Source::Exhausted, None)
    }

    pub(crate) fn postings(
        store: StoreId,
        binding: Binding,
        set: Arc<PostingSet>,
        filter: ResolvedPattern,
    ) -> Self {
        let source = Source::Postings {
            binding,
            set: Some(set),
            next: 0,
        };
        Self::with_source(store, source, Some(filter))
    }

    /// A scan of `entries` between two keys. The bounds must not cross.
    pub(crate) fn sorted(
        store: StoreId,
        order: IndexOrder,
        entries: Arc<SortedEntries>,
        range: (Bound<OrderKey>, Bound<OrderKey>),
        filter: ResolvedPattern,
    ) -> Self {
        let (from, upper) = range;
        let source = Source::Sorted {
            order,
            entries: Some(entries),
            from,
            upper,
        };
        Self::with_source(store, source, Some(filter))
    }

    fn with_source(store: StoreId, source: Source, filter: Option<ResolvedPattern>) -> Self {
        Self {
            store,
            source,
            filter,
            peeked: None,
            current: None,
            removed: false,
        }
    }

    fn check(&self, store: &QuadStore) -> Result<()> {
        if self.store == store.id() {
            Ok(())
        } else {
            Err(CursorError::ForeignStore.into())
        }
    }

    /// Scans forward to the next live quad that matches the filter.
    fn fetch(&mut self, store: &QuadStore) -> Option<(QuadId, Quad)> {
        let filter = self.filter.as_ref()?;
        loop {
            let id = self.source.next_id()?;
            let Some(record) = store.record(id) else {
                continue;
            };
            if !filter.matches(record) {
                continue;
            }
            if let Some(quad) = store.materialize(record) {
                return Some((id, quad));
            }
        }
    }

    /// Whether another matching quad remains.
    pub fn has_next(&mut self, store: &QuadStore) -> Result<bool> {
        self.check(store)?;
        if let Some((id, _)) = &self.peeked
            && !store.contains_id(*id)
        {
            self.peeked = None;
        }
        if self.peeked.is_none() {
            self.peeked = self.fetch(store);
        }
        Ok(self.peeked.is_some())
    }

    /// Moves to the next matching quad and returns it, or `None` when the
    /// cursor is exhausted.
    pub fn advance(&mut self, store: &QuadStore) -> Result<Option<Quad>> {
        self.check(store)?;
        let next = match self.peeked.take() {
            Some((id, quad)) if store.contains_id(id) => Some((id, quad)),
            _ => self.fetch(store),
        };
        self.current = next;
        self.removed = false;
        Ok(self.current.as_ref().map(|(_, quad)| quad.clone()))
    }

    /// The quad returned by the last [`advance`](Self::advance), unless it
    /// was removed since.
    #[must_use]
    pub fn current(&self) -> Option<&Quad> {
        if self.removed {
            return None;
        }
        self.current.as_ref().map(|(_, quad)| quad)
    }

    /// Removes the quad returned by the last [`advance`](Self::advance) from
    /// the store and every index. Returns false if it had already left the
    /// store through another cursor or a direct removal.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoCurrent`] before the first advance or once the
    /// cursor is exhausted, [`CursorError::AlreadyRemoved`] when called twice
    /// for the same quad, [`CursorError::ForeignStore`] when `store` did not
    /// open this cursor.
    pub fn remove_current(&mut self, store: &mut QuadStore) -> Result<bool> {
        self.check(store)?;
        if self.removed {
            return Err(CursorError::AlreadyRemoved.into());
        }
        let Some((id, _)) = &self.current else {
            return Err(CursorError::NoCurrent.into());
        };
        let id = *id;
        self.removed = true;
        Ok(self.remove_id(store, id))
    }

    /// Removes every quad the cursor has yet to return. `store` must be the
    /// one that opened it.
    pub(crate) fn remove_remaining(&mut self, store: &mut QuadStore) -> bool {
        let mut removed = false;
        while let Some((id, _)) = self.peeked.take().or_else(|| self.fetch(store)) {
            removed |= self.remove_id(store, id);
        }
        self.current = None;
        removed
    }

    fn remove_id(&mut self, store: &mut QuadStore, id: QuadId) -> bool {
        let released = self.release_if_current(store);
        let removed = store.remove_id(id);
        if released {
            self.rebind(store);
        }
        trace!(quad = %id, removed, rebound = released, "cursor removal");
        removed
    }

    /// Drops the cursor's handle on its collection when it is the one the
    /// store currently maintains, so the removal can update it in place.
    fn release_if_current(&mut self, store: &mut QuadStore) -> bool {
        match &mut self.source {
            Source::Exhausted => false,
            Source::Postings { binding, set, .. } => {
                let current = store.postings(*binding);
                let shared = matches!(
                    (set.as_ref(), current),
                    (Some(mine), Some(theirs)) if Arc::ptr_eq(mine, theirs)
                );
                if shared {
                    *set = None;
                }
                shared
            }
            Source::Sorted { order, entries, .. } => {
                let current = store.sorted_entries(*order);
                let shared = matches!(
                    (entries.as_ref(), current),
                    (Some(mine), Some(theirs)) if Arc::ptr_eq(mine, &theirs)
                );
                if shared {
                    *entries = None;
                }
                shared
            }
        }
    }

    /// Takes a handle on the store's current version of the collection.
    /// Positions carry over: posting sets keep tombstones in place and
    /// sorted scans resume after their last key.
    fn rebind(&mut self, store: &mut QuadStore) {
        match &mut self.source {
            Source::Exhausted => {}
            Source::Postings { binding, set, .. } => {
                *set = store.postings(*binding).cloned();
            }
            Source::Sorted { order, entries, .. } => {
                *entries = store.sorted_entries(*order);
            }
        }
    }
}

/// Read-only iterator over pattern matches, borrowing the store.
///
/// ```
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::{Quad, Term};
///
/// let quad = Quad::triple(
///     Term::iri("http://example.org/a"),
///     Term::iri("http://example.org/p"),
///     Term::literal("x"),
/// );
/// let store: QuadStore = [quad.clone()].into_iter().collect();
/// assert_eq!(store.iter().collect::<Vec<_>>(), vec![quad]);
/// ```
#[derive(Debug)]
pub struct MatchIter<'a> {
    store: &'a QuadStore,
    cursor: Cursor,
}

impl<'a> MatchIter<'a> {
    #[must_use]
    pub fn new(store: &'a QuadStore, cursor: Cursor) -> Self {
        Self { store, cursor }
    }
}

impl Iterator for MatchIter<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        self.cursor.advance(self.store).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{IndexStrategy, StoreOptions};
    use quadrant_common::types::Term;
    use quadrant_common::utils::error::Error;

    fn iri(name: &str) -> Term {
        Term::iri(format!("http://x/{name}"))
    }

    fn store(strategy: IndexStrategy) -> QuadStore {
        let mut store = QuadStore::with_options(StoreOptions {
            strategy,
            ..StoreOptions::default()
        });
        for (s, p, o) in [("a", "p", "b"), ("a", "p", "c"), ("a", "q", "d"), ("e", "p", "b")] {
            store.add(&iri(s), &iri(p), &iri(o), &[]).unwrap();
        }
        store
    }

    fn drain(cursor: &mut Cursor, store: &QuadStore) -> Vec<Quad> {
        let mut quads = Vec::new();
        while let Some(quad) = cursor.advance(store).unwrap() {
            quads.push(quad);
        }
        quads
    }

    #[test]
    fn test_remove_current_errors() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut cursor = store.matching(Some(&iri("a")), None, None, &[]);

            assert_eq!(
                cursor.remove_current(&mut store),
                Err(Error::Cursor(CursorError::NoCurrent))
            );
            assert!(cursor.advance(&store).unwrap().is_some());
            assert_eq!(cursor.remove_current(&mut store), Ok(true));
            assert!(cursor.current().is_none());
            assert_eq!(
                cursor.remove_current(&mut store),
                Err(Error::Cursor(CursorError::AlreadyRemoved))
            );

            drain(&mut cursor, &store);
            assert_eq!(
                cursor.remove_current(&mut store),
                Err(Error::Cursor(CursorError::NoCurrent))
            );
        }
    }

    #[test]
    fn test_foreign_store_rejected() {
        let mut mine = store(IndexStrategy::Hash);
        let other = store(IndexStrategy::Hash);
        let mut cursor = other.matching(None, None, None, &[]);

        assert_eq!(
            cursor.advance(&mine).unwrap_err(),
            Error::Cursor(CursorError::ForeignStore)
        );
        assert_eq!(
            cursor.remove_current(&mut mine).unwrap_err(),
            Error::Cursor(CursorError::ForeignStore)
        );
    }

    #[test]
    fn test_remove_all_while_iterating() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut cursor = store.matching(None, Some(&iri("p")), None, &[]);
            let mut seen = 0;
            while cursor.advance(&store).unwrap().is_some() {
                cursor.remove_current(&mut store).unwrap();
                seen += 1;
            }
            assert_eq!(seen, 3, "{strategy:?}");
            assert_eq!(store.len(), 1);
            assert!(store.contains(Some(&iri("a")), Some(&iri("q")), None, &[]));
        }
    }

    #[test]
    fn test_other_cursor_skips_removed() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut a = store.matching(Some(&iri("a")), None, None, &[]);
            let mut b = store.matching(None, None, Some(&iri("b")), &[]);

            let first = a.advance(&store).unwrap().unwrap();
            a.remove_current(&mut store).unwrap();

            let rest = drain(&mut b, &store);
            assert!(!rest.contains(&first));
            let expected = usize::from(first.object != iri("b")) + 1;
            assert_eq!(rest.len(), expected, "{strategy:?}");
        }
    }

    #[test]
    fn test_has_next_does_not_consume() {
        let store = store(IndexStrategy::Hash);
        let mut cursor = store.matching(Some(&iri("e")), None, None, &[]);
        assert!(cursor.has_next(&store).unwrap());
        assert!(cursor.has_next(&store).unwrap());
        assert_eq!(drain(&mut cursor, &store).len(), 1);
        assert!(!cursor.has_next(&store).unwrap());
    }

    #[test]
    fn test_peeked_quad_removed_elsewhere() {
        let mut store = store(IndexStrategy::Hash);
        let mut a = store.matching(Some(&iri("a")), Some(&iri("p")), None, &[]);
        let mut b = store.matching(Some(&iri("a")), Some(&iri("p")), None, &[]);

        assert!(a.has_next(&store).unwrap());
        let first = b.advance(&store).unwrap().unwrap();
        b.remove_current(&mut store).unwrap();

        let rest = drain(&mut a, &store);
        assert_eq!(rest.len(), 1);
        assert_ne!(rest[0], first);
    }

    #[test]
    fn test_snapshot_ignores_later_inserts() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut cursor = store.matching(Some(&iri("a")), None, None, &[]);
            assert!(cursor.advance(&store).unwrap().is_some());

            store.add(&iri("a"), &iri("r"), &iri("z"), &[]).unwrap();
            assert_eq!(drain(&mut cursor, &store).len(), 2, "{strategy:?}");
            assert_eq!(store.iter_matching(Some(&iri("a")), None, None, &[]).count(), 4);
        }
    }

    #[test]
    fn test_match_iter() {
        let store = store(IndexStrategy::Sorted);
        let objects: Vec<_> = store
            .iter_matching(Some(&iri("a")), Some(&iri("p")), None, &[])
            .map(|quad| quad.object)
            .collect();
        assert_eq!(objects, vec![iri("b"), iri("c")]);
    }

    #[test]
    fn test_remove_current_after_removal_elsewhere() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut a = store.matching(Some(&iri("e")), None, None, &[]);
            let mut b = store.matching(Some(&iri("e")), None, None, &[]);

            let quad = a.advance(&store).unwrap().unwrap();
            assert_eq!(b.advance(&store).unwrap(), Some(quad.clone()));
            assert_eq!(b.remove_current(&mut store), Ok(true));

            assert_eq!(a.remove_current(&mut store), Ok(false), "{strategy:?}");
            assert_eq!(store.len(), 3);
        }
    }

    #[test]
    fn test_remove_remaining() {
        for strategy in [IndexStrategy::Hash, IndexStrategy::Sorted] {
            let mut store = store(strategy);
            let mut cursor = store.matching(None, Some(&iri("p")), None, &[]);
            assert!(cursor.has_next(&store).unwrap());
            assert!(cursor.remove_remaining(&mut store));
            assert_eq!(store.len(), 1);

            let mut cursor = store.matching(None, Some(&iri("p")), None, &[]);
            assert!(!cursor.remove_remaining(&mut store));
        }
    }
}
