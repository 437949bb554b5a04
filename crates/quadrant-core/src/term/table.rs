use std::sync::Arc;

use quadrant_common::collections::{QuadrantMap, quadrant_map_with_capacity};
use quadrant_common::types::{Position, Term, TermId};
use quadrant_common::utils::error::{Error, Result};

use crate::index::PostingSet;
use crate::storage::QuadRecord;

/// The interned record of one term.
///
/// Holds one posting set per position: the quads where the term is the
/// subject, the predicate, the object and the context.
#[derive(Debug)]
pub struct TermNode {
    term: Term,
    postings: [Arc<PostingSet>; 4],
}

impl TermNode {
    fn new(term: Term) -> Self {
        Self {
            term,
            postings: Default::default(),
        }
    }

    #[must_use]
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Quads holding this term at `position`.
    #[must_use]
    pub fn postings(&self, position: Position) -> &Arc<PostingSet> {
        &self.postings[position.index()]
    }

    /// Mutable handle for copy-on-write updates through `Arc::make_mut`.
    pub fn postings_mut(&mut self, position: Position) -> &mut Arc<PostingSet> {
        &mut self.postings[position.index()]
    }

    /// True when no live quad mentions the term any more.
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.postings.iter().all(|set| set.is_empty())
    }
}

/// Interns terms and owns their nodes.
///
/// Node slots of reclaimed terms are recycled by later interning.
///
/// # Example
///
/// ```
/// use quadrant_core::term::TermTable;
/// use quadrant_common::types::Term;
///
/// let mut table = TermTable::new();
/// let alice = table.intern(&Term::iri("http://example.org/alice")).unwrap();
///
/// assert_eq!(table.intern(&Term::iri("http://example.org/alice")), Ok(alice));
/// assert_eq!(table.lookup(&Term::iri("http://example.org/bob")), None);
/// ```
#[derive(Debug)]
pub struct TermTable {
    ids: QuadrantMap<Term, TermId>,
    nodes: Vec<Option<TermNode>>,
    free: Vec<TermId>,
    /// Node slots never exceed this; ids are 32-bit.
    limit: u32,
}

impl TermTable {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: quadrant_map_with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            limit: u32::MAX,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::new()
        }
    }

    /// Returns the id of `term`, creating its node on first use.
    ///
    /// # Errors
    ///
    /// [`Error::TermCapacity`] when a new node is needed and every 32-bit id
    /// is taken. The table is unchanged then.
    pub fn intern(&mut self, term: &Term) -> Result<TermId> {
        if let Some(&id) = self.ids.get(term) {
            return Ok(id);
        }

        let node = TermNode::new(term.clone());
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.as_index()] = Some(node);
                id
            }
            None => {
                let id = self.next_slot().ok_or(Error::TermCapacity { limit: self.limit })?;
                self.nodes.push(Some(node));
                id
            }
        };
        self.ids.insert(term.clone(), id);
        Ok(id)
    }

    fn next_slot(&self) -> Option<TermId> {
        u32::try_from(self.nodes.len())
            .ok()
            .filter(|&index| index < self.limit)
            .map(TermId::new)
    }

    /// Returns the id of `term` without creating anything.
    #[must_use]
    pub fn lookup(&self, term: &Term) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    #[must_use]
    pub fn node(&self, id: TermId) -> Option<&TermNode> {
        self.nodes.get(id.as_index())?.as_ref()
    }

    pub fn node_mut(&mut self, id: TermId) -> Option<&mut TermNode> {
        self.nodes.get_mut(id.as_index())?.as_mut()
    }

    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.node(id).map(TermNode::term)
    }

    /// The four terms of a stored quad, in statement order.
    #[must_use]
    pub fn terms_of(&self, record: &QuadRecord) -> Option<[&Term; 4]> {
        let [s, p, o, c] = record.terms();
        Some([self.term(s)?, self.term(p)?, self.term(o)?, self.term(c)?])
    }

    /// Evicts the node of `id` if no quad mentions it. Returns whether it was
    /// evicted.
    pub fn reclaim(&mut self, id: TermId) -> bool {
        let Some(slot) = self.nodes.get_mut(id.as_index()) else {
            return false;
        };
        if !slot.as_ref().is_some_and(TermNode::is_orphan) {
            return false;
        }
        if let Some(node) = slot.take() {
            self.ids.remove(&node.term);
            self.free.push(id);
        }
        true
    }

    /// Number of interned terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Live nodes with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &TermNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let id = TermId::new(u32::try_from(index).ok()?);
                Some((id, node.as_ref()?))
            })
    }

    /// Number of distinct terms currently used at `position`.
    #[must_use]
    pub fn count_at(&self, position: Position) -> usize {
        self.iter()
            .filter(|(_, node)| !node.postings(position).is_empty())
            .count()
    }

    /// Approximate heap footprint in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        let postings: usize = self
            .iter()
            .flat_map(|(_, node)| node.postings.iter())
            .map(|set| set.heap_bytes())
            .sum();
        postings
            + self.nodes.capacity() * std::mem::size_of::<Option<TermNode>>()
            + self.ids.capacity() * (std::mem::size_of::<Term>() + std::mem::size_of::<TermId>())
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.nodes.clear();
        self.free.clear();
    }
}

impl Default for TermTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrant_common::types::QuadId;

    #[test]
    fn test_intern_dedups() {
        let mut table = TermTable::with_capacity(4);
        let a = table.intern(&Term::iri("http://x/a")).unwrap();
        let b = table.intern(&Term::literal("http://x/a")).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.intern(&Term::iri("http://x/a")), Ok(a));
        assert_eq!(table.len(), 2);
        assert_eq!(table.term(b), Some(&Term::literal("http://x/a")));
    }

    #[test]
    fn test_reclaim_only_orphans() {
        let mut table = TermTable::new();
        let a = table.intern(&Term::iri("http://x/a")).unwrap();
        let node = table.node_mut(a).unwrap();
        Arc::make_mut(node.postings_mut(Position::Subject)).insert(QuadId::new(0));

        assert!(!table.reclaim(a));
        assert!(table.lookup(&Term::iri("http://x/a")).is_some());

        let node = table.node_mut(a).unwrap();
        Arc::make_mut(node.postings_mut(Position::Subject)).remove(QuadId::new(0));
        assert!(table.reclaim(a));
        assert!(!table.reclaim(a));
        assert_eq!(table.lookup(&Term::iri("http://x/a")), None);
        assert!(table.node(a).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_reclaimed_slot_recycled() {
        let mut table = TermTable::new();
        let a = table.intern(&Term::iri("http://x/a")).unwrap();
        table.intern(&Term::iri("http://x/b")).unwrap();
        assert!(table.reclaim(a));

        let c = table.intern(&Term::iri("http://x/c")).unwrap();
        assert_eq!(c, a);
        assert_eq!(table.term(c), Some(&Term::iri("http://x/c")));
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn test_count_at() {
        let mut table = TermTable::new();
        let a = table.intern(&Term::iri("http://x/a")).unwrap();
        let p = table.intern(&Term::iri("http://x/p")).unwrap();
        let uses = [(a, Position::Subject), (p, Position::Predicate), (a, Position::Object)];
        for (id, position) in uses {
            let node = table.node_mut(id).unwrap();
            Arc::make_mut(node.postings_mut(position)).insert(QuadId::new(1));
        }
        assert_eq!(table.count_at(Position::Subject), 1);
        assert_eq!(table.count_at(Position::Object), 1);
        assert_eq!(table.count_at(Position::Context), 0);
    }

    #[test]
    fn test_intern_past_limit() {
        let mut table = TermTable::with_limit(2);
        let a = table.intern(&Term::iri("http://x/a")).unwrap();
        table.intern(&Term::iri("http://x/b")).unwrap();

        assert_eq!(
            table.intern(&Term::iri("http://x/c")),
            Err(Error::TermCapacity { limit: 2 })
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(&Term::iri("http://x/c")), None);
        assert_eq!(table.intern(&Term::iri("http://x/a")), Ok(a));

        // A reclaimed slot is reused without growing.
        assert!(table.reclaim(a));
        assert!(table.intern(&Term::iri("http://x/c")).is_ok());
    }
}
