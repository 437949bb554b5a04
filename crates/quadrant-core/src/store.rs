//! The in-memory quad store.
//!
//! [`QuadStore`] keeps a set of quads findable by any combination of bound
//! positions. Every distinct term gets a node in the term table holding four
//! posting sets, and every quad lives in the arena under an id that is never
//! reused. On top of that, the store maintains one of two lookup strategies:
//!
//! - **Hash**: a lookup scans the smallest posting set among its bound
//!   positions, or the canonical set of all quads when nothing is bound.
//! - **Sorted**: a lookup range-scans a whole-quad total order whose key puts
//!   the bound positions first. The primary `spoc` order always exists;
//!   others are built from it on first need and kept in a bounded cache.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use parking_lot::Mutex;
use quadrant_common::types::{Literal, Position, PositionMask, Quad, QuadId, StoreId, Term, TermId};
use quadrant_common::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cursor::{Binding, Cursor, MatchIter};
use crate::index::{IndexOrder, OrderKey, PostingSet, SortedEntries, SortedIndexes};
use crate::pattern::{ContextSelector, QuadPattern, ResolvedPattern};
use crate::storage::{QuadArena, QuadRecord};
use crate::term::TermTable;
use crate::view::{FilteredView, ReadOnlyView, TermView};

/// How lookups find their candidate quads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStrategy {
    /// Per-term posting sets. Cheap inserts, no ordering guarantees beyond
    /// insertion order.
    #[default]
    Hash,
    /// Sorted whole-quad orders built on demand. Results come out in term
    /// order.
    Sorted,
}

impl fmt::Display for IndexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash => write!(f, "hash"),
            Self::Sorted => write!(f, "sorted"),
        }
    }
}

/// Store-level settings.
///
/// The defaults suit most workloads. Pick [`IndexStrategy::Sorted`] when
/// lookups bind positions in varied combinations over large data, and size
/// the capacities if the data volume is known upfront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub strategy: IndexStrategy,
    /// Most sorted orders kept besides the primary one.
    pub max_sorted_indexes: usize,
    /// Evict term nodes once no quad mentions them.
    pub reclaim_terms: bool,
    pub initial_quad_capacity: usize,
    pub initial_term_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            strategy: IndexStrategy::Hash,
            max_sorted_indexes: 8,
            reclaim_terms: true,
            initial_quad_capacity: 1024,
            initial_term_capacity: 1024,
        }
    }
}

/// Counts describing a store's content and index footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of quads.
    pub quad_count: usize,
    /// Number of interned terms.
    pub term_count: usize,
    /// Distinct subjects.
    pub subject_count: usize,
    /// Distinct predicates.
    pub predicate_count: usize,
    /// Distinct objects.
    pub object_count: usize,
    /// Distinct contexts, the default graph included when used.
    pub context_count: usize,
    /// Lookup strategy in use.
    pub strategy: IndexStrategy,
    /// Names of the sorted orders currently maintained, primary first.
    pub sorted_orders: Vec<String>,
    /// Approximate heap usage in bytes.
    pub memory_bytes: usize,
}

/// An indexed, in-memory set of RDF quads.
///
/// Writes take `&mut self`; lookups take `&self` and hand out detached
/// [`Cursor`]s. With the sorted strategy, a lookup may build a new sorted
/// order; that cache sits behind a mutex so lookups stay `&self`.
///
/// Context arguments follow one rule everywhere: an empty slice means any
/// context for lookups and the default graph for inserts.
///
/// # Example
///
/// ```
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::Term;
///
/// let mut store = QuadStore::new();
/// let alice = Term::iri("http://example.org/alice");
/// let knows = Term::iri("http://example.org/knows");
/// let bob = Term::iri("http://example.org/bob");
/// let work = Term::iri("http://example.org/graphs/work");
///
/// store.add(&alice, &knows, &bob, &[]).unwrap();
/// store.add(&alice, &knows, &bob, &[work.clone()]).unwrap();
///
/// assert_eq!(store.len(), 2);
/// assert!(store.contains(Some(&alice), None, None, &[work]));
/// assert!(store.contains(Some(&alice), None, None, &[Term::DefaultGraph]));
/// assert_eq!(store.contexts().len(&store), 2);
/// ```
pub struct QuadStore {
    id: StoreId,
    options: StoreOptions,
    terms: TermTable,
    quads: QuadArena,
    canonical: Arc<PostingSet>,
    sorted: Option<Mutex<SortedIndexes>>,
}

impl QuadStore {
    /// Creates an empty store with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Creates an empty store with the given options.
    #[must_use]
    pub fn with_options(mut options: StoreOptions) -> Self {
        if options.strategy == IndexStrategy::Sorted && options.max_sorted_indexes == 0 {
            warn!("max_sorted_indexes is 0 for the sorted strategy; keeping 1 synthesized order");
            options.max_sorted_indexes = 1;
        }
        let sorted = (options.strategy == IndexStrategy::Sorted)
            .then(|| Mutex::new(SortedIndexes::new(options.max_sorted_indexes)));
        Self {
            id: StoreId::fresh(),
            terms: TermTable::with_capacity(options.initial_term_capacity),
            quads: QuadArena::with_capacity(options.initial_quad_capacity),
            canonical: Arc::new(PostingSet::with_capacity(options.initial_quad_capacity)),
            sorted,
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> StoreId {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    #[must_use]
    pub fn strategy(&self) -> IndexStrategy {
        self.options.strategy
    }

    /// Number of quads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    #[must_use]
    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    // === Writes ===

    /// Adds (s, p, o) to each listed context, or to the default graph when
    /// `contexts` is empty. Returns whether anything was added.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTerm`] if a term cannot occupy its position; nothing
    /// is added then. [`Error::TermCapacity`] if the term table is full;
    /// contexts written before that keep their quad.
    pub fn add(
        &mut self,
        subject: &Term,
        predicate: &Term,
        object: &Term,
        contexts: &[Term],
    ) -> Result<bool> {
        validate(Position::Subject, subject)?;
        validate(Position::Predicate, predicate)?;
        validate(Position::Object, object)?;
        for context in contexts {
            validate(Position::Context, context)?;
        }

        let targets = ContextSelector::from_slice(contexts);
        let mut added = false;
        for context in targets.write_targets() {
            added |= self.insert([subject, predicate, object, context])?;
        }
        Ok(added)
    }

    /// Adds one quad. Returns false if it was already present.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTerm`] if a term cannot occupy its position,
    /// [`Error::TermCapacity`] if the term table is full.
    pub fn add_quad(&mut self, quad: &Quad) -> Result<bool> {
        for position in Position::ALL {
            validate(position, quad.get(position))?;
        }
        self.insert(quad.terms())
    }

    /// Adds every quad, stopping at the first invalid one. Returns how many
    /// were new.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTerm`] for the first quad with a misplaced term. Quads
    /// before it stay added.
    pub fn try_extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) -> Result<usize> {
        let mut added = 0;
        for quad in quads {
            added += usize::from(self.add_quad(&quad)?);
        }
        Ok(added)
    }

    fn insert(&mut self, terms: [&Term; 4]) -> Result<bool> {
        let mut ids = [TermId::default(); 4];
        let mut fresh = [false; 4];
        for (index, term) in terms.into_iter().enumerate() {
            fresh[index] = self.terms.lookup(term).is_none();
            match self.terms.intern(term) {
                Ok(id) => ids[index] = id,
                Err(err) => {
                    // Terms created for this quad alone are orphans now.
                    for (id, _) in ids.iter().zip(fresh).take(index).filter(|(_, new)| *new) {
                        self.terms.reclaim(*id);
                    }
                    return Err(err);
                }
            }
        }
        if self.find(ids).is_some() {
            return Ok(false);
        }

        let id = self.quads.allocate(QuadRecord::new(ids));
        Arc::make_mut(&mut self.canonical).insert(id);
        for position in Position::ALL {
            if let Some(node) = self.terms.node_mut(ids[position.index()]) {
                Arc::make_mut(node.postings_mut(position)).insert(id);
            }
        }
        if let Some(sorted) = self.sorted.as_mut() {
            sorted.get_mut().insert(terms, id);
        }
        Ok(true)
    }

    /// Finds a stored quad by term ids, scanning the smallest of its four
    /// posting sets.
    fn find(&self, ids: [TermId; 4]) -> Option<QuadId> {
        let smallest = Position::ALL
            .into_iter()
            .filter_map(|position| {
                let node = self.terms.node(ids[position.index()])?;
                Some(node.postings(position))
            })
            .min_by_key(|set| set.len())?;
        smallest
            .iter()
            .find(|id| self.quads.get(*id).is_some_and(|record| record.terms() == ids))
    }

    /// Removes every quad matching the pattern. Returns whether anything was
    /// removed.
    pub fn remove(
        &mut self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.remove_pattern(&QuadPattern::new(subject, predicate, object, contexts))
    }

    /// Removes one quad. Returns false if it was absent.
    pub fn remove_quad(&mut self, quad: &Quad) -> bool {
        self.remove(
            Some(&quad.subject),
            Some(&quad.predicate),
            Some(&quad.object),
            std::slice::from_ref(&quad.context),
        )
    }

    /// Removes every quad matching `pattern`.
    pub fn remove_pattern(&mut self, pattern: &QuadPattern) -> bool {
        let mut cursor = self.cursor(pattern);
        cursor.remove_remaining(self)
    }

    /// Removes the quads of the listed contexts, or everything when
    /// `contexts` is empty.
    pub fn clear_contexts(&mut self, contexts: &[Term]) -> bool {
        if contexts.is_empty() {
            let had_quads = !self.is_empty();
            self.clear();
            return had_quads;
        }
        self.remove(None, None, None, contexts)
    }

    /// Removes every quad and term. Open cursors keep their snapshots but
    /// will find none of their quads live.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.quads.clear();
        self.canonical = Arc::new(PostingSet::new());
        if let Some(sorted) = self.sorted.as_mut() {
            sorted.get_mut().clear();
        }
    }

    /// Purges one quad from the arena, the canonical set, its posting sets
    /// and every sorted order. Each shared collection is copied before being
    /// changed.
    pub(crate) fn remove_id(&mut self, id: QuadId) -> bool {
        let Some(record) = self.quads.remove(id) else {
            return false;
        };
        Arc::make_mut(&mut self.canonical).remove(id);
        for position in Position::ALL {
            if let Some(node) = self.terms.node_mut(record.get(position)) {
                Arc::make_mut(node.postings_mut(position)).remove(id);
            }
        }
        if let Some(sorted) = self.sorted.as_mut()
            && let Some(terms) = self.terms.terms_of(&record)
        {
            sorted.get_mut().remove(terms);
        }
        if self.options.reclaim_terms {
            for term in record.terms() {
                if self.terms.reclaim(term) {
                    debug!(term = %term, "reclaimed orphan term");
                }
            }
        }
        true
    }

    // === Lookups ===

    /// Opens a cursor over the quads matching the pattern.
    ///
    /// `None` positions are wildcards; an empty `contexts` slice accepts any
    /// context.
    #[must_use]
    pub fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> Cursor {
        self.cursor(&QuadPattern::new(subject, predicate, object, contexts))
    }

    /// Opens a cursor over the quads matching `pattern`.
    #[must_use]
    pub fn cursor(&self, pattern: &QuadPattern) -> Cursor {
        let Some(resolved) = pattern.resolve(&self.terms) else {
            return Cursor::empty(self.id);
        };
        match &self.sorted {
            None => self.posting_cursor(resolved),
            Some(sorted) => self.sorted_cursor(sorted, resolved),
        }
    }

    fn posting_cursor(&self, resolved: ResolvedPattern) -> Cursor {
        let mut best: Option<(Binding, &Arc<PostingSet>)> = None;
        for position in Position::ALL {
            let Some(term) = resolved.bound_id(position) else {
                continue;
            };
            let Some(node) = self.terms.node(term) else {
                return Cursor::empty(self.id);
            };
            let set = node.postings(position);
            if set.is_empty() {
                return Cursor::empty(self.id);
            }
            if best.is_none_or(|(_, current)| set.len() < current.len()) {
                best = Some((Binding::Term(term, position), set));
            }
        }
        let (binding, set) = best.unwrap_or((Binding::Canonical, &self.canonical));
        Cursor::postings(self.id, binding, Arc::clone(set), resolved)
    }

    fn sorted_cursor(&self, sorted: &Mutex<SortedIndexes>, resolved: ResolvedPattern) -> Cursor {
        let mut bound: [Option<&Term>; 4] = [None; 4];
        for position in Position::ALL {
            if let Some(term) = resolved.bound_id(position) {
                bound[position.index()] = self.terms.term(term);
            }
        }
        let mask: PositionMask = Position::ALL
            .into_iter()
            .filter(|p| bound[p.index()].is_some())
            .collect();

        let mut indexes = sorted.lock();
        let index = indexes.select(mask);
        let order = index.order();
        let range = (
            Bound::Included(order.lower_bound(bound)),
            Bound::Included(order.upper_bound(bound)),
        );
        Cursor::sorted(self.id, order, Arc::clone(index.entries()), range, resolved)
    }

    /// Iterates the quads matching the pattern.
    #[must_use]
    pub fn iter_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> MatchIter<'_> {
        MatchIter::new(self, self.matching(subject, predicate, object, contexts))
    }

    /// Iterates every quad.
    #[must_use]
    pub fn iter(&self) -> MatchIter<'_> {
        self.iter_matching(None, None, None, &[])
    }

    /// Whether any quad matches the pattern.
    #[must_use]
    pub fn contains(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.contains_pattern(&QuadPattern::new(subject, predicate, object, contexts))
    }

    #[must_use]
    pub fn contains_quad(&self, quad: &Quad) -> bool {
        self.contains(
            Some(&quad.subject),
            Some(&quad.predicate),
            Some(&quad.object),
            std::slice::from_ref(&quad.context),
        )
    }

    #[must_use]
    pub fn contains_pattern(&self, pattern: &QuadPattern) -> bool {
        self.cursor(pattern).has_next(self).unwrap_or(false)
    }

    // === Ordered navigation ===

    /// The least quad in subject, predicate, object, context order.
    ///
    /// Terms compare as [`Term`] does: the default graph, then blank nodes,
    /// IRIs and literals.
    #[must_use]
    pub fn first(&self) -> Option<Quad> {
        match &self.sorted {
            Some(sorted) => {
                let id = *sorted.lock().entries(IndexOrder::PRIMARY)?.first_key_value()?.1;
                self.quad(id)
            }
            None => self.iter().min(),
        }
    }

    /// The greatest quad in subject, predicate, object, context order.
    #[must_use]
    pub fn last(&self) -> Option<Quad> {
        match &self.sorted {
            Some(sorted) => {
                let id = *sorted.lock().entries(IndexOrder::PRIMARY)?.last_key_value()?.1;
                self.quad(id)
            }
            None => self.iter().max(),
        }
    }

    /// Opens a cursor over the quads within `range`, ascending in subject,
    /// predicate, object, context order. The bounds need not be stored
    /// quads.
    ///
    /// A sorted store scans its primary index. A hash store sorts a snapshot
    /// of every quad first.
    ///
    /// ```
    /// use quadrant_core::QuadStore;
    /// use quadrant_common::types::{Quad, Term};
    ///
    /// let iri = |name: &str| Term::iri(format!("http://example.org/{name}"));
    /// let store: QuadStore = ["a", "b", "c", "d"]
    ///     .into_iter()
    ///     .map(|s| Quad::triple(iri(s), iri("p"), iri("o")))
    ///     .collect();
    ///
    /// let from = Quad::triple(iri("b"), iri("p"), iri("o"));
    /// let to = Quad::triple(iri("d"), iri("p"), iri("o"));
    /// let mut cursor = store.range(&from..&to);
    /// let mut subjects = Vec::new();
    /// while let Some(quad) = cursor.advance(&store).unwrap() {
    ///     subjects.push(quad.subject);
    /// }
    /// assert_eq!(subjects, vec![iri("b"), iri("c")]);
    /// ```
    #[must_use]
    pub fn range<R: RangeBounds<Quad>>(&self, range: R) -> Cursor {
        let key = |quad: &Quad| IndexOrder::PRIMARY.key(quad.terms());
        let bounds = (range.start_bound().map(key), range.end_bound().map(key));
        if crossed(&bounds) {
            return Cursor::empty(self.id);
        }
        let Some(filter) = QuadPattern::any().resolve(&self.terms) else {
            return Cursor::empty(self.id);
        };
        let entries = match &self.sorted {
            Some(sorted) => sorted.lock().entries(IndexOrder::PRIMARY).cloned(),
            None => Some(Arc::new(self.primary_entries())),
        };
        match entries {
            Some(entries) => Cursor::sorted(self.id, IndexOrder::PRIMARY, entries, bounds, filter),
            None => Cursor::empty(self.id),
        }
    }

    /// Iterates the quads within `range` in ascending order.
    #[must_use]
    pub fn iter_range<R: RangeBounds<Quad>>(&self, range: R) -> MatchIter<'_> {
        MatchIter::new(self, self.range(range))
    }

    /// Every live quad keyed in primary order.
    fn primary_entries(&self) -> SortedEntries {
        self.canonical
            .iter()
            .filter_map(|id| {
                let terms = self.terms.terms_of(self.quads.get(id)?)?;
                Some((IndexOrder::PRIMARY.key(terms), id))
            })
            .collect()
    }

    fn quad(&self, id: QuadId) -> Option<Quad> {
        self.materialize(self.record(id)?)
    }

    // === Views ===

    /// Distinct subjects of all quads.
    #[must_use]
    pub fn subjects(&self) -> TermView {
        TermView::new(QuadPattern::any(), Position::Subject)
    }

    /// Distinct predicates of all quads.
    #[must_use]
    pub fn predicates(&self) -> TermView {
        TermView::new(QuadPattern::any(), Position::Predicate)
    }

    /// Distinct objects of all quads.
    #[must_use]
    pub fn objects(&self) -> TermView {
        TermView::new(QuadPattern::any(), Position::Object)
    }

    /// Distinct contexts of all quads, the default graph included when used.
    #[must_use]
    pub fn contexts(&self) -> TermView {
        TermView::new(QuadPattern::any(), Position::Context)
    }

    /// A view restricted to the quads matching the pattern.
    #[must_use]
    pub fn filter(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> FilteredView {
        FilteredView::new(QuadPattern::new(subject, predicate, object, contexts))
    }

    /// A view of every quad that has no write operations.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyView {
        FilteredView::all().read_only()
    }

    // === Scalar accessors ===

    /// The single distinct object in the store.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] if there are several.
    pub fn object_value(&self) -> Result<Option<Term>> {
        FilteredView::all().object_value(self)
    }

    /// Like [`object_value`](Self::object_value), requiring a literal.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for a
    /// non-literal object.
    pub fn object_literal(&self) -> Result<Option<Literal>> {
        FilteredView::all().object_literal(self)
    }

    /// Like [`object_value`](Self::object_value), requiring an IRI or blank
    /// node.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for a literal.
    pub fn object_resource(&self) -> Result<Option<Term>> {
        FilteredView::all().object_resource(self)
    }

    /// Like [`object_value`](Self::object_value), requiring an IRI.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for anything
    /// but an IRI.
    pub fn object_iri(&self) -> Result<Option<Term>> {
        FilteredView::all().object_iri(self)
    }

    /// The string value of the single distinct object.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] if there are several.
    pub fn object_string(&self) -> Result<Option<String>> {
        FilteredView::all().object_string(self)
    }

    // === Admin ===

    /// Content counts and index footprint.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let (sorted_orders, sorted_bytes) = match &self.sorted {
            Some(sorted) => {
                let indexes = sorted.lock();
                let names = indexes.orders().iter().map(ToString::to_string).collect();
                (names, indexes.heap_bytes())
            }
            None => (Vec::new(), 0),
        };
        StoreStats {
            quad_count: self.len(),
            term_count: self.terms.len(),
            subject_count: self.terms.count_at(Position::Subject),
            predicate_count: self.terms.count_at(Position::Predicate),
            object_count: self.terms.count_at(Position::Object),
            context_count: self.terms.count_at(Position::Context),
            strategy: self.options.strategy,
            sorted_orders,
            memory_bytes: self.terms.heap_bytes()
                + self.quads.heap_bytes()
                + self.canonical.heap_bytes()
                + sorted_bytes,
        }
    }

    // === Cursor support ===

    pub(crate) fn record(&self, id: QuadId) -> Option<&QuadRecord> {
        self.quads.get(id)
    }

    pub(crate) fn contains_id(&self, id: QuadId) -> bool {
        self.quads.is_live(id)
    }

    pub(crate) fn materialize(&self, record: &QuadRecord) -> Option<Quad> {
        let [s, p, o, c] = self.terms.terms_of(record)?;
        Some(Quad::new(s.clone(), p.clone(), o.clone(), c.clone()))
    }

    /// The collection the store currently maintains for `binding`.
    pub(crate) fn postings(&self, binding: Binding) -> Option<&Arc<PostingSet>> {
        match binding {
            Binding::Canonical => Some(&self.canonical),
            Binding::Term(term, position) => {
                self.terms.node(term).map(|node| node.postings(position))
            }
        }
    }

    /// The entries the store currently maintains for `order`, if that order
    /// is still live.
    pub(crate) fn sorted_entries(&mut self, order: IndexOrder) -> Option<Arc<SortedEntries>> {
        self.sorted.as_mut()?.get_mut().entries(order).cloned()
    }
}

/// Whether a key range is empty by construction.
fn crossed(bounds: &(Bound<OrderKey>, Bound<OrderKey>)) -> bool {
    match bounds {
        (Bound::Included(lower), Bound::Included(upper)) => lower > upper,
        (
            Bound::Included(lower) | Bound::Excluded(lower),
            Bound::Included(upper) | Bound::Excluded(upper),
        ) => lower >= upper,
        _ => false,
    }
}

fn validate(position: Position, term: &Term) -> Result<()> {
    if position.accepts(term) {
        Ok(())
    } else {
        Err(Error::InvalidTerm {
            position,
            term: term.clone(),
        })
    }
}

impl Default for QuadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuadStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadStore")
            .field("id", &self.id)
            .field("strategy", &self.options.strategy)
            .field("quads", &self.len())
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl Extend<Quad> for QuadStore {
    /// Adds every valid quad; quads with misplaced terms are skipped with a
    /// warning. Use [`QuadStore::try_extend`] to stop on them instead.
    fn extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) {
        for quad in quads {
            if let Err(err) = self.add_quad(&quad) {
                warn!(%quad, error = %err, "skipping invalid quad");
            }
        }
    }
}

impl FromIterator<Quad> for QuadStore {
    fn from_iter<I: IntoIterator<Item = Quad>>(quads: I) -> Self {
        let mut store = Self::new();
        store.extend(quads);
        store
    }
}
