//! Derived views over a store.
//!
//! A [`TermView`] projects the quads matching a pattern onto one position
//! and deduplicates: "the objects of (alice, knows, ?)", "the contexts
//! holding quads about bob". A [`FilteredView`] narrows the store to a
//! pattern and behaves like a smaller store: adds outside the pattern are
//! rejected, removals and lookups outside it find nothing.
//!
//! Views hold no data. They are re-evaluated against the store they are
//! given on every call, so they always reflect its current content.

use quadrant_common::collections::{QuadrantIndexSet, quadrant_index_set};
use quadrant_common::types::{Literal, Position, Term};
use quadrant_common::utils::error::{Error, Result};

use crate::cursor::{Cursor, MatchIter};
use crate::pattern::{ContextSelector, QuadPattern};
use crate::store::QuadStore;

/// The distinct terms at one position among the quads matching a pattern.
///
/// # Example
///
/// ```
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::Term;
///
/// let mut store = QuadStore::new();
/// let a = Term::iri("http://example.org/a");
/// let knows = Term::iri("http://example.org/knows");
/// let g1 = Term::iri("http://example.org/g1");
/// let g2 = Term::iri("http://example.org/g2");
/// store.add(&a, &knows, &Term::iri("http://example.org/b"), &[g1.clone()]).unwrap();
/// store.add(&a, &knows, &Term::iri("http://example.org/c"), &[g2.clone()]).unwrap();
///
/// assert_eq!(store.subjects().iter(&store).collect::<Vec<_>>(), vec![a]);
/// assert_eq!(store.contexts().iter(&store).collect::<Vec<_>>(), vec![g1, g2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermView {
    pattern: QuadPattern,
    position: Position,
}

impl TermView {
    /// Projects `pattern` onto `position`.
    ///
    /// A term the pattern binds at `position` still restricts the view: it
    /// then holds that one term at most, and other terms are neither found
    /// nor accepted.
    #[must_use]
    pub fn new(pattern: QuadPattern, position: Position) -> Self {
        Self { pattern, position }
    }

    #[must_use]
    pub fn pattern(&self) -> &QuadPattern {
        &self.pattern
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The distinct terms, in first-seen order.
    #[must_use]
    pub fn iter<'a>(&self, store: &'a QuadStore) -> TermIter<'a> {
        TermIter {
            store,
            cursor: store.cursor(&self.pattern),
            position: self.position,
            seen: quadrant_index_set(),
        }
    }

    /// Number of distinct terms. Walks every match.
    #[must_use]
    pub fn len(&self, store: &QuadStore) -> usize {
        self.iter(store).count()
    }

    #[must_use]
    pub fn is_empty(&self, store: &QuadStore) -> bool {
        !store.contains_pattern(&self.pattern)
    }

    /// The view's pattern with `term` in the projected slot, `None` when the
    /// pattern excludes it.
    fn narrow(&self, term: &Term) -> Option<QuadPattern> {
        if self.pattern.is_nothing() {
            return None;
        }
        self.pattern.narrow(&QuadPattern::any().with(self.position, term))
    }

    #[must_use]
    pub fn contains(&self, store: &QuadStore, term: &Term) -> bool {
        self.narrow(term).is_some_and(|pattern| store.contains_pattern(&pattern))
    }

    /// Adds the quad formed by the view's pattern with `term` in the
    /// projected slot. Returns false if it was already present.
    ///
    /// Contexts are written as the pattern selects them; a pattern accepting
    /// any context writes to the default graph.
    ///
    /// # Errors
    ///
    /// [`Error::FilteredOut`] if the pattern excludes `term`,
    /// [`Error::IncompleteStatement`] if it leaves another subject,
    /// predicate or object slot open, [`Error::InvalidTerm`] if `term`
    /// cannot occupy the slot.
    pub fn add(&self, store: &mut QuadStore, term: &Term) -> Result<bool> {
        let statement = self.narrow(term).ok_or(Error::FilteredOut)?;
        let [subject, predicate, object] = complete(&statement)?;
        store.add(subject, predicate, object, statement.contexts.write_targets())
    }

    /// Removes every quad of the view having `term` in the projected slot.
    pub fn remove(&self, store: &mut QuadStore, term: &Term) -> bool {
        self.narrow(term).is_some_and(|pattern| store.remove_pattern(&pattern))
    }

    /// Removes every quad the view covers.
    pub fn clear(&self, store: &mut QuadStore) -> bool {
        store.remove_pattern(&self.pattern)
    }
}

/// Subject, predicate and object of a fully bound pattern.
fn complete(pattern: &QuadPattern) -> Result<[&Term; 3]> {
    let slot = |position| {
        pattern
            .bound(position)
            .ok_or(Error::IncompleteStatement { position })
    };
    Ok([
        slot(Position::Subject)?,
        slot(Position::Predicate)?,
        slot(Position::Object)?,
    ])
}

/// Iterator over the distinct terms of a [`TermView`].
#[derive(Debug)]
pub struct TermIter<'a> {
    store: &'a QuadStore,
    cursor: Cursor,
    position: Position,
    seen: QuadrantIndexSet<Term>,
}

impl Iterator for TermIter<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        loop {
            let quad = self.cursor.advance(self.store).ok().flatten()?;
            let term = quad.get(self.position);
            if !self.seen.contains(term) {
                self.seen.insert(term.clone());
                return Some(term.clone());
            }
        }
    }
}

/// The part of a store matching a pattern.
///
/// ```
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::Term;
/// use quadrant_common::Error;
///
/// let mut store = QuadStore::new();
/// let alice = Term::iri("http://example.org/alice");
/// let name = Term::iri("http://example.org/name");
/// let view = store.filter(Some(&alice), Some(&name), None, &[]);
///
/// view.add(&mut store, None, None, Some(&Term::literal("Alice")), &[]).unwrap();
/// assert_eq!(view.object_string(&store).unwrap().as_deref(), Some("Alice"));
///
/// let bob = Term::iri("http://example.org/bob");
/// let err = view.add(&mut store, Some(&bob), None, Some(&Term::literal("Bob")), &[]);
/// assert_eq!(err, Err(Error::FilteredOut));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    pattern: QuadPattern,
}

impl FilteredView {
    #[must_use]
    pub fn new(pattern: QuadPattern) -> Self {
        Self { pattern }
    }

    /// The view of every quad.
    #[must_use]
    pub fn all() -> Self {
        Self::new(QuadPattern::any())
    }

    /// A view that matches nothing and accepts nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(QuadPattern::nothing())
    }

    #[must_use]
    pub fn pattern(&self) -> &QuadPattern {
        &self.pattern
    }

    /// Combines the view's pattern with the given values, `None` when they
    /// contradict it.
    fn narrow(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> Option<QuadPattern> {
        if self.pattern.is_nothing() {
            return None;
        }
        self.pattern
            .narrow(&QuadPattern::new(subject, predicate, object, contexts))
    }

    #[must_use]
    pub fn iter<'a>(&self, store: &'a QuadStore) -> MatchIter<'a> {
        MatchIter::new(store, store.cursor(&self.pattern))
    }

    /// Opens a removal-capable cursor over the view.
    #[must_use]
    pub fn cursor(&self, store: &QuadStore) -> Cursor {
        store.cursor(&self.pattern)
    }

    #[must_use]
    pub fn len(&self, store: &QuadStore) -> usize {
        self.iter(store).count()
    }

    #[must_use]
    pub fn is_empty(&self, store: &QuadStore) -> bool {
        !store.contains_pattern(&self.pattern)
    }

    /// Whether the view holds a quad matching the given values.
    #[must_use]
    pub fn contains(
        &self,
        store: &QuadStore,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.narrow(subject, predicate, object, contexts)
            .is_some_and(|pattern| store.contains_pattern(&pattern))
    }

    /// Adds a statement, taking unset values from the view's pattern. With
    /// no contexts given, the statement goes to every context the view
    /// selects, or to the default graph if it selects any context.
    ///
    /// # Errors
    ///
    /// [`Error::FilteredOut`] if a value contradicts the view,
    /// [`Error::IncompleteStatement`] if a subject, predicate or object is
    /// still unset, [`Error::InvalidTerm`] for a misplaced term.
    pub fn add(
        &self,
        store: &mut QuadStore,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> Result<bool> {
        let statement = self
            .narrow(subject, predicate, object, contexts)
            .ok_or(Error::FilteredOut)?;
        let [subject, predicate, object] = complete(&statement)?;
        store.add(subject, predicate, object, statement.contexts.write_targets())
    }

    /// Removes the quads of the view matching the given values.
    pub fn remove(
        &self,
        store: &mut QuadStore,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.narrow(subject, predicate, object, contexts)
            .is_some_and(|pattern| store.remove_pattern(&pattern))
    }

    /// A narrower view; empty when the values contradict this one.
    #[must_use]
    pub fn filter(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> FilteredView {
        self.narrow(subject, predicate, object, contexts)
            .map_or_else(Self::empty, Self::new)
    }

    /// Removes every quad of the view.
    pub fn clear(&self, store: &mut QuadStore) -> bool {
        store.remove_pattern(&self.pattern)
    }

    #[must_use]
    pub fn subjects(&self) -> TermView {
        TermView::new(self.pattern.clone(), Position::Subject)
    }

    #[must_use]
    pub fn predicates(&self) -> TermView {
        TermView::new(self.pattern.clone(), Position::Predicate)
    }

    #[must_use]
    pub fn objects(&self) -> TermView {
        TermView::new(self.pattern.clone(), Position::Object)
    }

    #[must_use]
    pub fn contexts(&self) -> TermView {
        TermView::new(self.pattern.clone(), Position::Context)
    }

    /// The same quads, without the write operations.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyView {
        ReadOnlyView { view: self.clone() }
    }

    /// The single distinct object in the view, if any.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] when the view has two or more distinct
    /// objects.
    pub fn object_value(&self, store: &QuadStore) -> Result<Option<Term>> {
        let mut objects = self.objects().iter(store);
        let Some(first) = objects.next() else {
            return Ok(None);
        };
        match objects.next() {
            Some(second) => Err(Error::Multiplicity { first, second }),
            None => Ok(Some(first)),
        }
    }

    /// The single object, which must be a literal.
    ///
    /// # Errors
    ///
    /// As [`object_value`](Self::object_value), plus
    /// [`Error::UnexpectedKind`] for a non-literal.
    pub fn object_literal(&self, store: &QuadStore) -> Result<Option<Literal>> {
        self.object_value(store)?
            .map(|term| match term {
                Term::Literal(literal) => Ok(literal),
                found => Err(Error::UnexpectedKind {
                    expected: "literal",
                    found,
                }),
            })
            .transpose()
    }

    /// The single object, which must be an IRI or a blank node.
    ///
    /// # Errors
    ///
    /// As [`object_value`](Self::object_value), plus
    /// [`Error::UnexpectedKind`] for a literal.
    pub fn object_resource(&self, store: &QuadStore) -> Result<Option<Term>> {
        self.object_of_kind(store, "resource", Term::is_resource)
    }

    /// The single object, which must be an IRI.
    ///
    /// # Errors
    ///
    /// As [`object_value`](Self::object_value), plus
    /// [`Error::UnexpectedKind`] for anything else.
    pub fn object_iri(&self, store: &QuadStore) -> Result<Option<Term>> {
        self.object_of_kind(store, "IRI", Term::is_iri)
    }

    /// The string value of the single object.
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] when the view has several objects.
    pub fn object_string(&self, store: &QuadStore) -> Result<Option<String>> {
        Ok(self
            .object_value(store)?
            .map(|term| term.lexical_value().to_owned()))
    }

    fn object_of_kind(
        &self,
        store: &QuadStore,
        expected: &'static str,
        accepts: fn(&Term) -> bool,
    ) -> Result<Option<Term>> {
        match self.object_value(store)? {
            Some(term) if !accepts(&term) => Err(Error::UnexpectedKind {
                expected,
                found: term,
            }),
            value => Ok(value),
        }
    }
}

/// A [`FilteredView`] that can only be read.
///
/// It has no write operations at all, so handing one out guarantees the
/// receiver cannot change the store through it:
///
/// ```compile_fail
/// use quadrant_core::QuadStore;
/// use quadrant_common::types::Term;
///
/// let mut store = QuadStore::new();
/// let view = store.read_only();
/// let a = Term::iri("http://example.org/a");
/// view.add(&mut store, Some(&a), Some(&a), Some(&a), &[]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyView {
    view: FilteredView,
}

impl ReadOnlyView {
    #[must_use]
    pub fn pattern(&self) -> &QuadPattern {
        self.view.pattern()
    }

    #[must_use]
    pub fn iter<'a>(&self, store: &'a QuadStore) -> MatchIter<'a> {
        self.view.iter(store)
    }

    #[must_use]
    pub fn len(&self, store: &QuadStore) -> usize {
        self.view.len(store)
    }

    #[must_use]
    pub fn is_empty(&self, store: &QuadStore) -> bool {
        self.view.is_empty(store)
    }

    #[must_use]
    pub fn contains(
        &self,
        store: &QuadStore,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.view.contains(store, subject, predicate, object, contexts)
    }

    /// A narrower read-only view.
    #[must_use]
    pub fn filter(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> ReadOnlyView {
        self.view.filter(subject, predicate, object, contexts).read_only()
    }

    #[must_use]
    pub fn subjects<'a>(&self, store: &'a QuadStore) -> TermIter<'a> {
        self.view.subjects().iter(store)
    }

    #[must_use]
    pub fn predicates<'a>(&self, store: &'a QuadStore) -> TermIter<'a> {
        self.view.predicates().iter(store)
    }

    #[must_use]
    pub fn objects<'a>(&self, store: &'a QuadStore) -> TermIter<'a> {
        self.view.objects().iter(store)
    }

    #[must_use]
    pub fn contexts<'a>(&self, store: &'a QuadStore) -> TermIter<'a> {
        self.view.contexts().iter(store)
    }

    /// See [`FilteredView::object_value`].
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] for several distinct objects.
    pub fn object_value(&self, store: &QuadStore) -> Result<Option<Term>> {
        self.view.object_value(store)
    }

    /// See [`FilteredView::object_literal`].
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] or [`Error::UnexpectedKind`].
    pub fn object_literal(&self, store: &QuadStore) -> Result<Option<Literal>> {
        self.view.object_literal(store)
    }

    /// See [`FilteredView::object_resource`].
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] or [`Error::UnexpectedKind`].
    pub fn object_resource(&self, store: &QuadStore) -> Result<Option<Term>> {
        self.view.object_resource(store)
    }

    /// See [`FilteredView::object_iri`].
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] or [`Error::UnexpectedKind`].
    pub fn object_iri(&self, store: &QuadStore) -> Result<Option<Term>> {
        self.view.object_iri(store)
    }

    /// See [`FilteredView::object_string`].
    ///
    /// # Errors
    ///
    /// [`Error::Multiplicity`] for several distinct objects.
    pub fn object_string(&self, store: &QuadStore) -> Result<Option<String>> {
        self.view.object_string(store)
    }
}

impl From<FilteredView> for ReadOnlyView {
    fn from(view: FilteredView) -> Self {
        Self { view }
    }
}

impl Default for FilteredView {
    fn default() -> Self {
        Self::all()
    }
}

impl From<ContextSelector> for FilteredView {
    /// The view of the quads in the selected contexts.
    fn from(contexts: ContextSelector) -> Self {
        Self::new(QuadPattern {
            contexts,
            ..QuadPattern::default()
        })
    }
}
