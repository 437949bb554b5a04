//! Quad patterns.
//!
//! Subject, predicate and object are either bound to one term or left as a
//! wildcard. The context is a [`ContextSelector`], which has three readings:
//!
//! - no contexts given: any context, the default graph included;
//! - the default graph alone: only statements outside named graphs;
//! - a list of contexts: statements in any of them, where the default graph
//!   may appear in the list like any other value.

use smallvec::SmallVec;

use quadrant_common::types::{Position, Quad, Term, TermId};

use crate::storage::QuadRecord;
use crate::term::TermTable;

/// Which contexts a pattern accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ContextSelector {
    /// Any context.
    #[default]
    Any,
    /// Exactly the listed contexts. An empty list accepts nothing.
    Only(SmallVec<[Term; 2]>),
}

impl ContextSelector {
    /// Reads a context argument list: empty means [`ContextSelector::Any`].
    #[must_use]
    pub fn from_slice(contexts: &[Term]) -> Self {
        if contexts.is_empty() {
            return Self::Any;
        }
        let mut only = SmallVec::<[Term; 2]>::new();
        for context in contexts {
            if !only.contains(context) {
                only.push(context.clone());
            }
        }
        Self::Only(only)
    }

    /// A selector accepting one context.
    #[must_use]
    pub fn single(context: Term) -> Self {
        Self::Only(smallvec::smallvec![context])
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[must_use]
    pub fn accepts(&self, context: &Term) -> bool {
        match self {
            Self::Any => true,
            Self::Only(contexts) => contexts.contains(context),
        }
    }

    /// The contexts written by an insert under this selector: the listed
    /// ones, or the default graph when any context is accepted.
    #[must_use]
    pub fn write_targets(&self) -> &[Term] {
        match self {
            Self::Any => std::slice::from_ref(&DEFAULT_GRAPH),
            Self::Only(contexts) => contexts,
        }
    }

    /// The selector accepting what both accept, or `None` when `narrower`
    /// names a context this one rejects.
    #[must_use]
    pub fn narrow(&self, narrower: &Self) -> Option<Self> {
        match (self, narrower) {
            (_, Self::Any) => Some(self.clone()),
            (Self::Any, _) => Some(narrower.clone()),
            (Self::Only(_), Self::Only(wanted)) => wanted
                .iter()
                .all(|context| self.accepts(context))
                .then(|| narrower.clone()),
        }
    }
}

static DEFAULT_GRAPH: Term = Term::DefaultGraph;

/// A quad pattern: optional subject, predicate and object plus a context
/// selector.
///
/// # Example
///
/// ```
/// use quadrant_core::QuadPattern;
/// use quadrant_common::types::{Quad, Term};
///
/// let knows = Term::iri("http://example.org/knows");
/// let pattern = QuadPattern::new(None, Some(&knows), None, &[]);
///
/// let quad = Quad::triple(
///     Term::iri("http://example.org/a"),
///     knows.clone(),
///     Term::iri("http://example.org/b"),
/// );
/// assert!(pattern.matches(&quad));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
    pub contexts: ContextSelector,
}

impl QuadPattern {
    #[must_use]
    pub fn new(
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> Self {
        Self {
            subject: subject.cloned(),
            predicate: predicate.cloned(),
            object: object.cloned(),
            contexts: ContextSelector::from_slice(contexts),
        }
    }

    /// Matches every quad.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches no quad.
    #[must_use]
    pub fn nothing() -> Self {
        Self {
            contexts: ContextSelector::Only(SmallVec::new()),
            ..Self::default()
        }
    }

    /// True for patterns that can never match.
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(&self.contexts, ContextSelector::Only(list) if list.is_empty())
    }

    /// The bound term at a subject, predicate or object position. Contexts
    /// live in [`QuadPattern::contexts`], so this is `None` for
    /// [`Position::Context`].
    #[must_use]
    pub fn bound(&self, position: Position) -> Option<&Term> {
        match position {
            Position::Subject => self.subject.as_ref(),
            Position::Predicate => self.predicate.as_ref(),
            Position::Object => self.object.as_ref(),
            Position::Context => None,
        }
    }

    /// A copy with `position` bound to `term`. For the context position
    /// the selector becomes that single context.
    #[must_use]
    pub fn with(&self, position: Position, term: &Term) -> Self {
        let mut pattern = self.clone();
        match position {
            Position::Subject => pattern.subject = Some(term.clone()),
            Position::Predicate => pattern.predicate = Some(term.clone()),
            Position::Object => pattern.object = Some(term.clone()),
            Position::Context => pattern.contexts = ContextSelector::single(term.clone()),
        }
        pattern
    }

    /// Combines this pattern with the values of `narrower`. Wildcards on
    /// either side take the other side's value; `None` if both bind a
    /// position to different terms or `narrower` selects a context this
    /// pattern excludes.
    #[must_use]
    pub fn narrow(&self, narrower: &QuadPattern) -> Option<QuadPattern> {
        fn pick(own: &Option<Term>, other: &Option<Term>) -> Option<Option<Term>> {
            match (own, other) {
                (Some(a), Some(b)) if a != b => None,
                (Some(a), _) => Some(Some(a.clone())),
                (None, b) => Some(b.clone()),
            }
        }

        Some(QuadPattern {
            subject: pick(&self.subject, &narrower.subject)?,
            predicate: pick(&self.predicate, &narrower.predicate)?,
            object: pick(&self.object, &narrower.object)?,
            contexts: self.contexts.narrow(&narrower.contexts)?,
        })
    }

    #[must_use]
    pub fn matches(&self, quad: &Quad) -> bool {
        [Position::Subject, Position::Predicate, Position::Object]
            .into_iter()
            .all(|p| self.bound(p).is_none_or(|term| term == quad.get(p)))
            && self.contexts.accepts(&quad.context)
    }

    /// Translates the pattern into term ids. Returns `None` when it cannot
    /// match anything: a bound term is unknown or cannot occupy its
    /// position, or no listed context is known.
    pub(crate) fn resolve(&self, terms: &TermTable) -> Option<ResolvedPattern> {
        let mut ids = [None; 3];
        for position in [Position::Subject, Position::Predicate, Position::Object] {
            if let Some(term) = self.bound(position) {
                if !position.accepts(term) {
                    return None;
                }
                ids[position.index()] = Some(terms.lookup(term)?);
            }
        }

        let contexts = match &self.contexts {
            ContextSelector::Any => ResolvedContexts::Any,
            ContextSelector::Only(list) => {
                let known: SmallVec<[TermId; 2]> = list
                    .iter()
                    .filter(|term| Position::Context.accepts(term))
                    .filter_map(|term| terms.lookup(term))
                    .collect();
                match known.len() {
                    0 => return None,
                    1 => ResolvedContexts::One(known[0]),
                    _ => ResolvedContexts::Many(known),
                }
            }
        };

        Some(ResolvedPattern { ids, contexts })
    }
}

/// Context selection in id space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedContexts {
    Any,
    One(TermId),
    Many(SmallVec<[TermId; 2]>),
}

/// A pattern whose terms were all found in the term table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedPattern {
    /// Subject, predicate and object ids.
    pub(crate) ids: [Option<TermId>; 3],
    pub(crate) contexts: ResolvedContexts,
}

impl ResolvedPattern {
    /// The id a position is bound to, counting a single context as bound.
    pub(crate) fn bound_id(&self, position: Position) -> Option<TermId> {
        match position {
            Position::Context => match self.contexts {
                ResolvedContexts::One(id) => Some(id),
                _ => None,
            },
            _ => self.ids[position.index()],
        }
    }

    pub(crate) fn matches(&self, record: &QuadRecord) -> bool {
        let spo = [Position::Subject, Position::Predicate, Position::Object]
            .into_iter()
            .all(|p| self.ids[p.index()].is_none_or(|id| id == record.get(p)));
        spo && match &self.contexts {
            ResolvedContexts::Any => true,
            ResolvedContexts::One(id) => *id == record.get(Position::Context),
            ResolvedContexts::Many(ids) => ids.contains(&record.get(Position::Context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(name: &str) -> Term {
        Term::iri(format!("http://x/{name}"))
    }

    #[test]
    fn test_context_selector_readings() {
        let any = ContextSelector::from_slice(&[]);
        assert!(any.accepts(&Term::DefaultGraph));
        assert!(any.accepts(&iri("g")));

        let default_only = ContextSelector::from_slice(&[Term::DefaultGraph]);
        assert!(default_only.accepts(&Term::DefaultGraph));
        assert!(!default_only.accepts(&iri("g")));

        let mixed = ContextSelector::from_slice(&[iri("g"), Term::DefaultGraph, iri("g")]);
        assert!(mixed.accepts(&Term::DefaultGraph));
        assert!(mixed.accepts(&iri("g")));
        assert!(!mixed.accepts(&iri("h")));
        assert_eq!(mixed.write_targets().len(), 2);

        assert_eq!(any.write_targets(), &[Term::DefaultGraph]);
    }

    #[test]
    fn test_narrow_contexts() {
        let g = ContextSelector::from_slice(&[iri("g1"), iri("g2")]);
        assert_eq!(g.narrow(&ContextSelector::Any), Some(g.clone()));
        assert_eq!(
            g.narrow(&ContextSelector::single(iri("g1"))),
            Some(ContextSelector::single(iri("g1")))
        );
        assert_eq!(g.narrow(&ContextSelector::single(iri("g3"))), None);
        assert_eq!(
            ContextSelector::Any.narrow(&ContextSelector::single(iri("g3"))),
            Some(ContextSelector::single(iri("g3")))
        );
    }

    #[test]
    fn test_narrow_pattern() {
        let base = QuadPattern::new(Some(&iri("a")), None, None, &[]);

        let narrowed = base
            .narrow(&QuadPattern::new(None, Some(&iri("p")), None, &[]))
            .unwrap();
        assert_eq!(narrowed.subject, Some(iri("a")));
        assert_eq!(narrowed.predicate, Some(iri("p")));

        assert!(base.narrow(&QuadPattern::new(Some(&iri("b")), None, None, &[])).is_none());
        assert_eq!(
            base.narrow(&QuadPattern::new(Some(&iri("a")), None, None, &[])),
            Some(base.clone())
        );
    }

    #[test]
    fn test_matches() {
        let quad = Quad::new(iri("a"), iri("p"), Term::literal("v"), iri("g"));
        assert!(QuadPattern::any().matches(&quad));
        assert!(QuadPattern::new(Some(&iri("a")), None, None, &[iri("g")]).matches(&quad));
        assert!(!QuadPattern::new(None, None, None, &[Term::DefaultGraph]).matches(&quad));
        assert!(!QuadPattern::nothing().matches(&quad));
        assert!(QuadPattern::nothing().is_nothing());
    }

    #[test]
    fn test_with() {
        let pattern = QuadPattern::any()
            .with(Position::Object, &iri("o"))
            .with(Position::Context, &iri("g"));
        assert_eq!(pattern.bound(Position::Object), Some(&iri("o")));
        assert_eq!(pattern.contexts, ContextSelector::single(iri("g")));

        let narrowed = QuadPattern::new(None, None, Some(&iri("o")), &[iri("g"), iri("h")])
            .narrow(&QuadPattern::any().with(Position::Context, &iri("g")));
        assert_eq!(narrowed, Some(pattern));
    }

    #[test]
    fn test_resolve() {
        let mut table = TermTable::new();
        let a = table.intern(&iri("a")).unwrap();
        let g = table.intern(&iri("g")).unwrap();

        let resolved = QuadPattern::new(Some(&iri("a")), None, None, &[iri("g"), iri("unknown")])
            .resolve(&table)
            .unwrap();
        assert_eq!(resolved.ids, [Some(a), None, None]);
        assert_eq!(resolved.contexts, ResolvedContexts::One(g));
        assert_eq!(resolved.bound_id(Position::Context), Some(g));

        assert!(QuadPattern::new(Some(&iri("b")), None, None, &[]).resolve(&table).is_none());
        assert!(QuadPattern::new(None, None, None, &[iri("nope")]).resolve(&table).is_none());
        assert!(QuadPattern::nothing().resolve(&table).is_none());

        // A literal can never be a subject, even when it is interned.
        table.intern(&Term::literal("lit")).unwrap();
        let literal = Term::literal("lit");
        assert!(QuadPattern::new(Some(&literal), None, None, &[]).resolve(&table).is_none());
    }
}
