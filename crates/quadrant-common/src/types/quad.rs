//! The quad value type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Position, Term};

/// An RDF statement with its context.
///
/// `context` is [`Term::DefaultGraph`] for statements outside any named
/// graph. Quads compare by value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub context: Term,
}

impl Quad {
    #[must_use]
    pub fn new(subject: Term, predicate: Term, object: Term, context: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context,
        }
    }

    /// A quad in the default graph.
    #[must_use]
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Self::new(subject, predicate, object, Term::DefaultGraph)
    }

    /// The term at `position`.
    #[must_use]
    pub fn get(&self, position: Position) -> &Term {
        match position {
            Position::Subject => &self.subject,
            Position::Predicate => &self.predicate,
            Position::Object => &self.object,
            Position::Context => &self.context,
        }
    }

    /// The four terms in statement order.
    #[must_use]
    pub fn terms(&self) -> [&Term; 4] {
        [&self.subject, &self.predicate, &self.object, &self.context]
    }
}

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !self.context.is_default_graph() {
            write!(f, " {}", self.context)?;
        }
        write!(f, " .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_default_graph() {
        let triple = Quad::triple(
            Term::iri("http://x/a"),
            Term::iri("http://x/p"),
            Term::literal("v"),
        );
        assert_eq!(triple.to_string(), "<http://x/a> <http://x/p> \"v\" .");

        let quad = Quad::new(
            Term::blank("b"),
            Term::iri("http://x/p"),
            Term::iri("http://x/o"),
            Term::iri("http://x/g"),
        );
        assert_eq!(quad.to_string(), "_:b <http://x/p> <http://x/o> <http://x/g> .");
    }

    #[test]
    fn test_get() {
        let quad = Quad::triple(Term::iri("s"), Term::iri("p"), Term::iri("o"));
        assert_eq!(quad.get(Position::Object), &Term::iri("o"));
        assert_eq!(quad.get(Position::Context), &Term::DefaultGraph);
        assert_eq!(quad.terms()[1], &Term::iri("p"));
    }
}
