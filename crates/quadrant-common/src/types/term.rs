//! RDF terms.
//!
//! A [`Term`] is anything that can sit in a statement slot: an IRI, a blank
//! node, a literal, or the default graph marker used as the context of
//! statements that belong to no named graph. Strings are held as `ArcStr`, so
//! cloning a term is a reference count bump.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Datatype of plain literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Datatype of language-tagged literals.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// The broad category of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    /// The default graph marker.
    DefaultGraph,
    /// A blank node.
    BlankNode,
    /// An IRI.
    Iri,
    /// A literal.
    Literal,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultGraph => write!(f, "default graph"),
            Self::BlankNode => write!(f, "blank node"),
            Self::Iri => write!(f, "IRI"),
            Self::Literal => write!(f, "literal"),
        }
    }
}

/// An RDF literal: a lexical form with either a datatype or a language tag.
///
/// Language tags are normalized to lowercase, so `"chat"@FR` and `"chat"@fr`
/// are the same term.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: ArcStr,
    datatype: ArcStr,
    language: Option<ArcStr>,
}

impl Literal {
    /// A plain string literal (`xsd:string`).
    #[must_use]
    pub fn simple(lexical: impl Into<ArcStr>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: arcstr::literal!(XSD_STRING),
            language: None,
        }
    }

    /// A literal with an explicit datatype IRI.
    #[must_use]
    pub fn typed(lexical: impl Into<ArcStr>, datatype: impl Into<ArcStr>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        }
    }

    /// A language-tagged literal (`rdf:langString`).
    #[must_use]
    pub fn lang(lexical: impl Into<ArcStr>, language: &str) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: arcstr::literal!(RDF_LANG_STRING),
            language: Some(ArcStr::from(language.to_ascii_lowercase())),
        }
    }

    /// The lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype IRI.
    #[must_use]
    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    /// The language tag, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns true for a plain `xsd:string` literal.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.language.is_none() && &*self.datatype == XSD_STRING
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                _ => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if self.is_simple() {
            Ok(())
        } else {
            write!(f, "^^<{}>", self.datatype)
        }
    }
}

/// A value that can occupy a statement position.
///
/// Terms are compared by value. The derived ordering (default graph, then
/// blank nodes, then IRIs, then literals, each group ordered lexically) is the
/// order sorted indexes use.
///
/// # Examples
///
/// ```
/// use quadrant_common::types::{Literal, Term};
///
/// let alice = Term::iri("http://example.org/alice");
/// let name = Term::from(Literal::lang("Alice", "EN"));
///
/// assert!(alice.is_resource());
/// assert_eq!(name.to_string(), "\"Alice\"@en");
/// assert!(Term::DefaultGraph < alice);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Context of statements outside any named graph.
    DefaultGraph,
    /// A blank node, identified by its label.
    BlankNode(ArcStr),
    /// An IRI.
    Iri(ArcStr),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Creates an IRI term.
    #[must_use]
    pub fn iri(iri: impl Into<ArcStr>) -> Self {
        Self::Iri(iri.into())
    }

    /// Creates a blank node term.
    #[must_use]
    pub fn blank(label: impl Into<ArcStr>) -> Self {
        Self::BlankNode(label.into())
    }

    /// Creates a plain string literal term.
    #[must_use]
    pub fn literal(lexical: impl Into<ArcStr>) -> Self {
        Self::Literal(Literal::simple(lexical))
    }

    /// Returns the kind of this term.
    #[must_use]
    pub const fn kind(&self) -> TermKind {
        match self {
            Self::DefaultGraph => TermKind::DefaultGraph,
            Self::BlankNode(_) => TermKind::BlankNode,
            Self::Iri(_) => TermKind::Iri,
            Self::Literal(_) => TermKind::Literal,
        }
    }

    #[must_use]
    pub const fn is_default_graph(&self) -> bool {
        matches!(self, Self::DefaultGraph)
    }

    #[must_use]
    pub const fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    #[must_use]
    pub const fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns true for IRIs and blank nodes.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Iri(_) | Self::BlankNode(_))
    }

    /// Returns the IRI string if this is an IRI.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the literal if this is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// The string value of the term: the IRI, the blank node label or the
    /// literal's lexical form. Empty for the default graph.
    #[must_use]
    pub fn lexical_value(&self) -> &str {
        match self {
            Self::DefaultGraph => "",
            Self::BlankNode(label) | Self::Iri(label) => label,
            Self::Literal(literal) => literal.lexical(),
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultGraph => write!(f, "DEFAULT"),
            Self::BlankNode(label) => write!(f, "_:{label}"),
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order() {
        let mut terms = vec![
            Term::literal("a"),
            Term::iri("http://example.org/b"),
            Term::DefaultGraph,
            Term::blank("b0"),
            Term::iri("http://example.org/a"),
        ];
        terms.sort();

        assert_eq!(
            terms,
            vec![
                Term::DefaultGraph,
                Term::blank("b0"),
                Term::iri("http://example.org/a"),
                Term::iri("http://example.org/b"),
                Term::literal("a"),
            ]
        );
    }

    #[test]
    fn test_language_tag_normalized() {
        assert_eq!(Literal::lang("chat", "FR"), Literal::lang("chat", "fr"));
        assert_eq!(Literal::lang("chat", "FR").language(), Some("fr"));
        assert_eq!(Literal::lang("chat", "fr").datatype(), RDF_LANG_STRING);
    }

    #[test]
    fn test_literal_equality_includes_datatype() {
        let plain = Literal::simple("42");
        let typed = Literal::typed("42", "http://www.w3.org/2001/XMLSchema#integer");
        assert_ne!(plain, typed);
        assert_eq!(plain, Literal::typed("42", XSD_STRING));
        assert!(plain.is_simple());
        assert!(!typed.is_simple());
    }

    #[test]
    fn test_display() {
        assert_eq!(Term::iri("http://x/a").to_string(), "<http://x/a>");
        assert_eq!(Term::blank("n1").to_string(), "_:n1");
        assert_eq!(Term::literal("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(
            Term::from(Literal::typed("1", "http://x/int")).to_string(),
            "\"1\"^^<http://x/int>"
        );
        assert_eq!(Term::DefaultGraph.to_string(), "DEFAULT");
    }

    #[test]
    fn test_accessors() {
        let iri = Term::iri("http://x/a");
        assert_eq!(iri.as_iri(), Some("http://x/a"));
        assert!(iri.as_literal().is_none());
        assert_eq!(iri.kind(), TermKind::Iri);
        assert_eq!(iri.lexical_value(), "http://x/a");

        let literal = Term::literal("v");
        assert_eq!(literal.as_literal().map(Literal::lexical), Some("v"));
        assert!(!literal.is_resource());
        assert_eq!(Term::DefaultGraph.lexical_value(), "");
    }

    #[test]
    fn test_serde_roundtrip() {
        let term = Term::from(Literal::lang("bonjour", "fr"));
        let json = serde_json::to_string(&term).unwrap();
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(term, back);
    }
}
