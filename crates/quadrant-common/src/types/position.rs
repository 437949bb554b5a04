//! Statement positions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Term;

/// One of the four slots of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Subject = 0,
    Predicate = 1,
    Object = 2,
    Context = 3,
}

impl Position {
    /// All positions in statement order.
    pub const ALL: [Self; 4] = [Self::Subject, Self::Predicate, Self::Object, Self::Context];

    /// Slot index in statement order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single-letter code used in index order names (`s`, `p`, `o`, `c`).
    #[inline]
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Subject => 's',
            Self::Predicate => 'p',
            Self::Object => 'o',
            Self::Context => 'c',
        }
    }

    /// Parses a single-letter position code.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            's' => Some(Self::Subject),
            'p' => Some(Self::Predicate),
            'o' => Some(Self::Object),
            'c' | 'g' => Some(Self::Context),
            _ => None,
        }
    }

    /// Whether `term` may be written into this position.
    ///
    /// Subjects are IRIs or blank nodes, predicates are IRIs, objects are
    /// anything but the default graph, contexts are IRIs, blank nodes or the
    /// default graph.
    #[must_use]
    pub const fn accepts(self, term: &Term) -> bool {
        match self {
            Self::Subject => term.is_resource(),
            Self::Predicate => term.is_iri(),
            Self::Object => !term.is_default_graph(),
            Self::Context => term.is_resource() || term.is_default_graph(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject => write!(f, "subject"),
            Self::Predicate => write!(f, "predicate"),
            Self::Object => write!(f, "object"),
            Self::Context => write!(f, "context"),
        }
    }
}

/// A set of positions, typically the bound positions of a pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionMask(u8);

impl PositionMask {
    /// No position bound.
    pub const EMPTY: Self = Self(0);

    /// Every position bound.
    pub const FULL: Self = Self(0b1111);

    /// Returns a copy with `position` added.
    #[inline]
    #[must_use]
    pub const fn with(self, position: Position) -> Self {
        Self(self.0 | (1 << position.index()))
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, position: Position) -> bool {
        self.0 & (1 << position.index()) != 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Positions in the mask, in statement order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl fmt::Debug for PositionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: String = self.iter().map(Position::code).collect();
        write!(f, "PositionMask({codes})")
    }
}

impl FromIterator<Position> for PositionMask {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
