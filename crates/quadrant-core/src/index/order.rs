//! Key orders for sorted indexes.
//!
//! An [`IndexOrder`] is a permutation of the four statement positions. A
//! sorted index keyed by `posc` stores every quad under the key
//! (predicate, object, subject, context), so any pattern binding a prefix of
//! that permutation becomes one contiguous range.

use quadrant_common::types::{Position, PositionMask, Term};
use std::fmt;

/// One component of an [`OrderKey`].
///
/// `Before` and `After` never appear in stored keys; they stand in for
/// unbound positions when building range bounds and sort below and above
/// every term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Before,
    Term(Term),
    After,
}

/// A quad's terms arranged in the order of some [`IndexOrder`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey(pub [Slot; 4]);

/// A permutation of (subject, predicate, object, context).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexOrder([Position; 4]);

impl IndexOrder {
    /// The order every sorted store keeps.
    pub const PRIMARY: Self = Self(Position::ALL);

    /// Builds an order from four distinct positions.
    #[must_use]
    pub fn new(positions: [Position; 4]) -> Option<Self> {
        let mask: PositionMask = positions.into_iter().collect();
        (mask == PositionMask::FULL).then_some(Self(positions))
    }

    /// Parses a name such as `"spoc"` or `"posc"`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let mut positions = [Position::Subject; 4];
        let mut chars = name.chars();
        for slot in &mut positions {
            *slot = Position::from_code(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }
        Self::new(positions)
    }

    /// The order synthesized for a pattern binding `bound`: bound positions
    /// first in statement order, then the unbound ones as predicate, object,
    /// context, subject.
    #[must_use]
    pub fn for_mask(bound: PositionMask) -> Self {
        const UNBOUND_ORDER: [Position; 4] = [
            Position::Predicate,
            Position::Object,
            Position::Context,
            Position::Subject,
        ];
        let mut positions = [Position::Subject; 4];
        let leading = bound.iter();
        let trailing = UNBOUND_ORDER.into_iter().filter(|p| !bound.contains(*p));
        for (slot, position) in positions.iter_mut().zip(leading.chain(trailing)) {
            *slot = position;
        }
        Self(positions)
    }

    #[must_use]
    pub fn positions(&self) -> [Position; 4] {
        self.0
    }

    /// Whether every bound position comes before every unbound one, which
    /// makes the matches of `bound` a single range of this order.
    #[must_use]
    pub fn serves(&self, bound: PositionMask) -> bool {
        let prefix = self.0.iter().take_while(|p| bound.contains(**p)).count();
        prefix == bound.len()
    }

    /// The key of a quad given its terms in statement order.
    #[must_use]
    pub fn key(&self, terms: [&Term; 4]) -> OrderKey {
        OrderKey(self.0.map(|p| Slot::Term(terms[p.index()].clone())))
    }

    /// Rewrites a key of the primary order into this order.
    #[must_use]
    pub fn rekey(&self, primary: &OrderKey) -> OrderKey {
        OrderKey(self.0.map(|p| primary.0[p.index()].clone()))
    }

    /// Smallest key any quad matching `bound` can have.
    #[must_use]
    pub fn lower_bound(&self, bound: [Option<&Term>; 4]) -> OrderKey {
        self.bound_key(bound, Slot::Before)
    }

    /// Largest key any quad matching `bound` can have.
    #[must_use]
    pub fn upper_bound(&self, bound: [Option<&Term>; 4]) -> OrderKey {
        self.bound_key(bound, Slot::After)
    }

    fn bound_key(&self, bound: [Option<&Term>; 4], sentinel: Slot) -> OrderKey {
        OrderKey(self.0.map(|p| match bound[p.index()] {
            Some(term) => Slot::Term(term.clone()),
            None => sentinel.clone(),
        }))
    }
}

impl fmt::Display for IndexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in self.0 {
            write!(f, "{}", position.code())?;
        }
        Ok(())
    }
}

impl fmt::Debug for IndexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexOrder({self})")
    }
}
