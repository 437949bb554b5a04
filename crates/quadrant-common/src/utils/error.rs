//! Error types for store operations.
//!
//! Lookups never fail: an unknown or ill-placed term simply matches nothing.
//! Errors come from writes that would produce an invalid statement, from
//! misuse of a cursor, and from scalar accessors whose expectation about the
//! data does not hold.

use thiserror::Error;

use crate::types::{Position, Term};

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A term view was asked to add a value while another position of its
    /// pattern was still a wildcard.
    #[error("cannot add through this view: {position} is not bound")]
    IncompleteStatement { position: Position },

    /// A filtered view was asked to add a statement outside its filter.
    #[error("statement does not match the view's filter")]
    FilteredOut,

    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// A scalar accessor found more than one distinct value.
    #[error("expected a single value, found {first} and {second}")]
    Multiplicity { first: Term, second: Term },

    /// A scalar accessor found a value of the wrong kind.
    #[error("expected {expected}, found {found}")]
    UnexpectedKind { expected: &'static str, found: Term },

    /// A required value was absent.
    #[error("no {position} value found")]
    MissingValue { position: Position },

    /// A write used a term that cannot occupy the given position.
    #[error("{term} is not a valid {position}")]
    InvalidTerm { position: Position, term: Term },

    /// The term table ran out of 32-bit ids.
    #[error("term table is full: at most {limit} terms")]
    TermCapacity { limit: u32 },

    /// The store configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Misuse of a live cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// `remove_current` was called before the first `advance`, or after the
    /// cursor was exhausted.
    #[error("cursor has no current quad")]
    NoCurrent,

    /// `remove_current` was called twice without an `advance` in between.
    #[error("current quad was already removed")]
    AlreadyRemoved,

    /// The cursor was used with a store other than the one that opened it.
    #[error("cursor belongs to a different store")]
    ForeignStore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::InvalidTerm {
            position: Position::Predicate,
            term: Term::literal("x"),
        };
        assert_eq!(err.to_string(), "\"x\" is not a valid predicate");

        let err = Error::IncompleteStatement {
            position: Position::Object,
        };
        assert_eq!(err.to_string(), "cannot add through this view: object is not bound");

        let err = Error::Multiplicity {
            first: Term::iri("http://x/a"),
            second: Term::iri("http://x/b"),
        };
        assert_eq!(
            err.to_string(),
            "expected a single value, found <http://x/a> and <http://x/b>"
        );

        let err = Error::TermCapacity { limit: 2 };
        assert_eq!(err.to_string(), "term table is full: at most 2 terms");
    }

    #[test]
    fn test_cursor_error_is_transparent() {
        let err: Error = CursorError::AlreadyRemoved.into();
        assert_eq!(err, Error::Cursor(CursorError::AlreadyRemoved));
        assert_eq!(err.to_string(), "current quad was already removed");
    }
}
