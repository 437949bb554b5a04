//! Core types for the quad store.
//!
//! | Type | What it represents |
//! | ---- | ------------------ |
//! | [`Term`], [`Literal`] | RDF values: IRIs, blank nodes, literals, the default graph |
//! | [`Quad`] | One (subject, predicate, object, context) statement |
//! | [`Position`], [`PositionMask`] | Statement slots and sets of bound slots |
//! | [`TermId`], [`QuadId`], [`StoreId`] | Store-internal identities |

mod id;
mod position;
mod quad;
mod term;

pub use id::{QuadId, StoreId, TermId};
pub use position::{Position, PositionMask};
pub use quad::Quad;
pub use term::{Literal, Term, TermKind, RDF_LANG_STRING, XSD_STRING};
