//! # quadrant-common
//!
//! Foundation types shared by every Quadrant crate.
//!
//! - [`types`] - RDF terms, quads, positions and identifiers
//! - [`collections`] - Hash map and set aliases used across the workspace
//! - [`utils`] - The workspace error type
//!
//! Nothing in here knows about indexes or cursors; that lives in
//! `quadrant-core`.

pub mod collections;
pub mod types;
pub mod utils;

pub use types::{
    Literal, Position, PositionMask, Quad, QuadId, StoreId, Term, TermId, TermKind,
};
pub use utils::error::{CursorError, Error, Result};
