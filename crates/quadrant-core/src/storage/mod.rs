//! Quad records and the arena that owns them.

mod arena;

pub use arena::{QuadArena, QuadRecord};
