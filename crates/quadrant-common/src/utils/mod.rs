//! Common utilities used throughout Quadrant.
//!
//! - [`error`] - The [`Error`] enum and [`Result`] alias

pub mod error;

pub use error::{CursorError, Error, Result};
