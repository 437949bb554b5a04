//! # quadrant-engine
//!
//! The public face of Quadrant. Most users only need [`Dataset`].
//!
//! ```
//! use quadrant_engine::{Dataset, StoreConfig};
//! use quadrant_common::types::Term;
//!
//! let mut dataset = Dataset::with_config(StoreConfig::sorted())?;
//! dataset.set_namespace("ex", "http://example.org/");
//!
//! let alice = Term::iri("http://example.org/alice");
//! let name = Term::iri("http://example.org/name");
//! dataset.add(&alice, &name, &Term::literal("Alice"), &[])?;
//!
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(
//!     quadrant_engine::models::unique_object(dataset.store(), &alice, &name, &[])?,
//!     Term::literal("Alice")
//! );
//! # Ok::<(), quadrant_common::Error>(())
//! ```

pub mod admin;
pub mod config;
pub mod dataset;
pub mod models;
pub mod shared;

pub use admin::DatasetInfo;
pub use config::{ConfigError, StoreConfig};
pub use dataset::Dataset;
pub use shared::SharedDataset;

pub use quadrant_core::{
    Cursor, FilteredView, IndexStrategy, MatchIter, QuadPattern, QuadStore, ReadOnlyView,
    StoreStats, TermView,
};
