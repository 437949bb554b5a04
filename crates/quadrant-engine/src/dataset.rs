//! The dataset handle.
//!
//! Start here with [`Dataset`]: a configured [`QuadStore`] plus the namespace
//! prefixes registered for it.

use std::ops::RangeBounds;

use quadrant_common::collections::{QuadrantIndexMap, quadrant_index_map};
use quadrant_common::types::{Quad, Term};
use quadrant_common::utils::error::{Error, Result};
use quadrant_core::{Cursor, FilteredView, MatchIter, QuadStore, ReadOnlyView, StoreStats, TermView};
use tracing::info;

use crate::admin::DatasetInfo;
use crate::config::StoreConfig;

/// A configured quad store with its namespace prefixes.
///
/// # Examples
///
/// ```
/// use quadrant_engine::Dataset;
/// use quadrant_common::types::Term;
///
/// let mut dataset = Dataset::new();
/// let a = Term::iri("http://example.org/a");
/// let knows = Term::iri("http://example.org/knows");
/// let b = Term::iri("http://example.org/b");
///
/// dataset.add(&a, &knows, &b, &[])?;
/// dataset.add(&a, &knows, &b, &[Term::iri("http://example.org/g1")])?;
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.contexts().len(dataset.store()), 2);
/// # Ok::<(), quadrant_common::Error>(())
/// ```
#[derive(Debug)]
pub struct Dataset {
    config: StoreConfig,
    store: QuadStore,
    namespaces: QuadrantIndexMap<String, String>,
}

impl Dataset {
    /// Creates an empty dataset with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Creates an empty dataset with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadrant_engine::{Dataset, StoreConfig};
    ///
    /// let dataset = Dataset::with_config(StoreConfig::sorted().with_max_sorted_indexes(4))?;
    /// assert!(dataset.is_empty());
    ///
    /// assert!(Dataset::with_config(StoreConfig::sorted().with_max_sorted_indexes(0)).is_err());
    /// # Ok::<(), quadrant_common::Error>(())
    /// ```
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        let store = QuadStore::with_options(config.to_options());
        info!(
            strategy = %config.strategy,
            max_sorted_indexes = config.max_sorted_indexes,
            reclaim_terms = config.reclaim_terms,
            "created dataset"
        );
        Self {
            config,
            store,
            namespaces: quadrant_index_map(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying store, for views, cursors and models helpers.
    #[must_use]
    pub fn store(&self) -> &QuadStore {
        &self.store
    }

    #[must_use]
    pub fn store_mut(&mut self) -> &mut QuadStore {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> QuadStore {
        self.store
    }

    // === Statements ===

    /// Adds (s, p, o) to each context, the default graph when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTerm`] when a term cannot occupy its position.
    pub fn add(
        &mut self,
        subject: &Term,
        predicate: &Term,
        object: &Term,
        contexts: &[Term],
    ) -> Result<bool> {
        self.store.add(subject, predicate, object, contexts)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidTerm`] when a term cannot occupy its position.
    pub fn add_quad(&mut self, quad: &Quad) -> Result<bool> {
        self.store.add_quad(quad)
    }

    /// Adds every quad, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTerm`] for the first quad that cannot be stored.
    pub fn extend<I: IntoIterator<Item = Quad>>(&mut self, quads: I) -> Result<usize> {
        self.store.try_extend(quads)
    }

    pub fn remove(
        &mut self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.store.remove(subject, predicate, object, contexts)
    }

    pub fn remove_quad(&mut self, quad: &Quad) -> bool {
        self.store.remove_quad(quad)
    }

    pub fn clear_contexts(&mut self, contexts: &[Term]) -> bool {
        self.store.clear_contexts(contexts)
    }

    /// Removes every quad. Namespaces are kept.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    #[must_use]
    pub fn contains(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> bool {
        self.store.contains(subject, predicate, object, contexts)
    }

    #[must_use]
    pub fn contains_quad(&self, quad: &Quad) -> bool {
        self.store.contains_quad(quad)
    }

    #[must_use]
    pub fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> Cursor {
        self.store.matching(subject, predicate, object, contexts)
    }

    #[must_use]
    pub fn iter_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> MatchIter<'_> {
        self.store.iter_matching(subject, predicate, object, contexts)
    }

    #[must_use]
    pub fn iter(&self) -> MatchIter<'_> {
        self.store.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // === Ordered navigation ===

    /// See [`QuadStore::first`].
    #[must_use]
    pub fn first(&self) -> Option<Quad> {
        self.store.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<Quad> {
        self.store.last()
    }

    /// See [`QuadStore::range`].
    #[must_use]
    pub fn range<R: RangeBounds<Quad>>(&self, range: R) -> Cursor {
        self.store.range(range)
    }

    #[must_use]
    pub fn iter_range<R: RangeBounds<Quad>>(&self, range: R) -> MatchIter<'_> {
        self.store.iter_range(range)
    }

    // === Views ===

    #[must_use]
    pub fn subjects(&self) -> TermView {
        self.store.subjects()
    }

    #[must_use]
    pub fn predicates(&self) -> TermView {
        self.store.predicates()
    }

    #[must_use]
    pub fn objects(&self) -> TermView {
        self.store.objects()
    }

    #[must_use]
    pub fn contexts(&self) -> TermView {
        self.store.contexts()
    }

    #[must_use]
    pub fn filter(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        contexts: &[Term],
    ) -> FilteredView {
        self.store.filter(subject, predicate, object, contexts)
    }

    /// The whole dataset as a view without write operations.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyView {
        self.store.read_only()
    }

    // === Namespaces ===

    /// The namespace bound to `prefix`.
    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    /// Prefix and namespace pairs, in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    /// Binds `prefix`, returning the namespace it replaced. A rebound prefix
    /// keeps its original position.
    pub fn set_namespace(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Option<String> {
        self.namespaces.insert(prefix.into(), namespace.into())
    }

    /// Unbinds `prefix`, returning its namespace.
    pub fn remove_namespace(&mut self, prefix: &str) -> Option<String> {
        self.namespaces.shift_remove(prefix)
    }

    // === Admin ===

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Returns high-level dataset information.
    #[must_use]
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            strategy: self.store.strategy(),
            quad_count: self.store.len(),
            subject_count: self.store.subjects().len(&self.store),
            context_count: self.store.contexts().len(&self.store),
            namespace_count: self.namespaces.len(),
            reclaim_terms: self.config.reclaim_terms,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
