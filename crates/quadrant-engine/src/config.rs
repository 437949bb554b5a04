//! Dataset configuration.

use std::fmt;

use quadrant_core::{IndexStrategy, StoreOptions};

/// Errors from [`StoreConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The sorted strategy needs room for at least one synthesized order.
    ZeroSortedIndexes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSortedIndexes => write!(
                f,
                "max_sorted_indexes must be greater than zero with the sorted strategy"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// How lookups find their candidates.
    pub strategy: IndexStrategy,

    /// Upper bound on synthesized sorted orders kept alongside the primary
    /// `spoc` order. Only used by [`IndexStrategy::Sorted`].
    pub max_sorted_indexes: usize,

    /// Whether terms are dropped from the term table once no quad uses them.
    pub reclaim_terms: bool,

    /// Quads to reserve room for up front.
    pub initial_quad_capacity: usize,

    /// Terms to reserve room for up front.
    pub initial_term_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let options = StoreOptions::default();
        Self {
            strategy: options.strategy,
            max_sorted_indexes: options.max_sorted_indexes,
            reclaim_terms: options.reclaim_terms,
            initial_quad_capacity: options.initial_quad_capacity,
            initial_term_capacity: options.initial_term_capacity,
        }
    }
}

impl StoreConfig {
    /// Configuration using hash posting sets.
    #[must_use]
    pub fn hash() -> Self {
        Self::default().with_strategy(IndexStrategy::Hash)
    }

    /// Configuration using sorted orders, results come back in term order.
    #[must_use]
    pub fn sorted() -> Self {
        Self::default().with_strategy(IndexStrategy::Sorted)
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets how many synthesized sorted orders may be kept.
    #[must_use]
    pub fn with_max_sorted_indexes(mut self, max: usize) -> Self {
        self.max_sorted_indexes = max;
        self
    }

    /// Keeps unused terms in the term table.
    #[must_use]
    pub fn without_term_reclamation(mut self) -> Self {
        self.reclaim_terms = false;
        self
    }

    /// Sets the initial capacities for quads and terms.
    #[must_use]
    pub fn with_capacity(mut self, quads: usize, terms: usize) -> Self {
        self.initial_quad_capacity = quads;
        self.initial_term_capacity = terms;
        self
    }

    /// Validates the configuration.
    ///
    /// Called automatically by [`Dataset::with_config()`](crate::Dataset::with_config).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any setting is invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.strategy == IndexStrategy::Sorted && self.max_sorted_indexes == 0 {
            return Err(ConfigError::ZeroSortedIndexes);
        }
        Ok(())
    }

    /// The core-level options for [`QuadStore::with_options`](quadrant_core::QuadStore::with_options).
    #[must_use]
    pub fn to_options(&self) -> StoreOptions {
        StoreOptions {
            strategy: self.strategy,
            max_sorted_indexes: self.max_sorted_indexes,
            reclaim_terms: self.reclaim_terms,
            initial_quad_capacity: self.initial_quad_capacity,
            initial_term_capacity: self.initial_term_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.strategy, IndexStrategy::Hash);
        assert_eq!(config.max_sorted_indexes, 8);
        assert!(config.reclaim_terms);
        assert_eq!(config.initial_quad_capacity, 1024);
        assert_eq!(config.initial_term_capacity, 1024);
    }

    #[test]
    fn test_config_presets() {
        assert_eq!(StoreConfig::hash(), StoreConfig::default());
        assert_eq!(StoreConfig::sorted().strategy, IndexStrategy::Sorted);
    }

    #[test]
    fn test_config_builder_chaining() {
        let config = StoreConfig::sorted()
            .with_max_sorted_indexes(3)
            .without_term_reclamation()
            .with_capacity(10, 20);

        assert_eq!(config.strategy, IndexStrategy::Sorted);
        assert_eq!(config.max_sorted_indexes, 3);
        assert!(!config.reclaim_terms);
        assert_eq!(config.initial_quad_capacity, 10);
        assert_eq!(config.initial_term_capacity, 20);
    }

    #[test]
    fn test_to_options() {
        let options = StoreConfig::sorted().with_max_sorted_indexes(2).to_options();
        assert_eq!(options.strategy, IndexStrategy::Sorted);
        assert_eq!(options.max_sorted_indexes, 2);
        assert!(options.reclaim_terms);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(StoreConfig::default().validate().is_ok());
        assert!(StoreConfig::sorted().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_sorted_indexes() {
        let config = StoreConfig::sorted().with_max_sorted_indexes(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSortedIndexes));
    }

    #[test]
    fn test_validate_ignores_sorted_bound_for_hash() {
        let config = StoreConfig::hash().with_max_sorted_indexes(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::ZeroSortedIndexes.to_string(),
            "max_sorted_indexes must be greater than zero with the sorted strategy"
        );
    }
}
