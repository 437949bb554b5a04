//! Inspection types for a dataset.

use serde::{Deserialize, Serialize};

use quadrant_core::IndexStrategy;

/// High-level dataset information returned by [`Dataset::info()`](crate::Dataset::info).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Lookup strategy of the underlying store.
    pub strategy: IndexStrategy,
    /// Number of quads.
    pub quad_count: usize,
    /// Number of distinct subjects.
    pub subject_count: usize,
    /// Number of distinct contexts, the default graph included.
    pub context_count: usize,
    /// Number of registered namespace prefixes.
    pub namespace_count: usize,
    /// Whether unused terms are reclaimed.
    pub reclaim_terms: bool,
    /// Library version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_serializes() {
        let info = DatasetInfo {
            strategy: IndexStrategy::Sorted,
            quad_count: 3,
            subject_count: 1,
            context_count: 2,
            namespace_count: 0,
            reclaim_terms: true,
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["strategy"], "sorted");
        assert_eq!(json["quad_count"], 3);

        let back: DatasetInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }
}
