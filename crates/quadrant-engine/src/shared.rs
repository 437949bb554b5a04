//! A dataset shared between threads.
//!
//! [`QuadStore`](quadrant_core::QuadStore) has no internal locking. Callers
//! that hand one store to several threads wrap the whole dataset in one
//! reader-writer lock: many readers, or one writer.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dataset::Dataset;

/// A cloneable, lock-guarded handle to a [`Dataset`].
///
/// ```
/// use quadrant_engine::{Dataset, SharedDataset};
/// use quadrant_common::types::Term;
///
/// let shared = SharedDataset::new(Dataset::new());
/// let writer = shared.clone();
/// std::thread::spawn(move || {
///     let a = Term::iri("http://example.org/a");
///     writer.write().add(&a, &a, &a, &[]).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(shared.read().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedDataset {
    inner: Arc<RwLock<Dataset>>,
}

impl SharedDataset {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dataset)),
        }
    }

    /// Blocks until no writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.inner.read()
    }

    /// Blocks until the lock is free.
    pub fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.inner.write()
    }

    /// Returns the dataset if this is the last handle.
    ///
    /// # Errors
    ///
    /// Gives the handle back when other clones are still alive.
    pub fn try_unwrap(self) -> std::result::Result<Dataset, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Dataset> for SharedDataset {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use quadrant_common::types::Term;

    use super::*;

    #[test]
    fn test_concurrent_writers() {
        let shared = SharedDataset::new(Dataset::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let subject = Term::iri(format!("http://example.org/s{t}"));
                        let object = Term::iri(format!("http://example.org/o{i}"));
                        let predicate = Term::iri("http://example.org/p");
                        shared.write().add(&subject, &predicate, &object, &[]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let dataset = shared.read();
        assert_eq!(dataset.len(), 100);
        assert_eq!(dataset.subjects().len(dataset.store()), 4);
    }

    #[test]
    fn test_try_unwrap() {
        let shared = SharedDataset::from(Dataset::new());
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert!(shared.try_unwrap().is_ok());
    }
}
