//! Sorted indexes: whole-quad total orders scanned by range.

use std::collections::BTreeMap;
use std::sync::Arc;

use quadrant_common::types::{PositionMask, QuadId, Term};
use tracing::debug;

use super::{IndexOrder, OrderCache, OrderKey};

/// Entries of one sorted index, shared with the cursors scanning it.
pub type SortedEntries = BTreeMap<OrderKey, QuadId>;

/// Every live quad, keyed by one [`IndexOrder`].
///
/// The entries sit behind an `Arc`; updates go through `Arc::make_mut`, so a
/// cursor holding the previous map keeps scanning an unchanged snapshot.
#[derive(Debug, Clone)]
pub struct SortedIndex {
    order: IndexOrder,
    entries: Arc<SortedEntries>,
}

impl SortedIndex {
    #[must_use]
    pub fn new(order: IndexOrder) -> Self {
        Self {
            order,
            entries: Arc::default(),
        }
    }

    /// Builds `order` from the entries of the primary index.
    #[must_use]
    pub fn derive(order: IndexOrder, primary: &SortedIndex) -> Self {
        let entries = primary
            .entries
            .iter()
            .map(|(key, id)| (order.rekey(key), *id))
            .collect();
        Self {
            order,
            entries: Arc::new(entries),
        }
    }

    #[must_use]
    pub fn order(&self) -> IndexOrder {
        self.order
    }

    #[must_use]
    pub fn entries(&self) -> &Arc<SortedEntries> {
        &self.entries
    }

    pub fn insert(&mut self, terms: [&Term; 4], id: QuadId) {
        let key = self.order.key(terms);
        Arc::make_mut(&mut self.entries).insert(key, id);
    }

    pub fn remove(&mut self, terms: [&Term; 4]) -> Option<QuadId> {
        let key = self.order.key(terms);
        Arc::make_mut(&mut self.entries).remove(&key)
    }

    /// Approximate heap footprint in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.entries.len() * (std::mem::size_of::<OrderKey>() + std::mem::size_of::<QuadId>())
    }
}

/// The primary `spoc` index plus the cache of synthesized orders.
pub struct SortedIndexes {
    primary: SortedIndex,
    synthesized: OrderCache,
}

impl SortedIndexes {
    /// `capacity` bounds the synthesized orders; the primary is extra.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            primary: SortedIndex::new(IndexOrder::PRIMARY),
            synthesized: OrderCache::new(capacity),
        }
    }

    /// An index whose order turns `bound` into a single range, built from
    /// the primary index if no live index qualifies.
    pub fn select(&mut self, bound: PositionMask) -> &SortedIndex {
        if self.primary.order().serves(bound) {
            return &self.primary;
        }
        let order = match self.synthesized.find_serving(bound) {
            Some(index) => index.order(),
            None => {
                let order = IndexOrder::for_mask(bound);
                let index = SortedIndex::derive(order, &self.primary);
                debug!(order = %order, quads = index.entries().len(), "built sorted index");
                if let Some(evicted) = self.synthesized.insert(index) {
                    debug!(order = %evicted.order(), "evicted sorted index");
                }
                order
            }
        };
        self.synthesized.get(order).unwrap_or(&self.primary)
    }

    /// The live entries of `order`, if it is still maintained.
    #[must_use]
    pub fn entries(&self, order: IndexOrder) -> Option<&Arc<SortedEntries>> {
        if order == IndexOrder::PRIMARY {
            return Some(self.primary.entries());
        }
        self.synthesized.get(order).map(SortedIndex::entries)
    }

    pub fn insert(&mut self, terms: [&Term; 4], id: QuadId) {
        self.primary.insert(terms, id);
        for index in self.synthesized.indexes_mut() {
            index.insert(terms, id);
        }
    }

    pub fn remove(&mut self, terms: [&Term; 4]) {
        self.primary.remove(terms);
        for index in self.synthesized.indexes_mut() {
            index.remove(terms);
        }
    }

    /// Live orders, primary first.
    #[must_use]
    pub fn orders(&self) -> Vec<IndexOrder> {
        std::iter::once(self.primary.order())
            .chain(self.synthesized.orders())
            .collect()
    }

    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.primary.heap_bytes()
            + self
                .synthesized
                .indexes()
                .map(SortedIndex::heap_bytes)
                .sum::<usize>()
    }

    /// Drops every entry and every synthesized order.
    pub fn clear(&mut self) {
        self.primary = SortedIndex::new(IndexOrder::PRIMARY);
        self.synthesized.clear();
    }
}
