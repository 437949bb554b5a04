//! Second-chance cache of synthesized sorted orders.
//!
//! Every cached order is kept in sync with the store on each insert and
//! removal, so the cache is bounded: when a new order would exceed the
//! capacity, the clock hand walks the queue, clearing the "used" flag of
//! orders that served a lookup since the last sweep and evicting the first
//! one that did not. An evicted order simply stops being maintained; cursors
//! already scanning it keep their snapshot.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use quadrant_common::types::PositionMask;

use super::{IndexOrder, SortedIndex};

struct Entry {
    index: SortedIndex,
    used: AtomicBool,
}

/// Bounded set of sorted indexes with second-chance eviction.
pub struct OrderCache {
    entries: Vec<Entry>,
    /// Clock queue, oldest first.
    queue: VecDeque<IndexOrder>,
    capacity: usize,
}

impl OrderCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Finds a cached index that serves `bound`, marking it used.
    #[must_use]
    pub fn find_serving(&self, bound: PositionMask) -> Option<&SortedIndex> {
        self.entries
            .iter()
            .find(|entry| entry.index.order().serves(bound))
            .map(|entry| {
                entry.used.store(true, Ordering::Relaxed);
                &entry.index
            })
    }

    /// The cached index for `order`, without marking it used.
    #[must_use]
    pub fn get(&self, order: IndexOrder) -> Option<&SortedIndex> {
        self.entries
            .iter()
            .find(|entry| entry.index.order() == order)
            .map(|entry| &entry.index)
    }

    /// Adds an index, returning the one evicted to make room.
    ///
    /// An index already cached under the same order is replaced and marked
    /// used; nothing is evicted then.
    pub fn insert(&mut self, index: SortedIndex) -> Option<SortedIndex> {
        let order = index.order();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.index.order() == order) {
            entry.index = index;
            entry.used.store(true, Ordering::Relaxed);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_one()
        } else {
            None
        };
        if self.capacity == 0 {
            return Some(index);
        }

        self.entries.push(Entry {
            index,
            used: AtomicBool::new(false),
        });
        self.queue.push_back(order);
        evicted
    }

    fn evict_one(&mut self) -> Option<SortedIndex> {
        let sweeps = self.queue.len() * 2;
        for _ in 0..sweeps {
            let order = self.queue.pop_front()?;
            let Some(slot) = self.slot_of(order) else {
                continue;
            };
            if self.entries[slot].used.swap(false, Ordering::Relaxed) {
                self.queue.push_back(order);
            } else {
                return Some(self.entries.swap_remove(slot).index);
            }
        }

        // Every order was used; take the oldest.
        let order = self.queue.pop_front()?;
        let slot = self.slot_of(order)?;
        Some(self.entries.swap_remove(slot).index)
    }

    fn slot_of(&self, order: IndexOrder) -> Option<usize> {
        self.entries.iter().position(|e| e.index.order() == order)
    }

    /// Mutable access to every cached index, for maintenance.
    pub fn indexes_mut(&mut self) -> impl Iterator<Item = &mut SortedIndex> {
        self.entries.iter_mut().map(|entry| &mut entry.index)
    }

    pub fn indexes(&self) -> impl Iterator<Item = &SortedIndex> {
        self.entries.iter().map(|entry| &entry.index)
    }

    /// Orders currently cached, oldest first.
    pub fn orders(&self) -> impl Iterator<Item = IndexOrder> + '_ {
        self.queue.iter().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }
}
