use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::ReusableCell;
use crate::key::PoolMap;

/// Counters describing pool activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Cells currently waiting in the pool.
    pub free: usize,
    /// Dequeue requests satisfied from the pool.
    pub hits: usize,
    /// Dequeue requests that found nothing (the caller had to construct a cell).
    pub misses: usize,
}

/// Free cells, grouped by reuse identifier.
///
/// Retrieval among cells with the same identifier is LIFO.
pub struct ReusePool<C> {
    free: PoolMap<Vec<C>>,
    hits: usize,
    misses: usize,
}

impl<C> Default for ReusePool<C> {
    fn default() -> Self {
        Self {
            free: PoolMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<C: ReusableCell> ReusePool<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a detached cell to the pool.
    ///
    /// Pending transitions are discarded first so a recycled cell never replays a stale
    /// animation for its next index.
    pub fn enqueue(&mut self, mut cell: C) {
        cell.remove_all_transitions();
        cell.prepare_for_reuse();
        vtrace!(identifier = cell.reuse_identifier(), "ReusePool::enqueue");
        match self.free.get_mut(cell.reuse_identifier()) {
            Some(list) => list.push(cell),
            None => {
                let key = String::from(cell.reuse_identifier());
                self.free.insert(key, vec![cell]);
            }
        }
    }

    /// Removes and returns a free cell for `identifier`, or `None` when the caller must build one.
    pub fn dequeue(&mut self, identifier: &str) -> Option<C> {
        let cell = self.free.get_mut(identifier).and_then(Vec::pop);
        if cell.is_some() {
            self.hits = self.hits.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
        vtrace!(identifier, hit = cell.is_some(), "ReusePool::dequeue");
        cell
    }

    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len_for(&self, identifier: &str) -> usize {
        self.free.get(identifier).map_or(0, Vec::len)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            free: self.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<C> core::fmt::Debug for ReusePool<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReusePool")
            .field("identifiers", &self.free.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}

/// The handle a [`crate::DataSource`] uses while building cells for a layout pass.
pub struct CellQueue<'a, C> {
    pool: &'a mut ReusePool<C>,
    needs_layout: &'a mut bool,
}

impl<'a, C: ReusableCell> CellQueue<'a, C> {
    pub(crate) fn new(pool: &'a mut ReusePool<C>, needs_layout: &'a mut bool) -> Self {
        Self { pool, needs_layout }
    }

    pub fn dequeue_reusable_cell_with_identifier(&mut self, identifier: &str) -> Option<C> {
        self.pool.dequeue(identifier)
    }

    /// Requests another layout pass. It runs on the next `layout_if_needed`, never recursively.
    pub fn set_needs_layout(&mut self) {
        *self.needs_layout = true;
    }
}
