use crate::{CellQueue, IndexRange, Rect};

/// The authoritative source of item geometry.
///
/// The engine never computes geometry on its own: visibility and rects come from here.
pub trait LayoutOracle {
    /// Indexes whose rects intersect `rect`.
    fn range_of_items_in_rect(&self, rect: Rect) -> IndexRange;

    fn rect_of_item_at_index(&self, index: usize) -> Rect;

    /// Where the item was before the current layout change; transitions start from here.
    fn previous_rect_of_item_at_index(&self, index: usize) -> Rect;

    /// Optional selection extension. Oracles that care about selection return `Some(self)`.
    fn selection_delegate(&mut self) -> Option<&mut dyn SelectionDelegate> {
        None
    }
}

/// Optional extension of [`LayoutOracle`].
pub trait SelectionDelegate {
    fn did_select_item_at_index(&mut self, index: usize);
}

/// Supplies the item count and configured cells.
pub trait DataSource<C> {
    fn number_of_items(&self) -> usize;

    /// Returns a cell bound to `index`.
    ///
    /// Implementations should first try `queue.dequeue_reusable_cell_with_identifier(..)` and
    /// only construct a new cell on a miss.
    fn cell_for_item_at_index(&mut self, queue: &mut CellQueue<'_, C>, index: usize) -> C;
}
