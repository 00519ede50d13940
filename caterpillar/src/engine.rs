use alloc::collections::BTreeMap;

use crate::cell::frame_transitions;
use crate::{
    CaterpillarOptions, CellQueue, DataSource, IndexRange, LayoutOracle, PoolStats, Rect,
    ReusableCell, ReusePool, VisibleSetTracker,
};

/// What the engine is doing right now. Only `Idle` accepts new work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    Idle,
    Reloading,
    LayingOut,
}

/// A headless cell-recycling engine.
///
/// It maps the indexes an oracle reports as visible to a small set of reusable cells:
/// - cells scrolled out are returned to a [`ReusePool`]
/// - cells scrolled in are requested from the [`DataSource`], which dequeues or builds them
/// - every visible cell gets its current frame, plus additive transitions from the oracle's
///   previous rect when it moved
///
/// The engine is invalidation driven: setters mark it dirty and the host calls
/// [`Caterpillar::layout_if_needed`] once per frame/tick.
#[derive(Debug)]
pub struct Caterpillar<C, D, O> {
    options: CaterpillarOptions,
    data_source: D,
    oracle: O,

    pool: ReusePool<C>,
    tracker: VisibleSetTracker,
    attached: BTreeMap<usize, C>,

    viewport: Rect,
    count: usize,
    state: EngineState,
    has_previous_layout: bool,
    needs_layout: bool,
    selected_index: Option<usize>,
    has_selection_delegate: bool,
}

impl<C, D, O> Caterpillar<C, D, O>
where
    C: ReusableCell,
    D: DataSource<C>,
    O: LayoutOracle,
{
    /// Creates an engine and reads the initial item count. No cells are built until the first
    /// layout pass.
    pub fn new(data_source: D, mut oracle: O, options: CaterpillarOptions) -> Self {
        let count = data_source.number_of_items();
        let has_selection_delegate = oracle.selection_delegate().is_some();
        vdebug!(count, has_selection_delegate, "Caterpillar::new");
        Self {
            viewport: options.initial_viewport,
            options,
            data_source,
            oracle,
            pool: ReusePool::new(),
            tracker: VisibleSetTracker::new(),
            attached: BTreeMap::new(),
            count,
            state: EngineState::Idle,
            has_previous_layout: false,
            needs_layout: true,
            selected_index: None,
            has_selection_delegate,
        }
    }

    pub fn options(&self) -> &CaterpillarOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CaterpillarOptions) {
        self.options = options;
        self.needs_layout = true;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CaterpillarOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Mutable access to the data source. Call `reload_data` after changing the item set.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Mutable access to the oracle. Call `set_needs_layout` after changing geometry.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The item count read by the last reload (or by `new`).
    pub fn number_of_items(&self) -> usize {
        self.count
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    /// Runs a single layout pass if anything invalidated the previous one.
    ///
    /// Returns `true` when a pass ran.
    pub fn layout_if_needed(&mut self) -> bool {
        if !self.needs_layout {
            return false;
        }
        self.update_layout();
        true
    }

    /// The range laid out by the last pass.
    pub fn visible_range(&self) -> IndexRange {
        self.tracker.range()
    }

    pub fn attached_len(&self) -> usize {
        self.attached.len()
    }

    pub fn cell_at_index(&self, index: usize) -> Option<&C> {
        self.attached.get(&index)
    }

    pub fn cell_at_index_mut(&mut self, index: usize) -> Option<&mut C> {
        self.attached.get_mut(&index)
    }

    /// Iterates attached cells in ascending index order.
    pub fn for_each_attached_cell(&self, mut f: impl FnMut(usize, &C)) {
        for (index, cell) in self.attached.iter() {
            f(*index, cell);
        }
    }

    pub fn pool(&self) -> &ReusePool<C> {
        &self.pool
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn dequeue_reusable_cell_with_identifier(&mut self, identifier: &str) -> Option<C> {
        self.pool.dequeue(identifier)
    }

    /// Records a selection and forwards it to the oracle's selection extension, if any.
    ///
    /// The extension is probed once, when the engine is created.
    ///
    /// Returns `false` (and records nothing) when `index` is out of range.
    pub fn select_item_at_index(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.selected_index = Some(index);
        if !self.has_selection_delegate {
            return true;
        }
        if let Some(delegate) = self.oracle.selection_delegate() {
            delegate.did_select_item_at_index(index);
        }
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// The cell bound to the most recently selected index, if that index is attached.
    pub fn selected_cell(&self) -> Option<&C> {
        self.selected_index.and_then(|i| self.attached.get(&i))
    }

    /// Returns every attached cell to the pool and re-reads the item count.
    ///
    /// The next layout pass assigns frames without transitions: there is no valid previous
    /// layout to animate from.
    pub fn reload_data(&mut self) {
        if self.state != EngineState::Idle {
            vtrace!(state = ?self.state, "reload_data: ignored re-entrant call");
            return;
        }
        self.state = EngineState::Reloading;

        let attached = core::mem::take(&mut self.attached);
        for (_, cell) in attached {
            self.pool.enqueue(cell);
        }

        self.count = self.data_source.number_of_items();
        self.tracker.reset();
        self.has_previous_layout = false;
        if self.selected_index.is_some_and(|i| i >= self.count) {
            self.selected_index = None;
        }
        self.needs_layout = true;
        vdebug!(count = self.count, "reload_data");

        self.state = EngineState::Idle;
    }

    /// Runs one layout pass.
    ///
    /// Leaving indexes are recycled before entering indexes are bound, so a cell freed in this
    /// pass can be reused immediately. Calls made while a pass is running are ignored.
    pub fn update_layout(&mut self) {
        if self.state != EngineState::Idle {
            vtrace!(state = ?self.state, "update_layout: ignored re-entrant call");
            return;
        }
        self.state = EngineState::LayingOut;
        self.needs_layout = false;

        let old = self.tracker.range();
        let new = self
            .tracker
            .compute_visible_range(&self.oracle, self.viewport, self.count);
        let diff = VisibleSetTracker::diff(old, new);

        for index in diff.leaving() {
            if let Some(cell) = self.attached.remove(&index) {
                self.pool.enqueue(cell);
            }
        }

        for index in diff.entering() {
            let mut queue = CellQueue::new(&mut self.pool, &mut self.needs_layout);
            let cell = self.data_source.cell_for_item_at_index(&mut queue, index);
            let displaced = self.attached.insert(index, cell);
            debug_assert!(displaced.is_none(), "index {index} was already attached");
            if let Some(displaced) = displaced {
                self.pool.enqueue(displaced);
            }
        }

        let animate = self.has_previous_layout && self.options.animates_layout_changes;
        for index in new.iter() {
            let Some(cell) = self.attached.get_mut(&index) else {
                continue;
            };
            let current = self.oracle.rect_of_item_at_index(index);
            cell.set_frame(current);
            if !animate {
                continue;
            }
            let previous = self.oracle.previous_rect_of_item_at_index(index);
            if previous == current {
                continue;
            }
            match frame_transitions(&self.options, previous, current) {
                Ok(transitions) => {
                    for transition in transitions {
                        cell.add_transition(transition);
                    }
                }
                Err(_err) => {
                    vwarn!(index, error = %_err, "frame transition skipped");
                }
            }
        }

        vtrace!(
            start = new.start_index,
            end = new.end_index,
            attached = self.attached.len(),
            free = self.pool.len(),
            "update_layout"
        );

        self.tracker.commit(new);
        self.has_previous_layout = true;
        self.state = EngineState::Idle;
    }
}
