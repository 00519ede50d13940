use crate::*;

use alloc::vec::Vec;
use std::cell::RefCell;

const ROW: f64 = 10.0;
const WIDTH: f64 = 100.0;

#[derive(Debug)]
struct TestCell {
    identifier: &'static str,
    serial: usize,
    bound: Option<usize>,
    frame: Rect,
    transitions: Vec<FrameTransition>,
    recycled: usize,
}

impl TestCell {
    fn new(identifier: &'static str, serial: usize) -> Self {
        Self {
            identifier,
            serial,
            bound: None,
            frame: Rect::ZERO,
            transitions: Vec::new(),
            recycled: 0,
        }
    }
}

impl ReusableCell for TestCell {
    fn reuse_identifier(&self) -> &str {
        self.identifier
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn add_transition(&mut self, transition: FrameTransition) {
        self.transitions.push(transition);
    }

    fn remove_all_transitions(&mut self) {
        self.transitions.clear();
    }

    fn prepare_for_reuse(&mut self) {
        self.bound = None;
        self.recycled += 1;
    }
}

#[derive(Default)]
struct Rows {
    count: usize,
    created: usize,
    relayout_on: Option<usize>,
}

impl Rows {
    fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }
}

impl DataSource<TestCell> for Rows {
    fn number_of_items(&self) -> usize {
        self.count
    }

    fn cell_for_item_at_index(
        &mut self,
        queue: &mut CellQueue<'_, TestCell>,
        index: usize,
    ) -> TestCell {
        let mut cell = match queue.dequeue_reusable_cell_with_identifier("row") {
            Some(cell) => cell,
            None => {
                self.created += 1;
                TestCell::new("row", self.created)
            }
        };
        cell.bound = Some(index);
        if self.relayout_on == Some(index) {
            queue.set_needs_layout();
        }
        cell
    }
}

/// A vertical list of fixed-height rows, optionally shifted by `offset`.
struct RowOracle {
    count: usize,
    offset: f64,
    previous_offset: f64,
    queried: RefCell<Vec<usize>>,
    selections: Option<Vec<usize>>,
}

impl RowOracle {
    fn new(count: usize) -> Self {
        Self {
            count,
            offset: 0.0,
            previous_offset: 0.0,
            queried: RefCell::new(Vec::new()),
            selections: None,
        }
    }

    fn with_selection(mut self) -> Self {
        self.selections = Some(Vec::new());
        self
    }

    fn row(offset: f64, index: usize) -> Rect {
        Rect::new(0.0, offset + index as f64 * ROW, WIDTH, ROW)
    }

    fn move_rows(&mut self, offset: f64) {
        self.previous_offset = self.offset;
        self.offset = offset;
    }

    fn settle(&mut self) {
        self.previous_offset = self.offset;
    }
}

impl LayoutOracle for RowOracle {
    fn range_of_items_in_rect(&self, rect: Rect) -> IndexRange {
        let start = ((rect.y - self.offset) / ROW).floor().max(0.0) as usize;
        let end = ((rect.max_y() - self.offset) / ROW).ceil().max(0.0) as usize;
        IndexRange::new(start.min(self.count), end.min(self.count))
    }

    fn rect_of_item_at_index(&self, index: usize) -> Rect {
        self.queried.borrow_mut().push(index);
        Self::row(self.offset, index)
    }

    fn previous_rect_of_item_at_index(&self, index: usize) -> Rect {
        self.queried.borrow_mut().push(index);
        Self::row(self.previous_offset, index)
    }

    fn selection_delegate(&mut self) -> Option<&mut dyn SelectionDelegate> {
        if self.selections.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl SelectionDelegate for RowOracle {
    fn did_select_item_at_index(&mut self, index: usize) {
        if let Some(s) = self.selections.as_mut() {
            s.push(index);
        }
    }
}

type Engine = Caterpillar<TestCell, Rows, RowOracle>;

fn engine(count: usize, viewport: Rect) -> Engine {
    Caterpillar::new(
        Rows::new(count),
        RowOracle::new(count),
        CaterpillarOptions::new().with_initial_viewport(viewport),
    )
}

fn attached_indices(e: &Engine) -> Vec<usize> {
    let mut out = Vec::new();
    e.for_each_attached_cell(|i, _| out.push(i));
    out
}

fn viewport(y: f64, height: f64) -> Rect {
    Rect::new(0.0, y, WIDTH, height)
}

#[test]
fn pool_returns_enqueued_cell_once() {
    let mut pool = ReusePool::new();
    let mut cell = TestCell::new("A", 7);
    cell.bound = Some(3);
    pool.enqueue(cell);
    assert_eq!(pool.len_for("A"), 1);

    let cell = pool.dequeue("A").unwrap();
    assert_eq!(cell.serial, 7);
    assert_eq!(cell.bound, None);
    assert_eq!(pool.len_for("A"), 0);
    assert!(pool.dequeue("A").is_none());

    assert_eq!(
        pool.stats(),
        PoolStats {
            free: 0,
            hits: 1,
            misses: 1
        }
    );
}

#[test]
fn pool_is_keyed_by_reuse_identifier() {
    let mut pool = ReusePool::new();
    pool.enqueue(TestCell::new("A", 1));
    pool.enqueue(TestCell::new("B", 2));
    pool.enqueue(TestCell::new("A", 3));
    assert_eq!(pool.len(), 3);

    assert!(pool.dequeue("C").is_none());
    assert_eq!(pool.dequeue("B").unwrap().serial, 2);
    assert!(pool.dequeue("B").is_none());
    assert_eq!(pool.len_for("A"), 2);
}

#[test]
fn enqueue_discards_pending_transitions() {
    let mut cell = TestCell::new("A", 1);
    cell.transitions.push(FrameTransition {
        property: FrameProperty::Position,
        keyframes: animation::RelativeAnimation::new([0.0, 0.0], [0.0, 10.0])
            .keyframes()
            .unwrap(),
        duration_ms: 100,
    });

    let mut pool = ReusePool::new();
    pool.enqueue(cell);
    let cell = pool.dequeue("A").unwrap();
    assert!(cell.transitions.is_empty());
    assert_eq!(cell.recycled, 1);
}

#[test]
fn visible_range_is_idempotent() {
    let oracle = RowOracle::new(100);
    let tracker = VisibleSetTracker::new();
    let a = tracker.compute_visible_range(&oracle, viewport(35.0, 40.0), 100);
    let b = tracker.compute_visible_range(&oracle, viewport(35.0, 40.0), 100);
    assert_eq!(a, b);
    assert_eq!(a, IndexRange::new(3, 8));
}

#[test]
fn empty_collection_has_empty_range_and_diff() {
    let oracle = RowOracle::new(0);
    let tracker = VisibleSetTracker::new();
    let r = tracker.compute_visible_range(&oracle, viewport(0.0, 50.0), 0);
    assert!(r.is_empty());
    assert!(VisibleSetTracker::diff(IndexRange::EMPTY, r).is_empty());

    let mut e = engine(0, viewport(0.0, 50.0));
    e.update_layout();
    assert_eq!(e.attached_len(), 0);
    assert!(e.oracle().queried.borrow().is_empty());
}

#[test]
fn diff_splits_leaving_and_entering() {
    let d = VisibleSetTracker::diff(IndexRange::new(0, 5), IndexRange::new(3, 8));
    assert_eq!(d.leaving().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(d.entering().collect::<Vec<_>>(), vec![5, 6, 7]);

    // New range nested inside the old one: leaving on both sides.
    let d = VisibleSetTracker::diff(IndexRange::new(0, 10), IndexRange::new(3, 6));
    assert_eq!(d.leaving().collect::<Vec<_>>(), vec![0, 1, 2, 6, 7, 8, 9]);
    assert_eq!(d.entering().collect::<Vec<_>>(), Vec::<usize>::new());

    let d = VisibleSetTracker::diff(IndexRange::new(0, 3), IndexRange::new(10, 12));
    assert_eq!(d.leaving().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(d.entering().collect::<Vec<_>>(), vec![10, 11]);

    let d = VisibleSetTracker::diff(IndexRange::new(4, 9), IndexRange::new(4, 9));
    assert!(d.is_empty());
}

#[test]
fn first_layout_attaches_visible_range_without_transitions() {
    let mut e = engine(100, viewport(0.0, 50.0));
    assert!(e.needs_layout());
    assert!(e.layout_if_needed());
    assert!(!e.needs_layout());
    assert!(!e.layout_if_needed());

    assert_eq!(e.visible_range(), IndexRange::new(0, 5));
    assert_eq!(attached_indices(&e), vec![0, 1, 2, 3, 4]);
    assert_eq!(e.data_source().created, 5);
    for i in 0..5 {
        let cell = e.cell_at_index(i).unwrap();
        assert_eq!(cell.bound, Some(i));
        assert_eq!(cell.frame, RowOracle::row(0.0, i));
        assert!(cell.transitions.is_empty());
    }
    assert_eq!(e.state(), EngineState::Idle);
}

#[test]
fn attached_set_tracks_oracle_range_while_scrolling() {
    let mut e = engine(100, viewport(0.0, 50.0));
    for y in [0.0, 15.0, 20.0, 95.0, 400.0, 395.0, 0.0, 960.0] {
        e.set_viewport(viewport(y, 50.0));
        e.layout_if_needed();
        let expected = e.oracle().range_of_items_in_rect(viewport(y, 50.0));
        assert_eq!(e.visible_range(), expected);
        assert_eq!(attached_indices(&e), expected.iter().collect::<Vec<_>>());
        e.for_each_attached_cell(|i, cell| assert_eq!(cell.bound, Some(i)));
    }
    // Never more live cells than the widest visible range (6 rows at a partial offset).
    assert!(e.data_source().created <= 6);
}

#[test]
fn scrolling_reuses_cells_freed_in_the_same_pass() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.layout_if_needed();
    let serial_0 = e.cell_at_index(0).unwrap().serial;
    let serial_1 = e.cell_at_index(1).unwrap().serial;

    e.set_viewport(viewport(20.0, 50.0));
    e.layout_if_needed();

    assert_eq!(e.visible_range(), IndexRange::new(2, 7));
    assert_eq!(e.data_source().created, 5);
    let mut reused = [
        e.cell_at_index(5).unwrap().serial,
        e.cell_at_index(6).unwrap().serial,
    ];
    reused.sort();
    let mut freed = [serial_0, serial_1];
    freed.sort();
    assert_eq!(reused, freed);
    assert_eq!(e.pool_stats().hits, 2);
    assert_eq!(e.pool_stats().free, 0);
}

#[test]
fn moved_items_receive_additive_position_transitions() {
    let mut e = engine(100, viewport(0.0, 100.0));
    e.layout_if_needed();

    e.oracle_mut().move_rows(10.0);
    e.set_needs_layout();
    e.layout_if_needed();

    let cell = e.cell_at_index(0).unwrap();
    assert_eq!(cell.frame, RowOracle::row(10.0, 0));
    assert_eq!(cell.transitions.len(), 1);

    let t = &cell.transitions[0];
    assert_eq!(t.property, FrameProperty::Position);
    assert_eq!(t.duration_ms, 250);
    assert!(t.keyframes.additive);
    assert_eq!(t.keyframes.len(), 51);
    assert_eq!(t.keyframes.first(), Some(&Value::Vec2([0.0, -10.0])));
    assert_eq!(t.keyframes.last(), Some(&Value::Vec2([0.0, 0.0])));

    // At progress 0 the composed value is where the row was before the move.
    let resting = Value::Vec2(cell.frame.origin());
    assert_eq!(
        t.keyframes.compose(0, &resting),
        Some(Value::Vec2(RowOracle::row(0.0, 0).origin()))
    );
}

#[test]
fn resized_items_receive_size_transitions() {
    struct Grow(RowOracle);
    impl LayoutOracle for Grow {
        fn range_of_items_in_rect(&self, rect: Rect) -> IndexRange {
            self.0.range_of_items_in_rect(rect)
        }
        fn rect_of_item_at_index(&self, index: usize) -> Rect {
            let r = self.0.rect_of_item_at_index(index);
            Rect::new(r.x, r.y, r.width * 2.0, r.height)
        }
        fn previous_rect_of_item_at_index(&self, index: usize) -> Rect {
            self.0.previous_rect_of_item_at_index(index)
        }
    }

    let mut e = Caterpillar::new(
        Rows::new(10),
        Grow(RowOracle::new(10)),
        CaterpillarOptions::new().with_initial_viewport(viewport(0.0, 30.0)),
    );
    e.update_layout();
    e.update_layout();

    let cell = e.cell_at_index(1).unwrap();
    assert_eq!(cell.transitions.len(), 1);
    assert_eq!(cell.transitions[0].property, FrameProperty::Size);
    assert_eq!(
        cell.transitions[0].keyframes.first(),
        Some(&Value::Vec2([-WIDTH, 0.0]))
    );
}

#[test]
fn unchanged_rects_are_assigned_without_transitions() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.update_layout();
    e.update_layout();
    e.for_each_attached_cell(|_, cell| assert!(cell.transitions.is_empty()));
}

#[test]
fn reload_returns_every_cell_and_skips_transitions_once() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.layout_if_needed();

    e.oracle_mut().move_rows(10.0);
    e.reload_data();
    assert_eq!(e.attached_len(), 0);
    assert_eq!(e.pool().len(), 5);
    assert!(e.visible_range().is_empty());
    assert!(e.needs_layout());

    e.layout_if_needed();
    assert_eq!(e.data_source().created, 5);
    e.for_each_attached_cell(|i, cell| {
        assert!(cell.transitions.is_empty());
        assert_eq!(cell.frame, RowOracle::row(10.0, i));
    });
}

#[test]
fn shrinking_item_count_clips_visible_range() {
    let mut e = engine(100, viewport(0.0, 1000.0));
    e.layout_if_needed();
    assert_eq!(e.visible_range(), IndexRange::new(0, 100));

    e.data_source_mut().count = 5;
    e.oracle_mut().count = 5;
    e.reload_data();
    assert_eq!(e.number_of_items(), 5);
    e.oracle().queried.borrow_mut().clear();

    e.layout_if_needed();
    assert_eq!(e.visible_range(), IndexRange::new(0, 5));
    assert_eq!(attached_indices(&e), vec![0, 1, 2, 3, 4]);
    assert!(e.oracle().queried.borrow().iter().all(|&i| i < 5));
    assert_eq!(e.pool().len(), 95);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "range exceeds item count")]
fn oracle_range_beyond_item_count_is_asserted() {
    let mut e = Caterpillar::new(
        Rows::new(5),
        RowOracle::new(10),
        CaterpillarOptions::new().with_initial_viewport(viewport(0.0, 100.0)),
    );
    e.update_layout();
}

#[cfg(not(debug_assertions))]
#[test]
fn oracle_range_beyond_item_count_is_clipped() {
    let mut e = Caterpillar::new(
        Rows::new(5),
        RowOracle::new(10),
        CaterpillarOptions::new().with_initial_viewport(viewport(0.0, 100.0)),
    );
    e.update_layout();
    assert_eq!(e.visible_range(), IndexRange::new(0, 5));
    assert!(e.oracle().queried.borrow().iter().all(|&i| i < 5));
}

#[test]
fn relayout_requested_while_binding_is_coalesced() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.data_source_mut().relayout_on = Some(3);

    assert!(e.layout_if_needed());
    assert!(e.needs_layout());
    assert!(e.layout_if_needed());
    assert!(!e.needs_layout());
    assert!(!e.layout_if_needed());
}

#[test]
fn invalid_steps_fall_back_to_direct_assignment() {
    let mut e = Caterpillar::new(
        Rows::new(100),
        RowOracle::new(100),
        CaterpillarOptions::new()
            .with_initial_viewport(viewport(0.0, 50.0))
            .with_steps(0),
    );
    e.layout_if_needed();
    e.oracle_mut().move_rows(5.0);
    e.set_needs_layout();
    e.layout_if_needed();

    e.for_each_attached_cell(|i, cell| {
        assert!(cell.transitions.is_empty());
        assert_eq!(cell.frame, RowOracle::row(5.0, i));
    });
}

#[test]
fn disabled_layout_animation_skips_transitions() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.update_options(|o| o.animates_layout_changes = false);
    e.layout_if_needed();
    e.oracle_mut().move_rows(5.0);
    e.set_needs_layout();
    e.layout_if_needed();
    e.for_each_attached_cell(|_, cell| assert!(cell.transitions.is_empty()));
}

#[test]
fn absolute_option_emits_absolute_keyframes() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.update_options(|o| {
        o.absolute = true;
        o.steps = 4;
        o.timing = TimingCurve::linear();
    });
    e.layout_if_needed();
    e.oracle_mut().move_rows(20.0);
    e.set_needs_layout();
    e.layout_if_needed();

    let t = &e.cell_at_index(1).unwrap().transitions[0];
    assert!(!t.keyframes.additive);
    assert_eq!(t.keyframes.len(), 5);
    assert_eq!(t.keyframes.first(), Some(&Value::Vec2([0.0, 10.0])));
    assert_eq!(t.keyframes.last(), Some(&Value::Vec2([0.0, 30.0])));
}

#[test]
fn recycled_cells_do_not_carry_stale_transitions() {
    let mut e = engine(100, viewport(0.0, 50.0));
    e.layout_if_needed();

    e.oracle_mut().move_rows(10.0);
    e.set_needs_layout();
    e.layout_if_needed();
    let mut animated = 0;
    e.for_each_attached_cell(|_, cell| animated += cell.transitions.len());
    assert!(animated > 0);

    e.oracle_mut().settle();
    e.set_viewport(viewport(100.0, 50.0));
    e.layout_if_needed();

    assert_eq!(e.data_source().created, 5);
    e.for_each_attached_cell(|_, cell| {
        assert!(cell.transitions.is_empty());
        assert!(cell.recycled > 0);
    });
}

#[test]
fn selection_is_forwarded_to_optional_delegate() {
    let mut e = Caterpillar::new(
        Rows::new(100),
        RowOracle::new(100).with_selection(),
        CaterpillarOptions::new().with_initial_viewport(viewport(0.0, 50.0)),
    );
    e.layout_if_needed();
    assert!(e.selected_cell().is_none());

    assert!(e.select_item_at_index(2));
    assert_eq!(e.selected_index(), Some(2));
    assert_eq!(e.selected_cell().unwrap().bound, Some(2));
    assert_eq!(e.oracle().selections.as_deref(), Some(&[2][..]));

    assert!(!e.select_item_at_index(100));
    assert_eq!(e.selected_index(), Some(2));

    // Scrolled out: still selected, but no cell to return.
    e.set_viewport(viewport(500.0, 50.0));
    e.layout_if_needed();
    assert_eq!(e.selected_index(), Some(2));
    assert!(e.selected_cell().is_none());
}

#[test]
fn selection_without_delegate_is_recorded() {
    let mut e = engine(10, viewport(0.0, 50.0));
    e.layout_if_needed();
    assert!(e.select_item_at_index(7));
    assert_eq!(e.selected_index(), Some(7));
    assert!(e.oracle().selections.is_none());
}

#[test]
fn reload_drops_selection_past_new_count() {
    let mut e = engine(10, viewport(0.0, 50.0));
    e.layout_if_needed();
    e.select_item_at_index(8);

    e.data_source_mut().count = 4;
    e.oracle_mut().count = 4;
    e.reload_data();
    assert_eq!(e.selected_index(), None);
}

#[test]
fn public_dequeue_passes_through_to_pool() {
    let mut e = engine(10, viewport(0.0, 20.0));
    e.layout_if_needed();
    e.reload_data();
    assert_eq!(e.pool().len(), 2);

    let cell = e.dequeue_reusable_cell_with_identifier("row").unwrap();
    assert_eq!(cell.bound, None);
    assert!(e.dequeue_reusable_cell_with_identifier("header").is_none());
    assert_eq!(e.pool().len(), 1);
}

#[test]
fn index_range_and_rect_helpers() {
    let r = IndexRange::new(5, 2);
    assert!(r.is_empty());
    assert_eq!(r.len(), 0);
    assert_eq!(IndexRange::from(2..6).len(), 4);
    assert!(IndexRange::new(2, 6).contains(5));
    assert!(!IndexRange::new(2, 6).contains(6));

    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert_eq!(Value::from(a), Value::Vec4([0.0, 0.0, 10.0, 10.0]));
}
