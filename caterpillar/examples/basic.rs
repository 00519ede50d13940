use caterpillar::{
    Caterpillar, CaterpillarOptions, CellQueue, DataSource, FrameTransition, IndexRange,
    LayoutOracle, Rect, ReusableCell,
};

const ROW: f64 = 24.0;

struct Row {
    label: String,
    frame: Rect,
    pending: Vec<FrameTransition>,
}

impl ReusableCell for Row {
    fn reuse_identifier(&self) -> &str {
        "row"
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn add_transition(&mut self, transition: FrameTransition) {
        self.pending.push(transition);
    }

    fn remove_all_transitions(&mut self) {
        self.pending.clear();
    }
}

struct Items {
    count: usize,
}

impl DataSource<Row> for Items {
    fn number_of_items(&self) -> usize {
        self.count
    }

    fn cell_for_item_at_index(&mut self, queue: &mut CellQueue<'_, Row>, index: usize) -> Row {
        let mut row = queue
            .dequeue_reusable_cell_with_identifier("row")
            .unwrap_or_else(|| Row {
                label: String::new(),
                frame: Rect::ZERO,
                pending: Vec::new(),
            });
        row.label = format!("item {index}");
        row
    }
}

/// A list whose rows can be pushed down by a header of varying height.
struct List {
    count: usize,
    header: f64,
    previous_header: f64,
}

impl LayoutOracle for List {
    fn range_of_items_in_rect(&self, rect: Rect) -> IndexRange {
        let start = ((rect.y - self.header) / ROW).floor().max(0.0) as usize;
        let end = ((rect.max_y() - self.header) / ROW).ceil().max(0.0) as usize;
        IndexRange::new(start.min(self.count), end.min(self.count))
    }

    fn rect_of_item_at_index(&self, index: usize) -> Rect {
        Rect::new(0.0, self.header + index as f64 * ROW, 320.0, ROW)
    }

    fn previous_rect_of_item_at_index(&self, index: usize) -> Rect {
        Rect::new(0.0, self.previous_header + index as f64 * ROW, 320.0, ROW)
    }
}

fn main() {
    let mut list = Caterpillar::new(
        Items { count: 10_000 },
        List {
            count: 10_000,
            header: 0.0,
            previous_header: 0.0,
        },
        CaterpillarOptions::new().with_initial_viewport(Rect::new(0.0, 0.0, 320.0, 240.0)),
    );

    // Scroll through the list one tick at a time.
    for y in (0..2_000).step_by(400) {
        list.set_viewport(Rect::new(0.0, y as f64, 320.0, 240.0));
        list.layout_if_needed();
        println!(
            "y={y} range={:?} stats={:?}",
            list.visible_range(),
            list.pool_stats()
        );
    }

    // Grow the header: visible rows get additive transitions from their old position.
    let oracle = list.oracle_mut();
    oracle.previous_header = oracle.header;
    oracle.header = 48.0;
    list.set_needs_layout();
    list.layout_if_needed();

    list.for_each_attached_cell(|index, row| {
        let first = row.pending.first().and_then(|t| t.keyframes.first());
        println!("{index}: {} frame={:?} starts_at={first:?}", row.label, row.frame);
    });
}
