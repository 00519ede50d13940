use crate::{IndexRange, LayoutOracle, Rect};

/// Tracks the visible index range between layout passes and diffs successive ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleSetTracker {
    range: IndexRange,
}

impl VisibleSetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The range committed by the last layout pass.
    pub fn range(&self) -> IndexRange {
        self.range
    }

    pub(crate) fn commit(&mut self, range: IndexRange) {
        self.range = range;
    }

    pub(crate) fn reset(&mut self) {
        self.range = IndexRange::EMPTY;
    }

    /// Asks the oracle which indexes intersect `viewport`.
    ///
    /// The oracle's answer is authoritative; the only adjustment is enforcing its contract:
    /// indexes at or beyond `count` are dropped (and debug-asserted). An empty collection never
    /// queries the oracle.
    pub fn compute_visible_range<O: LayoutOracle + ?Sized>(
        &self,
        oracle: &O,
        viewport: Rect,
        count: usize,
    ) -> IndexRange {
        if count == 0 {
            return IndexRange::EMPTY;
        }

        let reported = oracle.range_of_items_in_rect(viewport);
        if reported.end_index > count {
            vwarn!(
                start = reported.start_index,
                end = reported.end_index,
                count,
                "LayoutOracle: range exceeds item count"
            );
            debug_assert!(
                reported.end_index <= count,
                "LayoutOracle: range exceeds item count (range={}..{}, count={count})",
                reported.start_index,
                reported.end_index
            );
        }

        let start = reported.start_index.min(count);
        let end = reported.end_index.min(count);
        IndexRange::new(start, end)
    }

    /// Splits the transition from `old` to `new` into leaving and entering indexes.
    pub fn diff(old: IndexRange, new: IndexRange) -> RangeDiff {
        RangeDiff {
            leaving: subtract(old, new),
            entering: subtract(new, old),
        }
    }
}

/// `a \ b` as at most two disjoint ranges.
fn subtract(a: IndexRange, b: IndexRange) -> [IndexRange; 2] {
    if a.is_empty() {
        return [IndexRange::EMPTY; 2];
    }
    let before = IndexRange::new(a.start_index, a.end_index.min(b.start_index));
    let after = IndexRange::new(a.start_index.max(b.end_index), a.end_index);
    [before, after]
}

/// The result of [`VisibleSetTracker::diff`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeDiff {
    pub leaving: [IndexRange; 2],
    pub entering: [IndexRange; 2],
}

impl RangeDiff {
    pub fn leaving(&self) -> impl Iterator<Item = usize> {
        let [a, b] = self.leaving;
        a.iter().chain(b.iter())
    }

    pub fn entering(&self) -> impl Iterator<Item = usize> {
        let [a, b] = self.entering;
        a.iter().chain(b.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.leaving.iter().chain(self.entering.iter()).all(IndexRange::is_empty)
    }
}
