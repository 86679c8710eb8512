//! Scroll-driven row virtualization.
//!
//! Large fleets produce logical row lists (resources plus group headers) in
//! the thousands; building styled cells for every row on every frame wastes
//! the whole render budget. A [`RowWindow`] keeps a single integer anchor
//! and derives the contiguous index range worth materializing from the
//! current scroll position, with overscan past the viewport edge so small
//! scrolls stay inside the mounted range, plus a reveal operation that
//! re-centers the window on a target row for jump-to-resource navigation.
//!
//! The current row total is a parameter of every call instead of stored
//! state, so a shrinking list is reclamped on the next read without any
//! resize event. Below the virtualization threshold the engine is inert and
//! reports the full range. All index math clamps; nothing here panics.

/// Mounted range length unless configured otherwise.
const DEFAULT_WINDOW_SIZE: usize = 140;
/// Virtualization kicks in above this many rows.
const DEFAULT_VIRTUALIZE_OVER: usize = 500;
/// Upper bound on rows mounted beyond the viewport edge.
const MAX_OVERSCAN: usize = 20;
/// Substitute for a non-positive or non-finite row height, in the pixel
/// units of the scroll contract.
const FALLBACK_ROW_HEIGHT: f64 = 40.0;

/// Virtualization window over a logical row list.
///
/// One instance per table. The derived-range accessors take `&mut self`
/// because they enforce the clamping invariants as they read: a stale
/// anchor from a larger list is pulled back into range, and leaving the
/// windowed regime resets the anchor to zero.
#[derive(Debug, Clone)]
pub struct RowWindow {
    /// Mounted range length.
    window_size: usize,
    /// Row totals above this are virtualized.
    virtualize_over: usize,
    /// First mounted index; the engine's only retained position state.
    window_start: usize,
    /// Last watched reveal target, for edge-triggered reveal.
    last_reveal: Option<usize>,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl RowWindow {
    pub fn new() -> Self {
        RowWindow {
            window_size: DEFAULT_WINDOW_SIZE,
            virtualize_over: DEFAULT_VIRTUALIZE_OVER,
            window_start: 0,
            last_reveal: None,
        }
    }

    /// Overrides the mounted range length (floored at 1).
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size.max(1);
        self
    }

    /// Overrides the virtualization threshold.
    pub fn with_virtualize_over(mut self, limit: usize) -> Self {
        self.virtualize_over = limit;
        self
    }

    /// Whether the list is long enough to virtualize.
    pub fn is_windowed(&self, total: usize) -> bool {
        total > self.virtualize_over
    }

    /// Mounted range `[start, end)`. Unwindowed lists report the full range.
    pub fn range(&mut self, total: usize) -> (usize, usize) {
        if !self.is_windowed(total) {
            self.window_start = 0;
            return (0, total);
        }
        self.window_start = self.window_start.min(self.max_start(total));
        let start = self.window_start;
        (start, total.min(start + self.window_size))
    }

    pub fn start_index(&mut self, total: usize) -> usize {
        self.range(total).0
    }

    pub fn end_index(&mut self, total: usize) -> usize {
        self.range(total).1
    }

    /// Whether `index` falls inside the mounted range.
    pub fn is_visible(&mut self, total: usize, index: usize) -> bool {
        let (start, end) = self.range(total);
        index >= start && index < end
    }

    /// Recomputes the anchor from a scroll position.
    ///
    /// The contract is in pixel units: `scroll_top` offset, viewport height,
    /// and per-row height. The TUI calls it with row units (row height 1.0);
    /// the math is identical. Non-positive or non-finite heights fall back
    /// to defaults, a negative scroll offset counts as zero.
    pub fn on_scroll(&mut self, total: usize, scroll_top: f64, viewport_height: f64, row_height: f64) {
        if !self.is_windowed(total) {
            self.window_start = 0;
            return;
        }
        let row = if row_height.is_finite() && row_height > 0.0 {
            row_height
        } else {
            FALLBACK_ROW_HEIGHT
        };
        let height = if viewport_height.is_finite() && viewport_height > 0.0 {
            viewport_height
        } else {
            row
        };
        let top = if scroll_top.is_finite() && scroll_top > 0.0 {
            scroll_top
        } else {
            0.0
        };

        let rows_in_view = ((height / row).ceil() as usize).max(1);
        let overscan = self.window_size.saturating_sub(rows_in_view).min(MAX_OVERSCAN);
        let first_visible = (top / row).floor() as usize;
        self.window_start = first_visible
            .saturating_sub(overscan)
            .min(self.max_start(total));
    }

    /// Centers the window on `index` unless it is already mounted. Keeping
    /// visible indices untouched avoids a useless rebuild when the target is
    /// on screen already.
    pub fn reveal(&mut self, total: usize, index: usize) {
        if !self.is_windowed(total) || index >= total {
            return;
        }
        let (start, end) = self.range(total);
        if index >= start && index < end {
            return;
        }
        self.window_start = index
            .saturating_sub(self.window_size / 2)
            .min(self.max_start(total));
    }

    /// Edge-triggered reveal: fires only when the watched target changes to
    /// a new `Some(index)`. Re-submitting the same target is a no-op, so a
    /// user who scrolled away is not yanked back every frame.
    pub fn watch_reveal_target(&mut self, total: usize, target: Option<usize>) {
        if target == self.last_reveal {
            return;
        }
        self.last_reveal = target;
        if let Some(index) = target {
            self.reveal(total, index);
        }
    }

    fn max_start(&self, total: usize) -> usize {
        total.saturating_sub(self.window_size)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts the structural bounds that must survive any call sequence.
    fn assert_bounds(w: &mut RowWindow, total: usize) {
        let (start, end) = w.range(total);
        assert!(start <= end, "start {start} > end {end}");
        assert!(end <= total, "end {end} > total {total}");
        if w.is_windowed(total) {
            assert!(end - start <= 140, "window larger than configured size");
        } else {
            assert_eq!((start, end), (0, total));
        }
    }

    #[test]
    fn short_lists_are_not_windowed() {
        let mut w = RowWindow::new();
        assert!(!w.is_windowed(300));
        assert_eq!(w.range(300), (0, 300));
        assert!(w.is_visible(300, 0));
        assert!(w.is_visible(300, 299));
        assert!(!w.is_visible(300, 300));

        // Scrolling an unwindowed list keeps the full range.
        w.on_scroll(300, 10_000.0, 800.0, 40.0);
        assert_eq!(w.range(300), (0, 300));
    }

    #[test]
    fn empty_list_is_inert() {
        let mut w = RowWindow::new();
        assert_eq!(w.range(0), (0, 0));
        assert!(!w.is_visible(0, 0));
        w.on_scroll(0, 100.0, 100.0, 10.0);
        w.reveal(0, 0);
        assert_eq!(w.range(0), (0, 0));
    }

    #[test]
    fn scroll_positions_the_window_with_overscan() {
        let mut w = RowWindow::new();
        // 20 rows in view, overscan capped at 20, first visible row 100.
        w.on_scroll(1000, 4000.0, 800.0, 40.0);
        assert_eq!(w.range(1000), (80, 220));
        assert!(w.start_index(1000) <= 860); // max_start for 1000/140
        assert!(w.is_visible(1000, 100));
        assert!(w.is_visible(1000, 119));
        assert!(!w.is_visible(1000, 79));
        assert_bounds(&mut w, 1000);
    }

    #[test]
    fn overscan_shrinks_with_small_windows() {
        let mut w = RowWindow::new().with_window_size(30).with_virtualize_over(100);
        // 25 rows in view leaves only 5 rows of overscan budget.
        w.on_scroll(1000, 4000.0, 1000.0, 40.0);
        // first visible 100, overscan 5.
        assert_eq!(w.start_index(1000), 95);
        assert_eq!(w.end_index(1000), 125);
    }

    #[test]
    fn bad_row_height_falls_back_to_default() {
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let mut w = RowWindow::new();
            w.on_scroll(1000, 4000.0, 800.0, bad);
            assert_eq!(w.range(1000), (80, 220), "row_height = {bad}");
        }
    }

    #[test]
    fn bad_viewport_height_counts_as_one_row() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, 4000.0, -5.0, 40.0);
        // rows_in_view 1, overscan 20, first visible 100.
        assert_eq!(w.range(1000), (80, 220));
        assert_bounds(&mut w, 1000);
    }

    #[test]
    fn negative_scroll_clamps_to_top() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, -500.0, 800.0, 40.0);
        assert_eq!(w.start_index(1000), 0);
    }

    #[test]
    fn huge_scroll_clamps_to_max_start() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, 1e12, 800.0, 40.0);
        assert_eq!(w.range(1000), (860, 1000));
    }

    #[test]
    fn reveal_centers_an_offscreen_index() {
        let mut w = RowWindow::new();
        w.reveal(1000, 500);
        assert_eq!(w.range(1000), (430, 570)); // 500 - 140/2
    }

    #[test]
    fn reveal_is_a_noop_for_visible_indices() {
        let mut w = RowWindow::new();
        w.reveal(1000, 500);
        let before = w.range(1000);
        w.reveal(1000, 440);
        w.reveal(1000, 569);
        assert_eq!(w.range(1000), before);

        // One past the end is no longer visible and recenters.
        w.reveal(1000, 570);
        assert_eq!(w.start_index(1000), 500);
    }

    #[test]
    fn reveal_ignores_invalid_targets() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, 4000.0, 800.0, 40.0);
        let before = w.range(1000);
        w.reveal(1000, 1000); // == total
        w.reveal(1000, usize::MAX);
        assert_eq!(w.range(1000), before);

        // Unwindowed lists never reveal.
        let mut w = RowWindow::new();
        w.reveal(400, 399);
        assert_eq!(w.range(400), (0, 400));
    }

    #[test]
    fn shrinking_total_reclamps_on_next_read() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, 1e12, 800.0, 40.0);
        assert_eq!(w.start_index(1000), 860);

        // List shrank; no resize event, the next read reclamps.
        assert_eq!(w.range(600), (460, 600));
        assert_bounds(&mut w, 600);
    }

    #[test]
    fn leaving_windowed_mode_resets_the_anchor() {
        let mut w = RowWindow::new();
        w.on_scroll(1000, 1e12, 800.0, 40.0);
        assert_eq!(w.start_index(1000), 860);

        // Drop below the threshold: full range, anchor reset.
        assert_eq!(w.range(300), (0, 300));
        // Growing again starts from the top, not the stale offset.
        assert_eq!(w.range(1000), (0, 140));
    }

    #[test]
    fn watch_reveal_fires_only_on_change() {
        let mut w = RowWindow::new();
        w.watch_reveal_target(1000, Some(700));
        assert_eq!(w.start_index(1000), 630);

        // User scrolls away; the unchanged target must not yank them back.
        w.on_scroll(1000, 0.0, 800.0, 40.0);
        assert_eq!(w.start_index(1000), 0);
        w.watch_reveal_target(1000, Some(700));
        assert_eq!(w.start_index(1000), 0);

        // Clearing and re-setting the target is a change and fires again.
        w.watch_reveal_target(1000, None);
        assert_eq!(w.start_index(1000), 0);
        w.watch_reveal_target(1000, Some(700));
        assert_eq!(w.start_index(1000), 630);
    }

    #[test]
    fn bounds_hold_across_mixed_call_sequences() {
        let mut w = RowWindow::new();
        let steps: [(usize, f64); 10] = [
            (1000, 0.0),
            (1000, 39_999.0),
            (600, 12_000.0),
            (501, 1e9),
            (500, 4000.0), // exactly at threshold: unwindowed
            (10_000, 399_960.0),
            (10_000, -1.0),
            (0, 0.0),
            (750, 29_000.0),
            (750, f64::NAN),
        ];
        for (total, scroll) in steps {
            w.on_scroll(total, scroll, 800.0, 40.0);
            assert_bounds(&mut w, total);
            w.reveal(total, total.saturating_sub(1));
            assert_bounds(&mut w, total);
            w.watch_reveal_target(total, Some(total / 2));
            assert_bounds(&mut w, total);
        }
    }

    #[test]
    fn window_size_longer_than_list_mounts_everything() {
        let mut w = RowWindow::new().with_virtualize_over(10);
        assert!(w.is_windowed(50));
        assert_eq!(w.range(50), (0, 50));
        w.on_scroll(50, 1e9, 800.0, 40.0);
        assert_eq!(w.range(50), (0, 50)); // max_start is 0
    }
}
