use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::options::sanitize_threshold;
use crate::window::{compute_window, is_end_reached, row_top, total_extent};
use crate::{
    ListOptions, Phase, PositionedRow, ScrollDirection, ScrollMetrics, ViewportState,
    VisibleWindow,
};

/// A headless windowing engine for one mounted list.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - The host drives it with resize and scroll events (`on_resize` / `on_scroll`).
/// - Navigation returns the offset to write instead of touching the container, so the resulting
///   scroll event flows back through `on_scroll` like any other.
///
/// For host bindings and row rendering, see the `windowing-adapter` crate.
#[derive(Clone, Debug)]
pub struct WindowEngine {
    options: ListOptions,
    viewport: ViewportState,
    phase: Phase,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_target: Option<usize>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl WindowEngine {
    pub fn new(mut options: ListOptions) -> Self {
        // `ListOptions` fields are public, so a struct literal can skip the builder's clamps.
        options.item_height = options.item_height.max(1);
        options.end_reached_threshold = sanitize_threshold(options.end_reached_threshold);
        wdebug!(
            item_count = options.item_count,
            item_height = options.item_height,
            overscan = options.overscan,
            "WindowEngine::new"
        );
        Self {
            options,
            viewport: ViewportState::default(),
            phase: Phase::Unmeasured,
            scroll_direction: None,
            last_scroll_target: None,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// `item_height` cannot change after construction; a different value is ignored and the
    /// list has to be remounted to pick it up.
    pub fn set_options(&mut self, mut options: ListOptions) {
        if options.item_height != self.options.item_height {
            wwarn!(
                current = self.options.item_height,
                requested = options.item_height,
                "item_height changes require a remount; keeping the current height"
            );
            options.item_height = self.options.item_height;
        }
        options.end_reached_threshold = sanitize_threshold(options.end_reached_threshold);
        self.options = options;
        wtrace!(
            item_count = self.options.item_count,
            overscan = self.options.overscan,
            loading = self.options.loading,
            "WindowEngine::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&WindowEngine) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_end_reached(
        &mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) {
        self.options.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.phase == Phase::Unmounted {
            return;
        }
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify();
        }
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn item_height(&self) -> u32 {
        self.options.item_height
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if self.options.item_count == item_count {
            return;
        }
        self.options.item_count = item_count;
        self.notify();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_end_reached_threshold(&mut self, threshold: f64) {
        self.options.end_reached_threshold = sanitize_threshold(threshold);
    }

    pub fn is_loading(&self) -> bool {
        self.options.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.options.loading == loading {
            return;
        }
        self.options.loading = loading;
        self.notify();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_measured(&self) -> bool {
        self.phase == Phase::Measured
    }

    pub fn is_unmounted(&self) -> bool {
        self.phase == Phase::Unmounted
    }

    /// Ends the lifecycle. Every later event is ignored and no more notifications fire.
    pub fn unmount(&mut self) {
        if self.phase == Phase::Unmounted {
            return;
        }
        wdebug!("WindowEngine::unmount");
        self.phase = Phase::Unmounted;
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    pub fn container_height(&self) -> u32 {
        self.viewport.container_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Records a new container height reported by the host's resize observation.
    pub fn on_resize(&mut self, container_height: u32) {
        if self.phase == Phase::Unmounted {
            wwarn!(container_height, "resize event after unmount ignored");
            return;
        }
        wtrace!(container_height, "on_resize");

        if self.viewport.container_height == container_height {
            return;
        }
        self.viewport.container_height = container_height;
        if self.phase == Phase::Unmeasured && container_height > 0 {
            self.phase = Phase::Measured;
        }
        self.notify();
    }

    /// Records a scroll event and runs end-reached detection.
    ///
    /// Returns `true` when `on_end_reached` was invoked. The engine only suppresses repeats while
    /// `loading` is set; hosts flip `loading` while the requested page is outstanding.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if self.phase == Phase::Unmounted {
            wwarn!(
                scroll_offset = metrics.scroll_offset,
                "scroll event after unmount ignored"
            );
            return false;
        }
        wtrace!(
            scroll_offset = metrics.scroll_offset,
            scroll_extent = metrics.scroll_extent,
            container_height = metrics.container_height,
            "on_scroll"
        );

        let mut fired = false;
        self.batch_update(|e| {
            e.set_scroll_offset(metrics.scroll_offset);
            fired = e.check_end_reached(metrics);
        });
        fired
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        let prev = self.viewport.scroll_offset;
        if prev == offset {
            return;
        }
        self.viewport.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    fn check_end_reached(&self, metrics: ScrollMetrics) -> bool {
        let Some(cb) = &self.options.on_end_reached else {
            return false;
        };
        if self.options.loading {
            return false;
        }
        if !is_end_reached(metrics, self.options.end_reached_threshold) {
            return false;
        }
        wdebug!(
            scroll_offset = metrics.scroll_offset,
            scroll_extent = metrics.scroll_extent,
            "end reached"
        );
        cb();
        true
    }

    /// The offset that brings `target` to the top of the viewport, or `None` when out of range.
    pub fn scroll_to_index_offset(&self, target: usize) -> Option<u64> {
        (target < self.options.item_count).then(|| row_top(target, self.options.item_height))
    }

    /// Dispatches a scroll-to-index command (no animation).
    ///
    /// Returns the offset the host must write to the container's scroll position. The engine
    /// does not change `scroll_offset` itself: the write is observed through the next
    /// `on_scroll` event.
    ///
    /// Returns `None` (no-op) when `target` is out of range, equals the last applied target, or
    /// the container already sits at the target offset.
    pub fn scroll_to_index(&mut self, target: usize) -> Option<u64> {
        if self.phase == Phase::Unmounted {
            return None;
        }
        let Some(offset) = self.scroll_to_index_offset(target) else {
            wdebug!(
                index = target,
                item_count = self.options.item_count,
                "scroll_to_index out of range ignored"
            );
            return None;
        };
        if self.last_scroll_target == Some(target) {
            return None;
        }
        self.last_scroll_target = Some(target);
        if self.viewport.scroll_offset == offset {
            return None;
        }
        wdebug!(index = target, offset, "scroll_to_index");
        Some(offset)
    }

    pub fn last_scroll_target(&self) -> Option<usize> {
        self.last_scroll_target
    }

    /// Forgets the last applied target so the same index can be dispatched again.
    pub fn clear_scroll_target(&mut self) {
        self.last_scroll_target = None;
    }

    /// Total scrollable height: `item_count * item_height`, regardless of the window.
    pub fn total_extent(&self) -> u64 {
        total_extent(self.options.item_count, self.options.item_height)
    }

    pub fn window(&self) -> Option<VisibleWindow> {
        self.window_for(self.viewport.scroll_offset, self.viewport.container_height)
    }

    pub fn window_for(&self, scroll_offset: u64, container_height: u32) -> Option<VisibleWindow> {
        if self.phase == Phase::Unmounted {
            return None;
        }
        compute_window(
            self.options.item_count,
            self.options.item_height,
            scroll_offset,
            container_height,
            self.options.overscan,
        )
    }

    pub fn row(&self, index: usize) -> Option<PositionedRow> {
        (index < self.options.item_count).then(|| PositionedRow {
            index,
            top: row_top(index, self.options.item_height),
            height: self.options.item_height,
        })
    }

    /// Visits every row of the current window in ascending order, without allocations.
    pub fn for_each_row(&self, f: impl FnMut(PositionedRow)) {
        self.for_each_row_for(
            self.viewport.scroll_offset,
            self.viewport.container_height,
            f,
        );
    }

    pub fn for_each_row_for(
        &self,
        scroll_offset: u64,
        container_height: u32,
        mut f: impl FnMut(PositionedRow),
    ) {
        let Some(window) = self.window_for(scroll_offset, container_height) else {
            return;
        };
        let height = self.options.item_height;
        let mut top = row_top(window.start_index, height);
        for index in window.indexes() {
            f(PositionedRow { index, top, height });
            top = top.saturating_add(height as u64);
        }
    }

    /// Collects the current window's rows into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_row`]. Reuse `out` across frames to
    /// avoid reallocating.
    pub fn collect_rows(&self, out: &mut Vec<PositionedRow>) {
        out.clear();
        self.for_each_row(|row| out.push(row));
    }
}
