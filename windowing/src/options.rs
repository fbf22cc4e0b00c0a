use alloc::sync::Arc;

use crate::engine::WindowEngine;

pub const DEFAULT_OVERSCAN: usize = 3;
pub const DEFAULT_END_REACHED_THRESHOLD: f64 = 0.8;

/// A callback fired after each engine state change (the re-render hook).
pub type OnChangeCallback = Arc<dyn Fn(&WindowEngine) + Send + Sync>;

/// A callback fired when a scroll event crosses the end-reached threshold.
pub type EndReachedCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`crate::WindowEngine`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s so hosts can update
/// a few fields and call `WindowEngine::set_options` without reallocating closures.
pub struct ListOptions {
    /// Total logical rows.
    pub item_count: usize,
    /// Fixed row height. Uniform across rows and constant for the engine's lifetime.
    pub item_height: u32,
    /// Extra rows materialized beyond each visible edge.
    pub overscan: usize,
    /// Fraction of the scroll extent at which `on_end_reached` fires, in `[0, 1]`.
    pub end_reached_threshold: f64,
    /// Caller-controlled flag. While set, `on_end_reached` is not invoked.
    pub loading: bool,
    pub on_end_reached: Option<EndReachedCallback>,
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for ListOptions {
    fn clone(&self) -> Self {
        Self {
            item_count: self.item_count,
            item_height: self.item_height,
            overscan: self.overscan,
            end_reached_threshold: self.end_reached_threshold,
            loading: self.loading,
            on_end_reached: self.on_end_reached.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl ListOptions {
    /// Creates options for `item_count` rows of `item_height` each.
    ///
    /// A zero `item_height` is raised to `1`.
    pub fn new(item_count: usize, item_height: u32) -> Self {
        Self {
            item_count,
            item_height: item_height.max(1),
            overscan: DEFAULT_OVERSCAN,
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            loading: false,
            on_end_reached: None,
            on_change: None,
        }
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the end-reached threshold, clamped into `[0, 1]`. NaN keeps the default.
    pub fn with_end_reached_threshold(mut self, threshold: f64) -> Self {
        self.end_reached_threshold = sanitize_threshold(threshold);
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowEngine) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

pub(crate) fn sanitize_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        return DEFAULT_END_REACHED_THRESHOLD;
    }
    threshold.clamp(0.0, 1.0)
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_count", &self.item_count)
            .field("item_height", &self.item_height)
            .field("overscan", &self.overscan)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("loading", &self.loading)
            .field("on_end_reached", &self.on_end_reached.is_some())
            .finish_non_exhaustive()
    }
}
