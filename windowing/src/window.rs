//! The pure window calculation.
//!
//! Everything here is a function of its arguments only, so it can be called on every scroll or
//! resize event and property-tested without a host.

use core::cmp;

use crate::{ScrollMetrics, VisibleWindow};

/// Computes the inclusive index window to materialize.
///
/// Returns `None` when `item_count == 0`.
///
/// While the container is unmeasured (`container_height == 0`) the window degenerates to a single
/// index at the overscanned start. This is the expected transient state on first mount.
pub fn compute_window(
    item_count: usize,
    item_height: u32,
    scroll_offset: u64,
    container_height: u32,
    overscan: usize,
) -> Option<VisibleWindow> {
    if item_count == 0 {
        return None;
    }
    let item_height = cmp::max(item_height, 1) as u64;
    let last = item_count - 1;

    let raw_start = usize::try_from(scroll_offset / item_height).unwrap_or(usize::MAX);
    // An offset past the content still yields a window inside the list.
    let start_index = cmp::min(raw_start.saturating_sub(overscan), last);

    if container_height == 0 {
        return Some(VisibleWindow {
            start_index,
            end_index: start_index,
        });
    }

    let raw_end = scroll_offset
        .saturating_add(container_height as u64)
        .div_ceil(item_height);
    let raw_end = usize::try_from(raw_end).unwrap_or(usize::MAX);
    let end_index = cmp::min(last, raw_end.saturating_add(overscan));

    debug_assert!(start_index <= end_index);
    Some(VisibleWindow {
        start_index,
        end_index,
    })
}

/// Total scrollable height exposed to the container, independent of the rendered window.
pub fn total_extent(item_count: usize, item_height: u32) -> u64 {
    (item_count as u64).saturating_mul(item_height as u64)
}

pub fn row_top(index: usize, item_height: u32) -> u64 {
    (index as u64).saturating_mul(item_height as u64)
}

/// Whether the bottom of the viewport has passed `threshold` of the scroll extent.
pub fn is_end_reached(metrics: ScrollMetrics, threshold: f64) -> bool {
    let reached = metrics
        .scroll_offset
        .saturating_add(metrics.container_height as u64);
    reached as f64 >= metrics.scroll_extent as f64 * threshold
}
