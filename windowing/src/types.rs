use core::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The contiguous index range to materialize.
///
/// Both bounds are inclusive. An empty collection has no window at all (see
/// [`crate::compute_window`]), so a `VisibleWindow` always holds at least one index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// A logical row paired with its absolute layout position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedRow {
    pub index: usize,
    /// Offset from the top of the scroll content (`index * item_height`).
    pub top: u64,
    pub height: u32,
}

impl PositionedRow {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// The three layout values read from the scroll container on a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_offset: u64,
    /// Total scrollable content height of the container.
    pub scroll_extent: u64,
    pub container_height: u32,
}
