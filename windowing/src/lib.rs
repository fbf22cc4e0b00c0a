//! A headless windowing engine for fixed-row-height vertical lists.
//!
//! For host bindings and the `WindowedList` composition, see the `windowing-adapter` crate.
//!
//! The engine renders only the rows that overlap the scroll viewport (plus overscan), while the
//! full logical extent (`item_count * item_height`) stays exposed to the scroll container so the
//! scrollbar behaves as if every row existed.
//!
//! It is UI-agnostic. A host layer is expected to feed it:
//! - the container height whenever the container resizes
//! - the scroll offset (and scroll extent) on every scroll event
//!
//! and to write the offsets returned by [`WindowEngine::scroll_to_index`] back to the container.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod options;
mod state;
mod types;
mod window;


pub use engine::WindowEngine;
pub use options::{
    DEFAULT_END_REACHED_THRESHOLD, DEFAULT_OVERSCAN, EndReachedCallback, ListOptions,
    OnChangeCallback,
};
pub use state::{Phase, ViewportState};
pub use types::{PositionedRow, ScrollDirection, ScrollMetrics, VisibleWindow};
pub use window::{compute_window, is_end_reached, row_top, total_extent};
