//! Host bindings for the `windowing` crate.
//!
//! The `windowing` crate is UI-agnostic and owns the window math and viewport state. This crate
//! provides what a host needs on top of it:
//!
//! - [`ScrollHost`]: the capability a scroll container exposes (layout reads, scroll writes,
//!   scoped resize/scroll subscriptions)
//! - [`WindowedList`]: the list composition (items, row rendering, empty and loading states,
//!   `scroll_to_index`)
//! - [`SimContainer`]: a deterministic scroll container for tests and demos
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod list;
mod sim;

#[cfg(test)]
mod tests;

pub use host::{AttachError, ContainerEvent, ScrollHost, Subscription};
pub use list::{ListFrame, ListProps, RenderItem, RenderedRow, WindowedList};
pub use sim::SimContainer;
