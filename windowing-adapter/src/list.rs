use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use windowing::{
    DEFAULT_END_REACHED_THRESHOLD, DEFAULT_OVERSCAN, EndReachedCallback, ListOptions,
    PositionedRow, ScrollMetrics, WindowEngine,
};

use crate::{AttachError, ContainerEvent, ScrollHost, Subscription};

/// Maps an item and its index to rendered content.
pub type RenderItem<T, V> = Arc<dyn Fn(&T, usize) -> V + Send + Sync>;

/// Caller-supplied configuration for a [`WindowedList`].
pub struct ListProps<T, V> {
    pub items: Vec<T>,
    pub item_height: u32,
    pub overscan: usize,
    pub on_end_reached: Option<EndReachedCallback>,
    pub end_reached_threshold: f64,
    pub loading: bool,
    pub loading_indicator: Option<V>,
    pub empty_component: Option<V>,
    /// Navigation target. A change dispatches one jump; an unchanged value does nothing.
    pub scroll_to_index: Option<usize>,
    pub render_item: RenderItem<T, V>,
}

impl<T, V> ListProps<T, V> {
    pub fn new(
        items: Vec<T>,
        item_height: u32,
        render_item: impl Fn(&T, usize) -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            items,
            item_height,
            overscan: DEFAULT_OVERSCAN,
            on_end_reached: None,
            end_reached_threshold: DEFAULT_END_REACHED_THRESHOLD,
            loading: false,
            loading_indicator: None,
            empty_component: None,
            scroll_to_index: None,
            render_item: Arc::new(render_item),
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_on_end_reached(
        mut self,
        on_end_reached: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_end_reached = on_end_reached.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_end_reached_threshold(mut self, threshold: f64) -> Self {
        self.end_reached_threshold = threshold;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_loading_indicator(mut self, loading_indicator: Option<V>) -> Self {
        self.loading_indicator = loading_indicator;
        self
    }

    pub fn with_empty_component(mut self, empty_component: Option<V>) -> Self {
        self.empty_component = empty_component;
        self
    }

    pub fn with_scroll_to_index(mut self, scroll_to_index: Option<usize>) -> Self {
        self.scroll_to_index = scroll_to_index;
        self
    }

    fn engine_options(&self) -> ListOptions {
        let mut options = ListOptions::new(self.items.len(), self.item_height)
            .with_overscan(self.overscan)
            .with_end_reached_threshold(self.end_reached_threshold)
            .with_loading(self.loading);
        options.on_end_reached = self.on_end_reached.clone();
        options
    }
}

impl<T: fmt::Debug, V: fmt::Debug> fmt::Debug for ListProps<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListProps")
            .field("items", &self.items.len())
            .field("item_height", &self.item_height)
            .field("overscan", &self.overscan)
            .field("end_reached_threshold", &self.end_reached_threshold)
            .field("loading", &self.loading)
            .field("loading_indicator", &self.loading_indicator)
            .field("empty_component", &self.empty_component)
            .field("scroll_to_index", &self.scroll_to_index)
            .finish_non_exhaustive()
    }
}

/// One materialized row: layout plus the caller's content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedRow<V> {
    pub row: PositionedRow,
    pub content: V,
}

/// The output of one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListFrame<V> {
    /// Height of the scroll content (`item_count * item_height`), independent of `rows`.
    pub total_height: u64,
    pub rows: Vec<RenderedRow<V>>,
    /// Set only when there are no items and the list is not loading.
    pub empty: Option<V>,
    /// Trails `rows` while loading.
    pub loading_indicator: Option<V>,
}

impl<V> Default for ListFrame<V> {
    fn default() -> Self {
        Self {
            total_height: 0,
            rows: Vec::new(),
            empty: None,
            loading_indicator: None,
        }
    }
}

/// A windowed list bound to a [`ScrollHost`].
///
/// Lifecycle:
/// - `mount(host)` subscribes to resize and scroll notifications and dispatches a pending
///   `scroll_to_index`.
/// - The host forwards its notifications through `handle_event`.
/// - `render()` materializes the rows of the current window. After laying the frame out the
///   host calls `on_layout`, which dispatches a jump that was waiting for content.
/// - `unmount()` (or drop) releases both subscriptions.
pub struct WindowedList<T, V> {
    engine: WindowEngine,
    items: Vec<T>,
    render_item: RenderItem<T, V>,
    loading_indicator: Option<V>,
    empty_component: Option<V>,
    scroll_to_index: Option<usize>,
    /// A jump whose offset the host could not reach yet (content not laid out).
    deferred_target: Option<usize>,

    resize_subscription: Option<Subscription>,
    scroll_subscription: Option<Subscription>,
    attach_error: Option<AttachError>,
    mounted: bool,
}

impl<T, V> WindowedList<T, V> {
    pub fn new(props: ListProps<T, V>) -> Self {
        let engine = WindowEngine::new(props.engine_options());
        Self {
            engine,
            items: props.items,
            render_item: props.render_item,
            loading_indicator: props.loading_indicator,
            empty_component: props.empty_component,
            scroll_to_index: props.scroll_to_index,
            deferred_target: None,
            resize_subscription: None,
            scroll_subscription: None,
            attach_error: None,
            mounted: false,
        }
    }

    pub fn engine(&self) -> &WindowEngine {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to install an `on_change` hook.
    pub fn engine_mut(&mut self) -> &mut WindowEngine {
        &mut self.engine
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_observing_resize(&self) -> bool {
        self.resize_subscription.is_some()
    }

    pub fn is_listening_scroll(&self) -> bool {
        self.scroll_subscription.is_some()
    }

    /// The last error raised while attaching to the host, if any.
    pub fn attach_error(&self) -> Option<&AttachError> {
        self.attach_error.as_ref()
    }

    /// Attaches to `host`.
    ///
    /// A failed attachment is not an error for the list: without resize observation the
    /// container stays unmeasured, without scroll listening the offset stays put.
    pub fn mount<H: ScrollHost>(&mut self, host: &mut H) {
        if self.mounted || self.engine.is_unmounted() {
            wwarn!("mount ignored: list is already mounted or was unmounted");
            return;
        }
        self.mounted = true;

        match host.observe_resize() {
            Ok(sub) => self.resize_subscription = Some(sub),
            Err(err) => {
                wwarn!(error = %err, "resize observation unavailable; list stays unmeasured");
                self.attach_error = Some(err);
            }
        }
        match host.listen_scroll() {
            Ok(sub) => self.scroll_subscription = Some(sub),
            Err(err) => {
                wwarn!(error = %err, "scroll listening unavailable");
                self.attach_error = Some(err);
            }
        }
        wdebug!(
            resize = self.resize_subscription.is_some(),
            scroll = self.scroll_subscription.is_some(),
            "WindowedList::mount"
        );

        if let Some(target) = self.scroll_to_index {
            self.navigate(target, host);
        }
    }

    /// Detaches from the host. Both subscriptions are released here, exactly once.
    pub fn unmount(&mut self) {
        if let Some(mut sub) = self.resize_subscription.take() {
            sub.release();
        }
        if let Some(mut sub) = self.scroll_subscription.take() {
            sub.release();
        }
        if self.mounted {
            wdebug!("WindowedList::unmount");
        }
        self.mounted = false;
        self.deferred_target = None;
        self.engine.unmount();
    }

    /// Feeds a host notification into the trackers.
    ///
    /// Events of a kind the list is not subscribed to are ignored.
    pub fn handle_event<H: ScrollHost>(&mut self, host: &H, event: ContainerEvent) {
        if !self.mounted {
            return;
        }
        match event {
            ContainerEvent::Resized { height } => {
                if self.resize_subscription.is_none() {
                    return;
                }
                self.engine.on_resize(height);
            }
            ContainerEvent::Scrolled => {
                if self.scroll_subscription.is_none() {
                    return;
                }
                self.engine.on_scroll(ScrollMetrics {
                    scroll_offset: host.scroll_top(),
                    scroll_extent: host.scroll_height(),
                    container_height: host.client_height(),
                });
            }
        }
    }

    /// Requests a jump to `target`.
    ///
    /// Out-of-range targets are ignored. Repeating the current target does nothing.
    pub fn scroll_to_index<H: ScrollHost>(&mut self, target: Option<usize>, host: &mut H) {
        if self.scroll_to_index == target {
            return;
        }
        self.scroll_to_index = target;
        match target {
            Some(target) if self.mounted => self.navigate(target, host),
            Some(_) => {}
            None => {
                self.deferred_target = None;
                self.engine.clear_scroll_target();
            }
        }
    }

    /// Signals that the host has laid out the latest frame.
    ///
    /// A jump requested before the content covered its offset is dispatched here.
    pub fn on_layout<H: ScrollHost>(&mut self, host: &mut H) {
        if !self.mounted {
            return;
        }
        if let Some(target) = self.deferred_target {
            self.navigate(target, host);
        }
    }

    pub fn has_deferred_scroll(&self) -> bool {
        self.deferred_target.is_some()
    }

    fn navigate<H: ScrollHost>(&mut self, target: usize, host: &mut H) {
        self.deferred_target = None;
        let reachable = match self.engine.scroll_to_index_offset(target) {
            Some(offset) => offset == 0 || host.scroll_height() > offset,
            None => true,
        };
        if !reachable {
            // The host would clamp the write and the engine would still record the target.
            wdebug!(
                index = target,
                scroll_height = host.scroll_height(),
                "scroll_to_index deferred until content is laid out"
            );
            self.deferred_target = Some(target);
            return;
        }
        if let Some(offset) = self.engine.scroll_to_index(target) {
            host.set_scroll_top(offset);
        }
    }

    /// Applies a new set of props.
    ///
    /// `item_height` is fixed at construction; remount to change it.
    pub fn set_props<H: ScrollHost>(&mut self, props: ListProps<T, V>, host: &mut H) {
        let mut options = props.engine_options();
        options.on_change = self.engine.options().on_change.clone();
        self.items = props.items;
        self.render_item = props.render_item;
        self.loading_indicator = props.loading_indicator;
        self.empty_component = props.empty_component;
        self.engine.set_options(options);
        self.scroll_to_index(props.scroll_to_index, host);
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.engine.set_item_count(self.items.len());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.engine.set_loading(loading);
    }

    pub fn total_height(&self) -> u64 {
        self.engine.total_extent()
    }
}

impl<T, V: Clone> WindowedList<T, V> {
    pub fn render(&self) -> ListFrame<V> {
        let mut frame = ListFrame::default();
        self.render_into(&mut frame);
        frame
    }

    /// Renders into `frame`, reusing its row buffer.
    pub fn render_into(&self, frame: &mut ListFrame<V>) {
        frame.total_height = self.engine.total_extent();
        frame.rows.clear();
        frame.empty = None;
        frame.loading_indicator = None;

        let loading = self.engine.is_loading();
        if self.items.is_empty() && !loading {
            frame.empty = self.empty_component.clone();
            return;
        }

        debug_assert_eq!(self.items.len(), self.engine.item_count());
        self.engine.for_each_row(|row| {
            let Some(item) = self.items.get(row.index) else {
                return;
            };
            frame.rows.push(RenderedRow {
                row,
                content: (self.render_item)(item, row.index),
            });
        });

        if loading {
            frame.loading_indicator = self.loading_indicator.clone();
        }
    }
}

impl<T, V> Drop for WindowedList<T, V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T, V> fmt::Debug for WindowedList<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedList")
            .field("engine", &self.engine)
            .field("items", &self.items.len())
            .field("scroll_to_index", &self.scroll_to_index)
            .field("deferred_target", &self.deferred_target)
            .field("resize_subscription", &self.resize_subscription)
            .field("scroll_subscription", &self.scroll_subscription)
            .field("attach_error", &self.attach_error)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
