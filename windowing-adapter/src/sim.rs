//! A deterministic in-memory scroll container.
//!
//! `SimContainer` behaves like a browser scroll element closely enough to drive a
//! [`WindowedList`] in tests and demos: it clamps the scroll position, only reports scroll
//! events for real position changes, and fires an initial resize notification when observation
//! starts. Live registrations are counted so leaks are observable.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::Cell;
use core::cmp;

use crate::{AttachError, ContainerEvent, ListFrame, ScrollHost, Subscription, WindowedList};

#[derive(Debug)]
pub struct SimContainer {
    client_height: u32,
    content_height: u64,
    scroll_top: u64,
    attached: bool,
    resize_supported: bool,
    pending: VecDeque<ContainerEvent>,
    resize_observers: Rc<Cell<usize>>,
    scroll_listeners: Rc<Cell<usize>>,
}

impl SimContainer {
    /// An attached container with the given rendered height and no content yet.
    pub fn new(client_height: u32) -> Self {
        Self {
            client_height,
            content_height: 0,
            scroll_top: 0,
            attached: true,
            resize_supported: true,
            pending: VecDeque::new(),
            resize_observers: Rc::new(Cell::new(0)),
            scroll_listeners: Rc::new(Cell::new(0)),
        }
    }

    /// A container that is not in the layout tree yet. Resize observation fails with
    /// [`AttachError::Detached`].
    pub fn detached(client_height: u32) -> Self {
        Self {
            attached: false,
            ..Self::new(client_height)
        }
    }

    /// Toggles resize observation support. When off, observation fails with
    /// [`AttachError::Unsupported`].
    pub fn with_resize_support(mut self, supported: bool) -> Self {
        self.resize_supported = supported;
        self
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn resize_observers(&self) -> usize {
        self.resize_observers.get()
    }

    pub fn scroll_listeners(&self) -> usize {
        self.scroll_listeners.get()
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.content_height.saturating_sub(self.client_height as u64)
    }

    /// Changes the rendered height, as a layout change would.
    pub fn resize(&mut self, client_height: u32) {
        if self.client_height == client_height {
            return;
        }
        self.client_height = client_height;
        if self.resize_observers.get() > 0 {
            self.pending.push_back(ContainerEvent::Resized {
                height: client_height,
            });
        }
        self.reclamp();
    }

    /// Sets the scroll content height. Shrinking content pulls the scroll position back.
    pub fn set_content_height(&mut self, content_height: u64) {
        self.content_height = content_height;
        self.reclamp();
    }

    /// Lays out a rendered frame: the content height follows the frame's total height.
    pub fn present<V>(&mut self, frame: &ListFrame<V>) {
        self.set_content_height(frame.total_height);
    }

    /// A user-initiated scroll (wheel, drag, keyboard).
    pub fn user_scroll(&mut self, offset: u64) {
        self.set_scroll_top(offset);
    }

    /// Delivers every queued event to `list`, in order, then reports the settled layout.
    /// Repeats until no events are left. Returns the number delivered.
    pub fn pump<T, V>(&mut self, list: &mut WindowedList<T, V>) -> usize {
        let mut delivered = 0usize;
        loop {
            while let Some(event) = self.pending.pop_front() {
                list.handle_event(&*self, event);
                delivered += 1;
            }
            list.on_layout(self);
            if self.pending.is_empty() {
                return delivered;
            }
        }
    }

    fn reclamp(&mut self) {
        let clamped = cmp::min(self.scroll_top, self.max_scroll_top());
        self.move_to(clamped);
    }

    fn move_to(&mut self, offset: u64) {
        if self.scroll_top == offset {
            return;
        }
        self.scroll_top = offset;
        if self.scroll_listeners.get() > 0 {
            self.pending.push_back(ContainerEvent::Scrolled);
        }
    }
}

fn register(count: &Rc<Cell<usize>>) -> Subscription {
    count.set(count.get() + 1);
    let count = Rc::clone(count);
    Subscription::new(move || {
        debug_assert!(count.get() > 0, "registration released twice");
        count.set(count.get().saturating_sub(1));
    })
}

impl ScrollHost for SimContainer {
    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn scroll_height(&self) -> u64 {
        self.content_height
    }

    fn client_height(&self) -> u32 {
        self.client_height
    }

    fn set_scroll_top(&mut self, offset: u64) {
        let clamped = cmp::min(offset, self.max_scroll_top());
        self.move_to(clamped);
    }

    fn observe_resize(&mut self) -> Result<Subscription, AttachError> {
        if !self.resize_supported {
            return Err(AttachError::Unsupported("resize"));
        }
        if !self.attached {
            return Err(AttachError::Detached);
        }
        let sub = register(&self.resize_observers);
        // Observation reports the current size right away.
        self.pending.push_back(ContainerEvent::Resized {
            height: self.client_height,
        });
        Ok(sub)
    }

    fn listen_scroll(&mut self) -> Result<Subscription, AttachError> {
        Ok(register(&self.scroll_listeners))
    }
}
