use alloc::boxed::Box;
use core::fmt;

/// An event delivered by the host for a mounted list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerEvent {
    /// The container's rendered box changed height.
    Resized { height: u32 },
    /// The container's scroll position changed. Layout values are read back from the host.
    Scrolled,
}

/// Errors raised while attaching to a scroll container.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("scroll container is not attached")]
    Detached,
    #[error("host does not support {0} observation")]
    Unsupported(&'static str),
}

/// A scroll container as seen by a windowed list.
///
/// Implementations wrap the host's scroll element (a DOM node, a GUI scroll area, a terminal
/// pane). Layout reads must be cheap: they are made on every scroll event.
pub trait ScrollHost {
    /// Distance scrolled from the top of the content.
    fn scroll_top(&self) -> u64;

    /// Total scrollable content height.
    fn scroll_height(&self) -> u64;

    /// Rendered height of the container.
    fn client_height(&self) -> u32;

    /// Writes the scroll position. The host reports the resulting change as
    /// [`ContainerEvent::Scrolled`], like any other scroll.
    fn set_scroll_top(&mut self, offset: u64);

    /// Starts delivering [`ContainerEvent::Resized`] until the subscription is released.
    fn observe_resize(&mut self) -> Result<Subscription, AttachError>;

    /// Starts delivering [`ContainerEvent::Scrolled`] until the subscription is released.
    fn listen_scroll(&mut self) -> Result<Subscription, AttachError>;
}

/// A scoped host registration.
///
/// The release hook runs exactly once: on [`Subscription::release`] or on drop, whichever comes
/// first.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
