use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

/// Handle for one registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Width change delivered to one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeEvent {
    pub listener: ListenerId,
    pub width: u32,
}

/// Hosting element the chart is mounted into.
pub trait ViewportHost {
    fn container_width(&self) -> u32;

    fn subscribe_resize(&mut self) -> ListenerId;

    /// Returns `false` when `id` was not registered.
    fn unsubscribe_resize(&mut self, id: ListenerId) -> bool;

    fn listener_count(&self) -> usize;
}

/// In-memory host for headless rendering and tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewportHost {
    width: u32,
    next_id: u64,
    listeners: IndexSet<ListenerId>,
}

impl HeadlessViewportHost {
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width,
            next_id: 0,
            listeners: IndexSet::new(),
        }
    }

    /// Changes the container width and returns one event per live listener.
    pub fn set_container_width(&mut self, width: u32) -> Vec<ResizeEvent> {
        self.width = width;
        self.listeners
            .iter()
            .map(|listener| ResizeEvent {
                listener: *listener,
                width,
            })
            .collect()
    }

    #[must_use]
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }
}

impl ViewportHost for HeadlessViewportHost {
    fn container_width(&self) -> u32 {
        self.width
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id)
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.resize_listener.is_some()
    }

    /// Adopts the host width and registers the single resize listener.
    ///
    /// Mounting an already mounted engine is a no-op.
    pub fn mount<H: ViewportHost>(&mut self, host: &mut H) -> ChartResult<()> {
        if self.resize_listener.is_some() {
            return Ok(());
        }
        self.resize(host.container_width())?;
        let id = host.subscribe_resize();
        debug!(listener = id.raw(), "chart mounted");
        self.resize_listener = Some(id);
        Ok(())
    }

    /// Releases the resize listener and drops hover state.
    pub fn unmount<H: ViewportHost>(&mut self, host: &mut H) {
        if let Some(id) = self.resize_listener.take() {
            let removed = host.unsubscribe_resize(id);
            debug!(listener = id.raw(), removed, "chart unmounted");
        }
        self.clear_hover();
    }

    /// Applies a host resize notification.
    ///
    /// Events addressed to other (or stale) listeners are ignored and return
    /// `Ok(false)`.
    pub fn handle_resize_event(&mut self, event: ResizeEvent) -> ChartResult<bool> {
        if self.resize_listener != Some(event.listener) {
            return Ok(false);
        }
        self.resize(event.width)?;
        Ok(true)
    }
}
