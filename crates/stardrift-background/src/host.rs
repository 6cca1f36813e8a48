//! The page shell a starfield mounts into: input events and frame ticks.

use stardrift_core::{Point, Viewport};
use tracing::trace;

/// Input delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport changed size.
    Resize(Viewport),
    /// The pointer moved, in canvas pixels.
    PointerMove(Point),
    /// The page scrolled to an absolute vertical offset.
    Scroll { offset_y: f32 },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Resize(_) => EventKind::Resize,
            HostEvent::PointerMove(_) => EventKind::PointerMove,
            HostEvent::Scroll { .. } => EventKind::Scroll,
        }
    }
}

/// Which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    Scroll,
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Identifies a repeating frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub type Listener = Box<dyn FnMut(&HostEvent)>;
pub type FrameCallback = Box<dyn FnMut()>;

/// Source of viewport, pointer and scroll notifications.
pub trait EventSource {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    fn add_listener(&mut self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove a listener; false if it was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// Drives callbacks once per displayed frame until cancelled.
pub trait FrameScheduler {
    fn request_frames(&mut self, callback: FrameCallback) -> FrameHandle;

    /// Stop a callback; false if it was not scheduled.
    fn cancel_frames(&mut self, handle: FrameHandle) -> bool;
}

/// In-memory shell implementing both [`EventSource`] and [`FrameScheduler`].
///
/// Everything runs on the caller's thread: `dispatch` and `run_frame` invoke
/// callbacks synchronously.
pub struct Shell {
    viewport: Viewport,
    scroll_y: f32,
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    frames: Vec<(FrameHandle, FrameCallback)>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("listeners", &self.listeners.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl Shell {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            next_id: 0,
            listeners: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Deliver an event to every listener of its kind.
    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize(viewport) => self.viewport = viewport,
            HostEvent::Scroll { offset_y } => self.scroll_y = offset_y,
            HostEvent::PointerMove(_) => {}
        }

        let kind = event.kind();
        for (_, listener_kind, listener) in &mut self.listeners {
            if *listener_kind == kind {
                listener(&event);
            }
        }
    }

    /// Scroll by `delta` pixels, never above the top of the page.
    pub fn scroll_by(&mut self, delta: f32) {
        let offset_y = (self.scroll_y + delta).max(0.0);
        if offset_y != self.scroll_y {
            self.dispatch(HostEvent::Scroll { offset_y });
        }
    }

    /// Run every scheduled frame callback once.
    pub fn run_frame(&mut self) {
        for (_, callback) in &mut self.frames {
            callback();
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn frame_callback_count(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for Shell {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_listener(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id());
        trace!(?id, ?kind, "listener added");
        self.listeners.push((id, kind, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        trace!(?id, "listener removed");
        self.listeners.len() != before
    }
}

impl FrameScheduler for Shell {
    fn request_frames(&mut self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push((handle, callback));
        handle
    }

    fn cancel_frames(&mut self, handle: FrameHandle) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(h, _)| *h != handle);
        self.frames.len() != before
    }
}
