//! Mounting a starfield into a host shell.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use stardrift_core::Tuning;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::host::{EventKind, EventSource, FrameHandle, FrameScheduler, HostEvent, ListenerId};
use crate::random::RandomSource;
use crate::state::Starfield;
use crate::surface::Surface;

/// Settings applied when mounting.
#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    pub tuning: Tuning,
    /// Accent color for shooting star trails.
    pub accent: Option<String>,
}

/// A starfield attached to a host.
///
/// Holds the listener ids and frame handle registered at mount. Call
/// [`MountedStarfield::unmount`] to detach; until then the host keeps
/// driving the animation.
#[derive(Debug)]
pub struct MountedStarfield<S, C, R> {
    state: Option<Rc<RefCell<Starfield<S, C, R>>>>,
    listeners: Vec<ListenerId>,
    frame: Option<FrameHandle>,
}

impl<S, C, R> MountedStarfield<S, C, R>
where
    S: Surface + 'static,
    C: Clock + 'static,
    R: RandomSource + 'static,
{
    /// Mount onto `host`, sizing to its current viewport.
    ///
    /// With no surface nothing is registered and nothing is drawn.
    pub fn mount<H>(
        host: &mut H,
        surface: Option<S>,
        clock: C,
        random: R,
        options: MountOptions,
    ) -> Self
    where
        H: EventSource + FrameScheduler,
    {
        let Some(surface) = surface else {
            debug!("no drawing surface, starfield disabled");
            return Self {
                state: None,
                listeners: Vec::new(),
                frame: None,
            };
        };

        let viewport = host.viewport();
        let state = Rc::new(RefCell::new(Starfield::new(
            surface,
            clock,
            random,
            options.tuning,
            options.accent.as_deref(),
            viewport,
        )));

        let on_resize = state.clone();
        let on_pointer = state.clone();
        let on_scroll = state.clone();
        let listeners = vec![
            host.add_listener(
                EventKind::Resize,
                Box::new(move |event| {
                    if let HostEvent::Resize(viewport) = event {
                        on_resize.borrow_mut().resize(*viewport);
                    }
                }),
            ),
            host.add_listener(
                EventKind::PointerMove,
                Box::new(move |event| {
                    if let HostEvent::PointerMove(point) = event {
                        on_pointer.borrow_mut().set_pointer(*point);
                    }
                }),
            ),
            host.add_listener(
                EventKind::Scroll,
                Box::new(move |event| {
                    if let HostEvent::Scroll { offset_y } = event {
                        on_scroll.borrow_mut().set_scroll(*offset_y);
                    }
                }),
            ),
        ];

        let on_frame = state.clone();
        let frame = host.request_frames(Box::new(move || on_frame.borrow_mut().draw_frame()));

        info!(
            width = viewport.width,
            height = viewport.height,
            "starfield mounted"
        );
        Self {
            state: Some(state),
            listeners,
            frame: Some(frame),
        }
    }

    /// Cancel the frame loop and remove every listener.
    pub fn unmount<H>(mut self, host: &mut H)
    where
        H: EventSource + FrameScheduler,
    {
        if let Some(frame) = self.frame.take() {
            host.cancel_frames(frame);
        }
        for id in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        if let Some(state) = &self.state {
            info!(frames = state.borrow().frames(), "starfield unmounted");
        }
    }

    /// True if a surface was available and the animation is running.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Borrow the starfield, if one was mounted.
    pub fn starfield(&self) -> Option<Ref<'_, Starfield<S, C, R>>> {
        self.state.as_ref().map(|state| state.borrow())
    }

    /// Borrow the drawing surface, if one was mounted.
    pub fn surface(&self) -> Option<Ref<'_, S>> {
        self.starfield().map(|field| Ref::map(field, |field| field.surface()))
    }
}
