//! Animated starfield background for stardrift.
//!
//! The [`Starfield`] draws twinkling parallax stars, drifting nebula clouds
//! and occasional shooting stars onto any [`Surface`]. It reacts to the
//! pointer position and the page scroll offset. [`MountedStarfield`] wires it
//! into a host through the [`EventSource`] and [`FrameScheduler`] traits.
//! [`PixelCanvas`] is a software surface that renders into a ratatui buffer.

mod animations;
mod canvas;
mod clock;
mod color;
mod host;
mod mount;
mod random;
mod state;
mod surface;
#[cfg(test)]
mod testing;

pub use animations::shooting::ShootingStar;
pub use animations::stars::{Glow, Star, glow_factor};
pub use canvas::{PixelCanvas, SurfaceError};
pub use clock::{Clock, SystemClock};
pub use color::{Rgba, TRAIL_FALLBACK, hsl_to_rgb, parse_accent, resolve_trail_color};
pub use host::{
    EventKind, EventSource, FrameCallback, FrameHandle, FrameScheduler, HostEvent, Listener,
    ListenerId, Shell,
};
pub use mount::{MountOptions, MountedStarfield};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use state::Starfield;
pub use surface::{ColorStop, GradientLine, LineCap, RadialGradient, Surface, sample_stops};
