//! Drifting nebula clouds.

use stardrift_core::{Point, Tuning, Viewport};

use crate::color::Rgba;
use crate::surface::{ColorStop, RadialGradient, Surface};

/// Inner gradient radius as a fraction of the outer radius.
const INNER_RADIUS_RATIO: f32 = 0.03;

/// Compute the gradient for nebula blob `index` at `now_ms`.
pub fn blob(
    index: usize,
    now_ms: f64,
    viewport: Viewport,
    pointer: Option<Point>,
    tuning: &Tuning,
) -> RadialGradient {
    let i = index as f64;
    let layer = i + 1.0;

    let drift_x = ((now_ms * 0.000009 * layer + i * 2.1).sin() * 0.4 + 0.5) as f32;
    let drift_y = ((now_ms * 0.000007 * layer + i * 2.6).cos() * 0.4 + 0.5) as f32;
    let pulse = ((now_ms * 0.000015 * layer + i * 1.2).sin() * 0.35 + 0.45) as f32;

    let mut center = Point::new(drift_x * viewport.width, drift_y * viewport.height);
    let radius = pulse * viewport.width.min(viewport.height);

    if let Some(pointer) = pointer {
        let offset = viewport.normalized_offset(pointer);
        // Farther layers follow the pointer less.
        let weight = tuning.nebula_pointer_displacement * (1.0 - index as f32 * 0.1);
        center.x += offset.x * weight;
        center.y += offset.y * weight;
    }

    let hue = (230.0 + index as f32 * 35.0) % 360.0;
    let tint = |alpha| Rgba::hsla(hue, 0.7, 0.6, alpha);

    RadialGradient {
        center,
        inner_radius: radius * INNER_RADIUS_RATIO,
        outer_radius: radius,
        stops: vec![
            ColorStop::new(0.0, tint(0.08)),
            ColorStop::new(0.5, tint(0.03)),
            ColorStop::new(1.0, tint(0.0)),
        ],
    }
}

/// Draw all nebula blobs.
pub fn draw(surface: &mut impl Surface, now_ms: f64, pointer: Option<Point>, tuning: &Tuning) {
    let viewport = surface.viewport();
    for index in 0..tuning.nebula_count {
        surface.fill_radial_gradient(&blob(index, now_ms, viewport, pointer, tuning));
    }
}
