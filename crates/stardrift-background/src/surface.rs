//! Drawing surface abstraction used by the starfield renderer.

use stardrift_core::{Point, Viewport};

use crate::color::Rgba;

/// A color at a position along a gradient, offset in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Sample a sorted list of stops at `t`.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if t <= to.offset {
            let span = to.offset - from.offset;
            if span <= f32::EPSILON {
                return to.color;
            }
            return from.color.lerp(to.color, (t - from.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

/// A filled disc shaded by a radial gradient between two concentric circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Color at `distance` from the center.
    pub fn color_at(&self, distance: f32) -> Rgba {
        let span = (self.outer_radius - self.inner_radius).max(f32::EPSILON);
        let t = ((distance - self.inner_radius) / span).clamp(0.0, 1.0);
        sample_stops(&self.stops, t)
    }
}

/// How the ends of a stroked line are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// A straight stroke whose color runs linearly from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientLine {
    pub from: Point,
    pub to: Point,
    pub width: f32,
    pub start: Rgba,
    pub end: Rgba,
    pub cap: LineCap,
}

/// Anything the starfield can draw onto.
pub trait Surface {
    /// Current drawable size.
    fn viewport(&self) -> Viewport;

    /// Resize the backing store, discarding its contents.
    fn resize(&mut self, viewport: Viewport);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Fill the disc of `gradient.outer_radius` with the gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);

    /// Fill a solid circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Stroke a line with a color gradient along its length.
    fn stroke_line(&mut self, line: &GradientLine);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stops() {
        let stops = [
            ColorStop::new(0.0, Rgba::new(1.0, 0.0, 0.0, 0.08)),
            ColorStop::new(0.5, Rgba::new(1.0, 0.0, 0.0, 0.04)),
            ColorStop::new(1.0, Rgba::new(1.0, 0.0, 0.0, 0.0)),
        ];
        assert_eq!(sample_stops(&stops, -1.0).a, 0.08);
        assert_eq!(sample_stops(&stops, 0.5).a, 0.04);
        assert!((sample_stops(&stops, 0.75).a - 0.02).abs() < 1e-6);
        assert_eq!(sample_stops(&stops, 2.0).a, 0.0);
        assert_eq!(sample_stops(&[], 0.5), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_radial_gradient_edges() {
        let gradient = RadialGradient {
            center: Point::new(0.0, 0.0),
            inner_radius: 10.0,
            outer_radius: 110.0,
            stops: vec![
                ColorStop::new(0.0, Rgba::new(0.0, 0.0, 1.0, 1.0)),
                ColorStop::new(1.0, Rgba::new(0.0, 0.0, 1.0, 0.0)),
            ],
        };
        assert_eq!(gradient.color_at(0.0).a, 1.0);
        assert_eq!(gradient.color_at(60.0).a, 0.5);
        assert_eq!(gradient.color_at(500.0).a, 0.0);
    }
}
