//! Software raster surface presented through ratatui half-block cells.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use stardrift_core::{Point, Viewport};
use thiserror::Error;

use crate::color::Rgba;
use crate::surface::{GradientLine, LineCap, RadialGradient, Surface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Errors acquiring a drawing surface.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("viewport {width}x{height} has no drawable area")]
    EmptyViewport { width: f32, height: f32 },
    #[error("pixel size must be positive, got {0}")]
    InvalidPixelSize(f32),
}

/// RGB raster where each stored pixel covers a square block of canvas pixels.
///
/// Pixels composite source-over onto black. The canvas is drawn into a
/// terminal buffer with two stored pixels per cell, stacked vertically.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    /// Canvas pixels covered by one stored pixel along each axis.
    pixel_size: f32,
    /// Logical size in canvas pixels.
    viewport: Viewport,
    /// Stored pixel columns.
    columns: usize,
    /// Stored pixel rows.
    rows: usize,
    /// Row-major pixels, alpha unused.
    pixels: Vec<Rgba>,
}

impl PixelCanvas {
    /// Acquire a canvas for `viewport`, failing if there is nothing to draw on.
    pub fn acquire(viewport: Viewport, pixel_size: f32) -> Result<Self, SurfaceError> {
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(SurfaceError::InvalidPixelSize(pixel_size));
        }
        if viewport.is_empty() {
            return Err(SurfaceError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut canvas = Self {
            pixel_size,
            viewport: Viewport::default(),
            columns: 0,
            rows: 0,
            pixels: Vec::new(),
        };
        canvas.resize(viewport);
        Ok(canvas)
    }

    /// Stored pixel dimensions as (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Stored pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.pixels.get(y * self.columns + x).copied()
    }

    /// Canvas-space center of the stored pixel at (`x`, `y`).
    fn pixel_center(&self, x: usize, y: usize) -> Point {
        Point::new(
            (x as f32 + 0.5) * self.pixel_size,
            (y as f32 + 0.5) * self.pixel_size,
        )
    }

    /// Stored pixel ranges overlapping a canvas-space box, clipped to the canvas.
    fn covered(
        &self,
        min: Point,
        max: Point,
    ) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        if max.x < 0.0 || max.y < 0.0 || !min.x.is_finite() || !min.y.is_finite() {
            return None;
        }
        let x0 = (min.x / self.pixel_size).floor().max(0.0) as usize;
        let y0 = (min.y / self.pixel_size).floor().max(0.0) as usize;
        let x1 = ((max.x / self.pixel_size).floor() as usize)
            .saturating_add(1)
            .min(self.columns);
        let y1 = ((max.y / self.pixel_size).floor() as usize)
            .saturating_add(1)
            .min(self.rows);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0..x1, y0..y1))
    }

    /// Composite `color` over the stored pixel.
    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        let idx = y * self.columns + x;
        if let Some(dst) = self.pixels.get_mut(idx) {
            let a = color.a.clamp(0.0, 1.0);
            dst.r = dst.r * (1.0 - a) + color.r * a;
            dst.g = dst.g * (1.0 - a) + color.g * a;
            dst.b = dst.b * (1.0 - a) + color.b * a;
        }
    }

    /// Fraction of a stored pixel covered by a shape of `area` canvas pixels².
    fn coverage(&self, area: f32) -> f32 {
        (area / (self.pixel_size * self.pixel_size)).clamp(0.0, 1.0)
    }
}

impl Surface for PixelCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.columns = (viewport.width.max(0.0) / self.pixel_size).ceil() as usize;
        self.rows = (viewport.height.max(0.0) / self.pixel_size).ceil() as usize;
        self.pixels = vec![Rgba::BLACK; self.columns * self.rows];
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::BLACK);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let r = gradient.outer_radius;
        if r <= 0.0 {
            return;
        }
        let c = gradient.center;
        let Some((xs, ys)) = self.covered(Point::new(c.x - r, c.y - r), Point::new(c.x + r, c.y + r))
        else {
            return;
        };

        for y in ys {
            for x in xs.clone() {
                let distance = self.pixel_center(x, y).distance(c);
                if distance <= r {
                    let color = gradient.color_at(distance);
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        // Anything smaller than a stored pixel still reaches the nearest centers.
        let reach = radius.max(self.pixel_size / 2.0 * std::f32::consts::SQRT_2);
        let Some((xs, ys)) = self.covered(
            Point::new(center.x - reach, center.y - reach),
            Point::new(center.x + reach, center.y + reach),
        ) else {
            return;
        };

        let color = color.with_alpha(color.a * self.coverage(std::f32::consts::PI * radius * radius));
        for y in ys {
            for x in xs.clone() {
                if self.pixel_center(x, y).distance(center) <= reach {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, line: &GradientLine) {
        if line.width <= 0.0 {
            return;
        }
        let half_width = (line.width / 2.0).max(self.pixel_size / 2.0);
        let min = Point::new(
            line.from.x.min(line.to.x) - half_width,
            line.from.y.min(line.to.y) - half_width,
        );
        let max = Point::new(
            line.from.x.max(line.to.x) + half_width,
            line.from.y.max(line.to.y) + half_width,
        );
        let Some((xs, ys)) = self.covered(min, max) else {
            return;
        };

        let dx = line.to.x - line.from.x;
        let dy = line.to.y - line.from.y;
        let length_sq = dx * dx + dy * dy;
        let thinness = (line.width / self.pixel_size).clamp(0.0, 1.0);

        for y in ys {
            for x in xs.clone() {
                let p = self.pixel_center(x, y);
                let raw_t = if length_sq > f32::EPSILON {
                    ((p.x - line.from.x) * dx + (p.y - line.from.y) * dy) / length_sq
                } else {
                    0.0
                };
                if line.cap == LineCap::Butt && !(0.0..=1.0).contains(&raw_t) {
                    continue;
                }
                let t = raw_t.clamp(0.0, 1.0);
                let nearest = Point::new(line.from.x + dx * t, line.from.y + dy * t);
                if p.distance(nearest) <= half_width {
                    let color = line.start.lerp(line.end, t);
                    self.blend(x, y, color.with_alpha(color.a * thinness));
                }
            }
        }
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as usize;
                let top = self.pixel(x, row as usize * 2).unwrap_or(Rgba::BLACK);
                let bottom = self.pixel(x, row as usize * 2 + 1).unwrap_or(Rgba::BLACK);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}
