//! Twinkling parallax stars.

use stardrift_core::{Point, Tuning, Viewport};

use crate::color::Rgba;
use crate::random::RandomSource;
use crate::surface::Surface;

/// A single background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Base x position in canvas pixels.
    pub x: f32,
    /// Base y position in canvas pixels.
    pub y: f32,
    /// Depth in 0.2..1.0; larger is closer, bigger, and moves more.
    pub z: f32,
    /// Base radius before depth scaling.
    pub size: f32,
    /// Brightness from the latest twinkle update.
    pub brightness: f32,
    /// Twinkle ceiling.
    pub initial_brightness: f32,
    /// Twinkle angular speed in radians per millisecond.
    pub twinkle_speed: f32,
    /// Twinkle phase offset in radians.
    pub twinkle_phase: f32,
}

impl Star {
    /// Draw a star uniformly over `viewport`.
    pub fn random(viewport: Viewport, random: &mut impl RandomSource) -> Self {
        let initial_brightness = random.range(0.3, 0.7);
        Self {
            x: random.range(0.0, viewport.width),
            y: random.range(0.0, viewport.height),
            z: random.range(0.2, 0.8),
            size: random.range(2.5, 4.0),
            brightness: initial_brightness,
            initial_brightness,
            twinkle_speed: random.range(0.002, 0.005),
            twinkle_phase: random.range(0.0, std::f32::consts::TAU),
        }
    }

    /// Screen position after scroll and pointer parallax.
    pub fn screen_position(
        &self,
        scroll_y: f32,
        pointer: Option<Point>,
        viewport: Viewport,
        tuning: &Tuning,
    ) -> Point {
        let mut position = Point::new(self.x, self.y - scroll_y * self.z * tuning.scroll_parallax);
        if let Some(pointer) = pointer {
            let offset = viewport.normalized_offset(pointer);
            let displacement = tuning.pointer_parallax * self.z;
            position.x += offset.x * displacement;
            position.y += offset.y * displacement;
        }
        position
    }

    /// Recompute `brightness` for time `now_ms`.
    pub fn twinkle(&mut self, now_ms: f64) {
        let angle = self.twinkle_phase as f64 + now_ms * self.twinkle_speed as f64;
        let wave = (0.5 + 0.5 * angle.sin()) as f32;
        self.brightness = (self.initial_brightness * wave).min(self.initial_brightness);
    }

    /// Hue in degrees; nearer stars lean toward violet.
    pub fn hue(&self) -> f32 {
        220.0 + self.z * 30.0
    }
}

/// Linear glow falloff: 1.0 at the pointer, 0.0 at and beyond `radius`.
pub fn glow_factor(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    1.0 - distance / radius
}

/// Displayed brightness and base size after pointer glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub brightness: f32,
    pub size: f32,
}

impl Glow {
    pub fn apply(star: &Star, factor: f32, tuning: &Tuning) -> Self {
        if factor <= 0.0 {
            return Self {
                brightness: star.brightness,
                size: star.size,
            };
        }
        Self {
            brightness: (star.brightness + factor * tuning.glow_brightness_boost).min(1.0),
            size: star.size + factor * tuning.glow_size_boost,
        }
    }
}

/// Generate a fresh star set for `viewport`.
pub fn init_stars(viewport: Viewport, count: usize, random: &mut impl RandomSource) -> Vec<Star> {
    (0..count).map(|_| Star::random(viewport, &mut *random)).collect()
}

/// Twinkle and draw every star.
pub fn draw(
    stars: &mut [Star],
    surface: &mut impl Surface,
    now_ms: f64,
    scroll_y: f32,
    pointer: Option<Point>,
    tuning: &Tuning,
) {
    let viewport = surface.viewport();
    for star in stars {
        let position = star.screen_position(scroll_y, pointer, viewport, tuning);
        star.twinkle(now_ms);

        let factor = pointer
            .map(|p| glow_factor(position.distance(p), tuning.glow_radius))
            .unwrap_or(0.0);
        let glow = Glow::apply(star, factor, tuning);

        let color = Rgba::hsla(star.hue(), 0.75, 0.85, glow.brightness);
        surface.fill_circle(position, glow.size * star.z, color);
    }
}
