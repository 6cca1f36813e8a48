//! Core types shared across the stardrift crates.

use serde::{Deserialize, Serialize};

/// A position in canvas pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Size of the drawing area in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension has no area to draw into.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Center of the viewport.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Offset of `point` from the viewport center, scaled to -1.0..=1.0 on
    /// each axis for points inside the viewport.
    pub fn normalized_offset(&self, point: Point) -> Point {
        let half_w = (self.width / 2.0).max(f32::EPSILON);
        let half_h = (self.height / 2.0).max(f32::EPSILON);
        Point::new((point.x - half_w) / half_w, (point.y - half_h) / half_h)
    }
}

/// Tuning constants for the starfield.
///
/// Distances are in canvas pixels and per-frame quantities assume one update
/// per displayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Number of stars generated on every (re)initialization.
    pub star_count: usize,
    /// Number of nebula blobs drawn each frame.
    pub nebula_count: usize,
    /// Vertical scroll parallax damping (`k` in `y - scroll * z * k`).
    pub scroll_parallax: f32,
    /// Maximum pointer-driven star displacement for a star at depth 1.0.
    pub pointer_parallax: f32,
    /// Maximum pointer-driven displacement of the front nebula blob.
    pub nebula_pointer_displacement: f32,
    /// Radius around the pointer inside which stars glow.
    pub glow_radius: f32,
    /// Brightness added at the glow center.
    pub glow_brightness_boost: f32,
    /// Base size added at the glow center.
    pub glow_size_boost: f32,
    /// Per-frame probability of spawning a shooting star.
    pub shooting_spawn_chance: f32,
    /// Maximum number of shooting stars alive at once.
    pub max_shooting_stars: usize,
    /// Opacity lost by a shooting star each frame.
    pub shooting_fade_step: f32,
    /// Stroke width of shooting star trails.
    pub trail_width: f32,
    /// Opacity multiplier at the head of a trail.
    pub trail_opacity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            star_count: 100,
            nebula_count: 3,
            scroll_parallax: 0.3,
            pointer_parallax: 25.0,
            nebula_pointer_displacement: 10.0,
            glow_radius: 180.0,
            glow_brightness_boost: 0.6,
            glow_size_boost: 1.5,
            shooting_spawn_chance: 0.002,
            max_shooting_stars: 4,
            shooting_fade_step: 0.006,
            trail_width: 2.5,
            trail_opacity: 0.8,
        }
    }
}

impl Tuning {
    /// Upper bound on stars so a typo in a config file can't stall a frame.
    pub const MAX_STARS: usize = 10_000;
    /// Nebula blobs beyond this would push the front layer's pointer weight negative.
    pub const MAX_NEBULA_CLOUDS: usize = 10;

    /// Clamp every field into a range the renderer can draw with.
    pub fn sanitized(self) -> Self {
        let non_negative = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        Self {
            star_count: self.star_count.min(Self::MAX_STARS),
            nebula_count: self.nebula_count.min(Self::MAX_NEBULA_CLOUDS),
            scroll_parallax: non_negative(self.scroll_parallax),
            pointer_parallax: non_negative(self.pointer_parallax),
            nebula_pointer_displacement: non_negative(self.nebula_pointer_displacement),
            glow_radius: non_negative(self.glow_radius),
            glow_brightness_boost: unit(self.glow_brightness_boost),
            glow_size_boost: non_negative(self.glow_size_boost),
            shooting_spawn_chance: unit(self.shooting_spawn_chance),
            max_shooting_stars: self.max_shooting_stars,
            // A zero step would keep shooting stars alive forever.
            shooting_fade_step: if self.shooting_fade_step.is_finite()
                && self.shooting_fade_step > 0.0
            {
                self.shooting_fade_step.min(1.0)
            } else {
                Self::default().shooting_fade_step
            },
            trail_width: non_negative(self.trail_width),
            trail_opacity: unit(self.trail_opacity),
        }
    }
}
