//! Shooting stars that streak across the upper sky and fade out.

use std::f32::consts::PI;

use stardrift_core::{Point, Tuning, Viewport};
use tracing::trace;

use crate::color::Rgba;
use crate::random::RandomSource;
use crate::surface::{GradientLine, LineCap, Surface};

/// A short-lived streak.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head x position.
    pub x: f32,
    /// Head y position.
    pub y: f32,
    /// Trail length in canvas pixels.
    pub length: f32,
    /// Distance travelled per frame.
    pub speed: f32,
    /// Heading in radians, clockwise from +x.
    pub angle: f32,
    /// Remaining opacity; removed once it reaches zero.
    pub opacity: f32,
}

impl ShootingStar {
    /// Spawn in the upper quarter, heading down and to the right.
    pub fn random(viewport: Viewport, random: &mut impl RandomSource) -> Self {
        Self {
            x: random.range(0.0, viewport.width),
            y: random.range(0.0, viewport.height * 0.25),
            length: random.range(80.0, 120.0),
            speed: random.range(12.0, 12.0),
            angle: PI * 0.25 + random.range(-PI * 0.05, PI * 0.1),
            opacity: 1.0,
        }
    }

    /// Move one frame along the heading and fade by `fade_step`.
    pub fn advance(&mut self, fade_step: f32) {
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
        self.opacity -= fade_step;
    }

    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }

    /// End of the trail behind the head.
    pub fn tail(&self) -> Point {
        Point::new(
            self.x - self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        )
    }
}

/// Roll for a new shooting star; returns true if one was added.
///
/// The random draw is consumed every frame, even when the cap is reached.
pub fn maybe_spawn(
    live: &mut Vec<ShootingStar>,
    viewport: Viewport,
    random: &mut impl RandomSource,
    tuning: &Tuning,
) -> bool {
    let roll = random.next_f32();
    if roll < tuning.shooting_spawn_chance && live.len() < tuning.max_shooting_stars {
        let star = ShootingStar::random(viewport, random);
        trace!(x = star.x, y = star.y, angle = star.angle, "spawned shooting star");
        live.push(star);
        return true;
    }
    false
}

/// Advance every shooting star, dropping spent ones.
pub fn update(live: &mut Vec<ShootingStar>, tuning: &Tuning) {
    live.retain_mut(|star| {
        star.advance(tuning.shooting_fade_step);
        !star.is_spent()
    });
}

/// Stroke the trail of every live shooting star.
pub fn draw(live: &[ShootingStar], surface: &mut impl Surface, trail: Rgba, tuning: &Tuning) {
    for star in live {
        surface.stroke_line(&GradientLine {
            from: Point::new(star.x, star.y),
            to: star.tail(),
            width: tuning.trail_width,
            start: trail.with_alpha(star.opacity * tuning.trail_opacity),
            end: trail.with_alpha(0.0),
            cap: LineCap::Round,
        });
    }
}
