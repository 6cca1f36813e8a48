//! Starfield animation state.

use stardrift_core::{Point, Tuning, Viewport};
use tracing::debug;

use crate::animations::nebula;
use crate::animations::shooting::{self, ShootingStar};
use crate::animations::stars::{self, Star};
use crate::clock::{Clock, SystemClock};
use crate::color::{Rgba, resolve_trail_color};
use crate::random::{RandomSource, ThreadRandom};
use crate::surface::Surface;

/// The animated background: stars, nebula clouds and shooting stars drawn
/// onto a surface it owns.
#[derive(Debug)]
pub struct Starfield<S, C = SystemClock, R = ThreadRandom> {
    /// Drawing target, resized to follow the viewport.
    surface: S,
    /// Time source sampled once per frame.
    clock: C,
    /// Randomness for placement and spawns.
    random: R,
    /// Tuning constants.
    tuning: Tuning,
    /// Star set; regenerated on every resize.
    stars: Vec<Star>,
    /// Live shooting stars; untouched by resizes.
    shooting_stars: Vec<ShootingStar>,
    /// Latest pointer position, `None` until the pointer first moves.
    pointer: Option<Point>,
    /// Latest vertical scroll offset.
    scroll_y: f32,
    /// Color of shooting star trails.
    trail_color: Rgba,
    /// Frames drawn so far.
    frames: u64,
}

impl<S: Surface, C: Clock, R: RandomSource> Starfield<S, C, R> {
    /// Create a starfield sized to `viewport`.
    pub fn new(
        surface: S,
        clock: C,
        random: R,
        tuning: Tuning,
        accent: Option<&str>,
        viewport: Viewport,
    ) -> Self {
        let mut starfield = Self {
            surface,
            clock,
            random,
            tuning,
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            pointer: None,
            scroll_y: 0.0,
            trail_color: resolve_trail_color(accent),
            frames: 0,
        };
        starfield.resize(viewport);
        starfield
    }

    /// Resize the surface and regenerate every star.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.stars = stars::init_stars(viewport, self.tuning.star_count, &mut self.random);
        debug!(
            width = viewport.width,
            height = viewport.height,
            stars = self.stars.len(),
            "regenerated starfield"
        );
    }

    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = Some(pointer);
    }

    pub fn set_scroll(&mut self, offset_y: f32) {
        self.scroll_y = offset_y;
    }

    /// Draw one frame.
    pub fn draw_frame(&mut self) {
        let now = self.clock.now_ms();
        let viewport = self.surface.viewport();

        self.surface.clear();
        nebula::draw(&mut self.surface, now, self.pointer, &self.tuning);
        stars::draw(
            &mut self.stars,
            &mut self.surface,
            now,
            self.scroll_y,
            self.pointer,
            &self.tuning,
        );

        shooting::maybe_spawn(
            &mut self.shooting_stars,
            viewport,
            &mut self.random,
            &self.tuning,
        );
        shooting::update(&mut self.shooting_stars, &self.tuning);
        shooting::draw(
            &self.shooting_stars,
            &mut self.surface,
            self.trail_color,
            &self.tuning,
        );

        self.frames += 1;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn trail_color(&self) -> Rgba {
        self.trail_color
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub(crate) fn shooting_stars_mut(&mut self) -> &mut Vec<ShootingStar> {
        &mut self.shooting_stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::TRAIL_FALLBACK;
    use crate::random::SeededRandom;
    use crate::testing::{DrawOp, ManualClock, RecordingSurface, ScriptedRandom};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn starfield<R: RandomSource>(
        random: R,
    ) -> (Starfield<RecordingSurface, ManualClock, R>, RecordingSurface) {
        let surface = RecordingSurface::new(VIEWPORT);
        let field = Starfield::new(
            surface.clone(),
            ManualClock::default(),
            random,
            Tuning::default(),
            None,
            VIEWPORT,
        );
        (field, surface)
    }

    #[test]
    fn test_star_count_after_init_and_resize() {
        let (mut field, _) = starfield(SeededRandom::new(1));
        assert_eq!(field.stars().len(), Tuning::default().star_count);

        let before = field.stars().to_vec();
        field.resize(Viewport::new(1920.0, 1080.0));
        assert_eq!(field.stars().len(), Tuning::default().star_count);
        assert_ne!(field.stars(), before.as_slice());

        field.resize(Viewport::new(320.0, 200.0));
        assert_eq!(field.stars().len(), Tuning::default().star_count);
        assert!(field.stars().iter().all(|s| s.x < 320.0 && s.y < 200.0));
    }

    #[test]
    fn test_resize_keeps_shooting_stars() {
        let (mut field, _) = starfield(SeededRandom::new(1));
        field.shooting_stars_mut().push(ShootingStar {
            x: 10.0,
            y: 10.0,
            length: 100.0,
            speed: 12.0,
            angle: 0.8,
            opacity: 0.5,
        });
        field.resize(Viewport::new(100.0, 100.0));
        assert_eq!(field.shooting_stars().len(), 1);
    }

    #[test]
    fn test_frame_draw_order() {
        // Rolls of 0.5 never spawn a shooting star.
        let (mut field, surface) = starfield(ScriptedRandom::new(vec![0.5]));
        surface.take_ops();
        field.draw_frame();

        let ops = surface.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        let gradients = ops.iter().filter(|op| matches!(op, DrawOp::Gradient(_))).count();
        let circles = ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count();
        assert_eq!(gradients, Tuning::default().nebula_count);
        assert_eq!(circles, Tuning::default().star_count);
        assert!(matches!(ops[1], DrawOp::Gradient(_)));
        assert!(matches!(ops.last(), Some(DrawOp::Circle { .. })));
        assert_eq!(field.frames(), 1);
    }

    #[test]
    fn test_brightness_bound_over_time() {
        let clock = ManualClock::default();
        let surface = RecordingSurface::new(VIEWPORT);
        let mut field = Starfield::new(
            surface.clone(),
            clock.clone(),
            SeededRandom::new(9),
            Tuning::default(),
            None,
            VIEWPORT,
        );
        field.set_pointer(Point::new(400.0, 300.0));

        for step in 0..120 {
            clock.set(step as f64 * 16.7);
            field.draw_frame();
            for star in field.stars() {
                assert!(star.brightness <= star.initial_brightness);
            }
            for op in surface.take_ops() {
                if let DrawOp::Circle { color, .. } = op {
                    assert!(color.a <= 1.0);
                }
            }
        }
    }

    #[test]
    fn test_parallax_without_pointer() {
        let (mut field, surface) = starfield(ScriptedRandom::new(vec![0.5]));
        field.set_scroll(200.0);
        surface.take_ops();
        field.draw_frame();

        let tuning = Tuning::default();
        let centers: Vec<Point> = surface
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, .. } => Some(center),
                _ => None,
            })
            .collect();
        for (star, center) in field.stars().iter().zip(centers) {
            assert_eq!(center.x, star.x);
            assert_eq!(center.y, star.y - 200.0 * star.z * tuning.scroll_parallax);
        }
    }

    #[test]
    fn test_spawned_stars_never_exceed_cap() {
        // Every roll spawns.
        let (mut field, _) = starfield(ScriptedRandom::new(vec![0.0]));
        for _ in 0..100 {
            field.draw_frame();
            assert!(field.shooting_stars().len() <= Tuning::default().max_shooting_stars);
            assert!(field.shooting_stars().iter().all(|s| s.opacity > 0.0));
        }
    }

    #[test]
    fn test_shooting_star_trail_is_drawn() {
        let (mut field, surface) = starfield(ScriptedRandom::new(vec![0.0]));
        surface.take_ops();
        field.draw_frame();
        let line = surface
            .ops()
            .into_iter()
            .find_map(|op| match op {
                DrawOp::Line(line) => Some(line),
                _ => None,
            })
            .expect("a trail is stroked");
        let tuning = Tuning::default();
        let opacity = 1.0 - tuning.shooting_fade_step;
        assert!((line.start.a - opacity * tuning.trail_opacity).abs() < 1e-6);
        assert_eq!(line.end.a, 0.0);
        assert_eq!(line.width, tuning.trail_width);
    }

    #[test]
    fn test_accent_sets_trail_color() {
        let field = Starfield::new(
            RecordingSurface::new(VIEWPORT),
            ManualClock::default(),
            SeededRandom::new(1),
            Tuning::default(),
            Some("120 100% 50%"),
            VIEWPORT,
        );
        assert_ne!(field.trail_color(), TRAIL_FALLBACK);

        let fallback = Starfield::new(
            RecordingSurface::new(VIEWPORT),
            ManualClock::default(),
            SeededRandom::new(1),
            Tuning::default(),
            Some("--primary"),
            VIEWPORT,
        );
        assert_eq!(fallback.trail_color(), TRAIL_FALLBACK);
    }
}
