//! Deterministic stand-ins for unit tests.

use std::cell::Cell;
use std::rc::Rc;

use stardrift_core::{Point, Viewport};

use crate::clock::Clock;
use crate::color::Rgba;
use crate::random::RandomSource;
use crate::surface::{GradientLine, RadialGradient, Surface};

/// Replays a fixed list of values forever.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty());
        Self { values, next: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Clock advanced by hand; clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Resize(Viewport),
    Clear,
    Gradient(RadialGradient),
    Circle { center: Point, radius: f32, color: Rgba },
    Line(GradientLine),
}

/// Surface that records calls instead of rasterizing. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    ops: Rc<std::cell::RefCell<Vec<DrawOp>>>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ops: Rc::default(),
        }
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    pub fn take_ops(&self) -> Vec<DrawOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    pub fn clears(&self) -> usize {
        self.ops.borrow().iter().filter(|op| **op == DrawOp::Clear).count()
    }

    fn push(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.push(DrawOp::Resize(viewport));
    }

    fn clear(&mut self) {
        self.push(DrawOp::Clear);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.push(DrawOp::Gradient(gradient.clone()));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, line: &GradientLine) {
        self.push(DrawOp::Line(*line));
    }
}
