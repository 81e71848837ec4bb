//! Breathing effect
//!
//! Fades a base color up and down with a triangular envelope.

use super::{Canvas, Effect, RenderTick};
use crate::color::{Rgb, scale};

/// Breathing cycles per second when not configured.
const DEFAULT_SPEED: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct BreatheEffect {
    /// Position in the current cycle, `0.0..1.0`
    phase: f32,
    /// Cycles per second
    speed: f32,
    color: Rgb,
}

impl BreatheEffect {
    pub fn new(color: Rgb) -> Self {
        Self {
            phase: 0.0,
            speed: DEFAULT_SPEED,
            color,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = libm::fmodf(phase, 1.0);
        self
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current envelope level, `0.0..=1.0`
    pub fn level(&self) -> f32 {
        if self.phase < 0.5 {
            self.phase * 2.0
        } else {
            (1.0 - self.phase) * 2.0
        }
    }
}

impl Effect for BreatheEffect {
    #[allow(clippy::cast_precision_loss)]
    fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>) {
        let delta_sec = tick.delta.as_millis() as f32 / 1000.0;
        self.phase = libm::fmodf(self.phase + self.speed * delta_sec, 1.0);

        canvas.fill(scale(self.color, self.level()));
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
