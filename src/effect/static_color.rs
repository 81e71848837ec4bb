//! Static color fill effect

use super::{Canvas, Effect, RenderTick};
use crate::color::Rgb;

/// Static color effect - fills all LEDs with one color
#[derive(Debug, Clone)]
pub struct StaticColorEffect {
    color: Rgb,
}

impl StaticColorEffect {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

impl Effect for StaticColorEffect {
    fn render(&mut self, _tick: &RenderTick, canvas: &mut Canvas<'_>) {
        canvas.fill(self.color);
    }
}
