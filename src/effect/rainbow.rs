//! Rainbow cycling effect
//!
//! Spreads the hue wheel across the logical LEDs and rotates it over time.

use embassy_time::Duration;

use super::{Canvas, Effect, RenderTick};
use crate::color::{Hsv, hsv2rgb};

const DEFAULT_CYCLE_MS: u64 = 12_000;

#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Duration of one complete rainbow cycle
    cycle_duration: Duration,
    /// Brightness value (0-255)
    value: u8,
    /// Saturation (0-255)
    saturation: u8,
    /// Rotate against the logical direction
    inverse: bool,
}

impl Default for RainbowEffect {
    fn default() -> Self {
        Self {
            cycle_duration: Duration::from_millis(DEFAULT_CYCLE_MS),
            value: 255,
            saturation: 255,
            inverse: false,
        }
    }
}

impl RainbowEffect {
    /// Set the cycle duration
    #[must_use]
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    /// Set the brightness value
    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// Set the saturation
    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    #[must_use]
    pub fn with_inverse(mut self) -> Self {
        self.inverse = true;
        self
    }
}

impl Effect for RainbowEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>) {
        let count = canvas.len();
        if count == 0 {
            return;
        }

        let cycle_ms = self.cycle_duration.as_millis().max(1);
        let progress_ms = tick.now.as_millis() % cycle_ms;
        let base_hue = ((progress_ms * 255) / cycle_ms) as u8;

        for logical in 0..count {
            let offset = ((logical * 255) / count) as u8;
            let hue = if self.inverse {
                base_hue.wrapping_sub(offset)
            } else {
                base_hue.wrapping_add(offset)
            };
            let color = hsv2rgb(Hsv {
                hue,
                sat: self.saturation,
                val: self.value,
            });
            canvas.set(logical, color);
        }
    }
}
