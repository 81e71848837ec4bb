//! Stored effect playback
//!
//! Steps through the frames of an [`EffectFile`], holding each one for the
//! container's frame delay and wrapping around after the last frame.

use embassy_time::Duration;

use super::{Canvas, Effect, RenderTick};
use crate::color::Rgb;
use crate::container::EffectFile;

#[derive(Debug, Clone)]
pub struct PlaybackEffect {
    clip: EffectFile,
    frame: u16,
    /// Time spent on the current frame
    elapsed: Duration,
    looping: bool,
}

impl PlaybackEffect {
    pub fn new(clip: EffectFile) -> Self {
        Self {
            clip,
            frame: 0,
            elapsed: Duration::from_millis(0),
            looping: true,
        }
    }

    /// Stop on the last frame instead of wrapping around
    #[must_use]
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    pub fn clip(&self) -> &EffectFile {
        &self.clip
    }

    /// Index of the frame painted on the last render
    pub fn current_frame(&self) -> u16 {
        self.frame
    }

    fn advance(&mut self, delta: Duration) {
        let count = self.clip.frame_count();
        if count == 0 {
            return;
        }

        let delay = Duration::from_millis(u64::from(self.clip.info().frame_delay_ms));
        if delay.as_ticks() == 0 {
            self.step(1, count);
            return;
        }

        let elapsed = self.elapsed.as_ticks().saturating_add(delta.as_ticks());
        let steps = elapsed / delay.as_ticks();
        self.elapsed = Duration::from_ticks(elapsed % delay.as_ticks());
        if steps > 0 && !self.step(steps, count) {
            self.elapsed = Duration::from_millis(0);
        }
    }

    /// Move `steps` frames ahead; `false` once a non-looping clip has ended
    #[allow(clippy::cast_possible_truncation)]
    fn step(&mut self, steps: u64, count: u16) -> bool {
        let count_wide = u64::from(count);
        if self.looping {
            // Remainder of a division by a u16 fits in u16
            self.frame = ((u64::from(self.frame) + steps % count_wide) % count_wide) as u16;
            return true;
        }

        let target = u64::from(self.frame).saturating_add(steps);
        if target < count_wide {
            self.frame = target as u16;
            true
        } else {
            self.frame = count - 1;
            false
        }
    }
}

impl Effect for PlaybackEffect {
    fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>) {
        if tick.delta.as_ticks() > 0 {
            self.advance(tick.delta);
        }

        let Some(frame) = self.clip.frame(self.frame) else {
            return;
        };
        for (logical, rgb) in frame.chunks_exact(3).take(canvas.len()).enumerate() {
            canvas.set(logical, Rgb::new(rgb[0], rgb[1], rgb[2]));
        }
    }

    fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = Duration::from_millis(0);
    }
}
