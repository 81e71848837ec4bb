//! Render loop and frame pacing.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::config::FrameConfig;
use crate::driver::{StripDriver, Transmitter};
use crate::effect::{Effect, EffectSlot, RenderTick};
use crate::error::Result;
use crate::mailbox::EffectMailbox;
use crate::scheduler::Scheduler;
use crate::topology::Topology;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// The tick handed to the effect, `None` if nothing was rendered.
    pub rendered: Option<RenderTick>,
}

/// Drives the scheduler and the strip driver once per frame.
///
/// # Usage
///
/// ```ignore
/// let mut render = RenderLoop::new(&topology, driver, FrameConfig::default());
///
/// loop {
///     render.poll(&MAILBOX);
///     let result = render.frame(Instant::from_millis(now_ms()))?;
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct RenderLoop<'t, T: Transmitter, E: Effect = EffectSlot> {
    scheduler: Scheduler<'t, E>,
    driver: StripDriver<T>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'t, T: Transmitter, E: Effect> RenderLoop<'t, T, E> {
    pub fn new(topology: &'t Topology, driver: StripDriver<T>, config: FrameConfig) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.init(topology);
        Self {
            scheduler,
            driver,
            next_frame: Instant::from_millis(0),
            frame_duration: config.frame_duration,
        }
    }

    /// Activate an effect posted from another context
    ///
    /// Returns `true` if the active effect changed.
    pub fn poll(&mut self, mailbox: &EffectMailbox<E>) -> bool {
        match mailbox.take() {
            Some(active) => {
                self.scheduler.activate(active);
                true
            }
            None => false,
        }
    }

    /// Render and show one frame.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Ticks the active effect into the strip buffer
    /// 3. Transmits the buffer if anything was rendered
    /// 4. Returns the deadline for the next frame
    pub fn frame(&mut self, now: Instant) -> Result<FrameResult> {
        // Skip the backlog after long stalls instead of bursting to catch up
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let rendered = self.scheduler.tick(now, &mut self.driver);
        if rendered.is_some() {
            self.driver.show()?;
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            rendered,
        })
    }

    pub fn scheduler(&self) -> &Scheduler<'t, E> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<'t, E> {
        &mut self.scheduler
    }

    pub fn driver(&self) -> &StripDriver<T> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut StripDriver<T> {
        &mut self.driver
    }
}
