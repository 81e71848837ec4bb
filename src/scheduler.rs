//! Effect scheduler.
//!
//! Holds the single active effect and drives it with elapsed time. The
//! scheduler never touches pixels itself; the effect paints through the
//! [`Canvas`] built for each tick.

use embassy_time::{Duration, Instant};
use heapless::String;
use log::debug;

use crate::PixelWrite;
use crate::effect::{Canvas, Effect, EffectSlot, RenderTick};
use crate::error::{InvalidArgumentSnafu, InvalidStateSnafu, Result};
use crate::topology::Topology;

/// Maximum length of an effect name.
pub const EFFECT_NAME_CAPACITY: usize = 32;

pub type EffectName = String<EFFECT_NAME_CAPACITY>;

/// Brightness passed to effects on every tick.
const FULL_BRIGHTNESS: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No topology bound
    Idle,
    /// Topology bound, no effect
    Ready,
    /// Effect active
    Running,
}

/// The effect currently driven by the scheduler
#[derive(Debug, Clone)]
pub struct ActiveEffect<E> {
    pub name: EffectName,
    pub effect: E,
}

/// Convert a name into an [`EffectName`]
pub fn effect_name(name: &str) -> Result<EffectName> {
    let mut value = EffectName::new();
    value.push_str(name).map_err(|()| {
        InvalidArgumentSnafu {
            reason: "effect name too long",
        }
        .build()
    })?;
    Ok(value)
}

pub struct Scheduler<'t, E: Effect = EffectSlot> {
    topology: Option<&'t Topology>,
    active: Option<ActiveEffect<E>>,
    last_tick: Option<Instant>,
}

impl<E: Effect> Default for Scheduler<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, E: Effect> Scheduler<'t, E> {
    pub const fn new() -> Self {
        Self {
            topology: None,
            active: None,
            last_tick: None,
        }
    }

    /// Bind the topology effects render through
    pub fn init(&mut self, topology: &'t Topology) {
        self.topology = Some(topology);
        self.last_tick = None;
    }

    pub fn state(&self) -> SchedulerState {
        match (self.topology, &self.active) {
            (None, _) => SchedulerState::Idle,
            (Some(_), None) => SchedulerState::Ready,
            (Some(_), Some(_)) => SchedulerState::Running,
        }
    }

    /// Replace the active effect
    pub fn set(&mut self, name: &str, effect: E) -> Result<()> {
        if self.topology.is_none() {
            return InvalidStateSnafu {
                reason: "scheduler has no topology",
            }
            .fail();
        }
        let name = effect_name(name)?;
        self.activate(ActiveEffect { name, effect });
        Ok(())
    }

    /// Replace the active effect with an already named one
    pub fn activate(&mut self, active: ActiveEffect<E>) {
        debug!("Switching effect to '{}'", active.name);
        self.active = Some(active);
    }

    pub fn active(&self) -> Option<&ActiveEffect<E>> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveEffect<E>> {
        self.active.as_mut()
    }

    pub fn topology(&self) -> Option<&'t Topology> {
        self.topology
    }

    /// Advance the active effect to `now` and let it paint `pixels`.
    ///
    /// Does nothing unless an effect is running. Returns the tick handed
    /// to the effect.
    pub fn tick(&mut self, now: Instant, pixels: &mut dyn PixelWrite) -> Option<RenderTick> {
        let topology = self.topology?;
        let active = self.active.as_mut()?;

        let delta = self
            .last_tick
            .map_or(Duration::from_millis(0), |last| {
                now.saturating_duration_since(last)
            });
        self.last_tick = Some(now);

        let tick = RenderTick {
            now,
            delta,
            brightness: FULL_BRIGHTNESS,
        };
        let mut canvas = Canvas::new(topology, pixels);
        active.effect.render(&tick, &mut canvas);

        Some(tick)
    }
}
