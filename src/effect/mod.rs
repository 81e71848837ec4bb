//! Effect system
//!
//! An effect paints logical LEDs through a [`Canvas`] on every scheduler
//! tick. Built-in effects are collected in the [`EffectSlot`] enum so the
//! scheduler can hold any of them without boxing; custom effects only
//! need to implement [`Effect`].

mod breathe;
mod playback;
mod rainbow;
mod static_color;

use embassy_time::{Duration, Instant};

pub use breathe::BreatheEffect;
pub use playback::PlaybackEffect;
pub use rainbow::RainbowEffect;
pub use static_color::StaticColorEffect;

use crate::{PixelWrite, color::Rgb, topology::Topology};

const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_RAINBOW: &str = "rainbow";

const EFFECT_ID_STATIC: u8 = 0;
const EFFECT_ID_BREATHE: u8 = 1;
const EFFECT_ID_RAINBOW: u8 = 2;

/// Time information handed to an effect on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTick {
    pub now: Instant,
    /// Time since the previous tick, zero on the first one
    pub delta: Duration,
    pub brightness: u8,
}

/// Logical view of the pixel buffer
///
/// Writes go through the topology, so effects never deal with wiring
/// direction. On an empty topology every write is dropped.
pub struct Canvas<'a> {
    topology: &'a Topology,
    pixels: &'a mut dyn PixelWrite,
}

impl<'a> Canvas<'a> {
    pub fn new(topology: &'a Topology, pixels: &'a mut dyn PixelWrite) -> Self {
        Self { topology, pixels }
    }

    /// Number of logical LEDs
    pub fn len(&self) -> usize {
        self.topology.total_leds()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set one logical LED
    pub fn set(&mut self, logical: usize, color: Rgb) {
        if self.is_empty() {
            return;
        }
        self.pixels.set_pixel(self.topology.map(logical), color);
    }

    /// Set every logical LED to one color
    pub fn fill(&mut self, color: Rgb) {
        for logical in 0..self.len() {
            self.set(logical, color);
        }
    }
}

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>);

    /// Reset effect state
    fn reset(&mut self) {}
}

/// Effect slot - enum containing all built-in effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Static(StaticColorEffect),
    Breathe(BreatheEffect),
    Rainbow(RainbowEffect),
    /// Playback of a stored effect container
    Playback(PlaybackEffect),
}

/// Built-in effects that can be requested by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Static = EFFECT_ID_STATIC,
    Breathe = EFFECT_ID_BREATHE,
    Rainbow = EFFECT_ID_RAINBOW,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_STATIC => Self::Static,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            _ => return None,
        })
    }

    pub fn to_slot(self, color: Rgb) -> EffectSlot {
        match self {
            Self::Static => EffectSlot::Static(StaticColorEffect::new(color)),
            Self::Breathe => EffectSlot::Breathe(BreatheEffect::new(color)),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::default()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => EFFECT_NAME_STATIC,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_STATIC => Some(Self::Static),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            _ => None,
        }
    }
}

impl Effect for EffectSlot {
    fn render(&mut self, tick: &RenderTick, canvas: &mut Canvas<'_>) {
        match self {
            Self::Static(effect) => effect.render(tick, canvas),
            Self::Breathe(effect) => effect.render(tick, canvas),
            Self::Rainbow(effect) => effect.render(tick, canvas),
            Self::Playback(effect) => effect.render(tick, canvas),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Static(effect) => effect.reset(),
            Self::Breathe(effect) => effect.reset(),
            Self::Rainbow(effect) => effect.reset(),
            Self::Playback(effect) => effect.reset(),
        }
    }
}

impl From<PlaybackEffect> for EffectSlot {
    fn from(effect: PlaybackEffect) -> Self {
        Self::Playback(effect)
    }
}

impl From<BreatheEffect> for EffectSlot {
    fn from(effect: BreatheEffect) -> Self {
        Self::Breathe(effect)
    }
}
