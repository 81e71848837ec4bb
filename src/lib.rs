#![no_std]

extern crate alloc;

pub mod color;
pub mod config;
pub mod container;
pub mod driver;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod frame_scheduler;
#[cfg(feature = "esp32-log")]
pub mod logging;
pub mod mailbox;
pub mod scheduler;
pub mod storage;
pub mod topology;

pub use config::{ConfigSource, DeviceConfig, DriverConfig, FrameConfig};
pub use container::{EffectFile, EffectInfo, EffectStore};
pub use driver::{ChannelConfig, StripDriver, Transmitter, WaitOutcome};
pub use effect::{Canvas, Effect, EffectId, EffectSlot, RenderTick};
pub use encoder::{EncodeState, Encoder, PulseCode, PulseTiming, Ws2812Encoder};
pub use error::{Error, ErrorKind, Result};
pub use frame_scheduler::{FrameResult, RenderLoop};
pub use mailbox::EffectMailbox;
pub use scheduler::{Scheduler, SchedulerState};
pub use storage::{MemoryStorage, Storage};
pub use topology::{Strip, Topology};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Pixel sink addressed by physical LED index
///
/// Implemented by the strip driver and by plain color slices, so effects
/// can be rendered into memory without hardware.
pub trait PixelWrite {
    /// Set one pixel; out-of-range indices are ignored
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Number of addressable pixels
    fn pixel_count(&self) -> usize;
}

impl PixelWrite for [Rgb] {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.get_mut(index) {
            *pixel = color;
        }
    }

    fn pixel_count(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> PixelWrite for [Rgb; N] {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.as_mut_slice().set_pixel(index, color);
    }

    fn pixel_count(&self) -> usize {
        N
    }
}
