//! WS2812 strip driver.
//!
//! Owns the wire-order pixel buffer and pushes it through a
//! [`Ws2812Encoder`] to a pulse-train peripheral. Pixels are stored in
//! the green-red-blue order the LEDs expect while the public API takes
//! red-green-blue colors.

use alloc::vec::Vec;

use embassy_time::Duration;
use log::{error, info, warn};
use smart_leds::SmartLedsWrite;
use snafu::prelude::*;

use crate::PixelWrite;
use crate::color::Rgb;
use crate::config::DriverConfig;
use crate::encoder::{Encoder, Ws2812Encoder};
use crate::error::{
    Error, InvalidArgumentSnafu, InvalidStateSnafu, IoSnafu, ResourceExhaustedSnafu, Result,
    TimeoutSnafu,
};

/// Bytes per LED in the wire buffer.
pub const BYTES_PER_LED: usize = 3;

/// Settings handed to the peripheral when a channel is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub gpio: i32,
    pub resolution_hz: u32,
    pub mem_block_symbols: usize,
    pub trans_queue_depth: usize,
    pub with_dma: bool,
}

/// Result of waiting for a transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Done,
    TimedOut,
}

/// Pulse-train peripheral boundary
///
/// Implementations pull symbols from the encoder into their memory
/// block, calling [`Encoder::encode`] again whenever it reports a full
/// block, until the transmission completes.
pub trait Transmitter {
    type Error: core::fmt::Debug;

    /// Create and enable the transmit channel
    fn enable(&mut self, config: &ChannelConfig) -> Result<(), Self::Error>;

    /// Submit `data` for transmission through `encoder`
    fn transmit(&mut self, encoder: &mut Ws2812Encoder, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until all submitted transmissions are done
    fn wait_done(&mut self, timeout: Option<Duration>) -> Result<WaitOutcome, Self::Error>;

    /// Release the channel
    fn disable(&mut self) {}
}

/// LED strip driver over a [`Transmitter`]
pub struct StripDriver<T: Transmitter> {
    tx: T,
    config: DriverConfig,
    channel: Option<ChannelConfig>,
    encoder: Option<Ws2812Encoder>,
    buffer: Vec<u8>,
}

impl<T: Transmitter> StripDriver<T> {
    pub fn new(tx: T) -> Self {
        Self::with_config(tx, DriverConfig::default())
    }

    pub fn with_config(tx: T, config: DriverConfig) -> Self {
        Self {
            tx,
            config,
            channel: None,
            encoder: None,
            buffer: Vec::new(),
        }
    }

    /// Allocate the pixel buffer and create the peripheral channel.
    ///
    /// Calling this on an initialized driver does nothing.
    pub fn init(&mut self, gpio: i32, led_count: usize) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }
        ensure!(led_count > 0, InvalidArgumentSnafu { reason: "zero LEDs" });

        let encoder = Ws2812Encoder::with_resolution(self.config.resolution_hz)?;

        let size = led_count
            .checked_mul(BYTES_PER_LED)
            .context(ResourceExhaustedSnafu)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| ResourceExhaustedSnafu.build())?;
        buffer.resize(size, 0);

        let channel = ChannelConfig {
            gpio,
            resolution_hz: self.config.resolution_hz,
            mem_block_symbols: self.config.mem_block_symbols,
            trans_queue_depth: self.config.trans_queue_depth,
            with_dma: self.config.with_dma,
        };
        if let Err(err) = self.tx.enable(&channel) {
            error!("Cannot create LED channel: {:?}", err);
            return ResourceExhaustedSnafu.fail();
        }

        self.buffer = buffer;
        self.encoder = Some(encoder);
        self.channel = Some(channel);

        info!("WS2812 initialized: gpio={} leds={}", gpio, led_count);
        Ok(())
    }

    /// Release the buffer and the peripheral channel
    pub fn deinit(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.tx.disable();
        self.buffer = Vec::new();
        self.encoder = None;
        self.channel = None;
    }

    pub const fn is_initialized(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn led_count(&self) -> usize {
        self.buffer.len() / BYTES_PER_LED
    }

    /// Wire-order (GRB) pixel bytes
    pub fn raw(&self) -> &[u8] {
        &self.buffer
    }

    /// Read back a pixel as RGB
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.buffer
            .chunks_exact(BYTES_PER_LED)
            .nth(index)
            .map(|grb| Rgb::new(grb[1], grb[0], grb[2]))
    }

    /// Set one pixel; out-of-range indices are ignored
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(grb) = self.buffer.chunks_exact_mut(BYTES_PER_LED).nth(index) {
            grb.copy_from_slice(&[color.g, color.r, color.b]);
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        for grb in self.buffer.chunks_exact_mut(BYTES_PER_LED) {
            grb.copy_from_slice(&[color.g, color.r, color.b]);
        }
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Transmit the buffer and block until the strip has latched it
    pub fn show(&mut self) -> Result<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return InvalidStateSnafu {
                reason: "strip not initialized",
            }
            .fail();
        };

        encoder.reset();
        if let Err(err) = self.tx.transmit(encoder, &self.buffer) {
            error!("Transmit error: {:?}", err);
            return IoSnafu {
                operation: "transmit",
            }
            .fail();
        }

        match self.tx.wait_done(self.config.wait_timeout) {
            Ok(WaitOutcome::Done) => Ok(()),
            Ok(WaitOutcome::TimedOut) => {
                warn!("Transmission timed out, restarting channel");
                self.recover();
                TimeoutSnafu.fail()
            }
            Err(err) => {
                error!("Wait for transmission failed: {:?}", err);
                IoSnafu {
                    operation: "wait for transmission",
                }
                .fail()
            }
        }
    }

    /// Restart the channel after a hung transmission
    fn recover(&mut self) {
        self.tx.disable();
        if let Some(channel) = self.channel {
            if let Err(err) = self.tx.enable(&channel) {
                error!("Cannot restart LED channel: {:?}", err);
            }
        }
        if let Some(encoder) = self.encoder.as_mut() {
            encoder.reset();
        }
    }

    pub fn transmitter(&self) -> &T {
        &self.tx
    }

    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.tx
    }
}

impl<T: Transmitter> PixelWrite for StripDriver<T> {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        Self::set_pixel(self, index, color);
    }

    fn pixel_count(&self) -> usize {
        self.led_count()
    }
}

impl<T: Transmitter> SmartLedsWrite for StripDriver<T> {
    type Error = Error;
    type Color = Rgb;

    /// Write colors from the start of the strip, then show them
    fn write<I, C>(&mut self, iterator: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        for (index, color) in iterator.into_iter().enumerate() {
            Self::set_pixel(self, index, color.into());
        }
        self.show()
    }
}
