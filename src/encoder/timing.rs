use snafu::prelude::*;

use crate::error::{InvalidArgumentSnafu, Result};

use super::{MAX_DURATION, PulseCode};

/// Default peripheral tick rate: 10 MHz, 0.1 µs per tick.
pub const DEFAULT_RESOLUTION_HZ: u32 = 10_000_000;

/// WS2812 0-bit high time in ns.
const T0H_NS: u32 = 400;
/// WS2812 0-bit low time in ns.
const T0L_NS: u32 = 900;
/// WS2812 1-bit high time in ns.
const T1H_NS: u32 = 800;
/// WS2812 1-bit low time in ns.
const T1L_NS: u32 = 500;
/// Latch gap after the last bit in µs.
const RESET_US: u32 = 80;

/// Convert nanoseconds to peripheral ticks, rounding to nearest
#[allow(clippy::cast_possible_truncation)]
const fn to_ticks(ns: u32, resolution_hz: u32) -> u16 {
    let ticks = (ns as u64 * resolution_hz as u64 + 500_000_000) / 1_000_000_000;
    if ticks > MAX_DURATION as u64 {
        MAX_DURATION
    } else {
        ticks as u16
    }
}

/// WS2812 bit and reset timings expressed in peripheral ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub resolution_hz: u32,
    pub bit0: PulseCode,
    pub bit1: PulseCode,
    /// Reset gap length in ticks
    pub reset_ticks: u16,
}

impl PulseTiming {
    /// Scale the protocol timings to the given tick rate
    pub fn at_resolution(resolution_hz: u32) -> Result<Self> {
        if resolution_hz == 0 {
            return InvalidArgumentSnafu {
                reason: "zero tick resolution",
            }
            .fail();
        }

        let timing = Self::scaled(resolution_hz);
        ensure!(
            timing.is_distinguishable(),
            InvalidArgumentSnafu {
                reason: "tick resolution too coarse for bit timings",
            }
        );
        Ok(timing)
    }

    /// Both bit symbols have non-zero halves and differ from each other
    fn is_distinguishable(&self) -> bool {
        let nonzero = |code: PulseCode| code.duration0 > 0 && code.duration1 > 0;
        nonzero(self.bit0) && nonzero(self.bit1) && self.bit0 != self.bit1
    }

    const fn scaled(resolution_hz: u32) -> Self {
        Self {
            resolution_hz,
            bit0: PulseCode::high_low(
                to_ticks(T0H_NS, resolution_hz),
                to_ticks(T0L_NS, resolution_hz),
            ),
            bit1: PulseCode::high_low(
                to_ticks(T1H_NS, resolution_hz),
                to_ticks(T1L_NS, resolution_hz),
            ),
            reset_ticks: to_ticks(RESET_US * 1000, resolution_hz),
        }
    }

    /// Low-level symbol that holds the line for the whole reset gap
    pub const fn reset_code(&self) -> PulseCode {
        PulseCode::new(false, self.reset_ticks, false, 0)
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::scaled(DEFAULT_RESOLUTION_HZ)
    }
}
