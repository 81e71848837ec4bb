//! One-wire pulse encoding.
//!
//! Pixel bytes are turned into [`PulseCode`] symbols for a pulse-train
//! peripheral (RMT style: two level/duration halves per 32-bit word).
//! Encoders write into a bounded [`SymbolSink`] and can be interrupted
//! when it fills up; calling [`Encoder::encode`] again with the same input
//! resumes where the previous call stopped.

mod bytes;
mod copy;
mod timing;
mod ws2812;

pub use bytes::BytesEncoder;
pub use copy::CopyEncoder;
pub use timing::{DEFAULT_RESOLUTION_HZ, PulseTiming};
pub use ws2812::{Stage, Ws2812Encoder};

/// Largest duration representable in one symbol half (15 bits).
pub const MAX_DURATION: u16 = 0x7FFF;

/// One peripheral symbol: a level held for `duration0` ticks followed by
/// a level held for `duration1` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulseCode {
    pub level0: bool,
    pub duration0: u16,
    pub level1: bool,
    pub duration1: u16,
}

impl PulseCode {
    pub const fn new(level0: bool, duration0: u16, level1: bool, duration1: u16) -> Self {
        Self {
            level0,
            duration0,
            level1,
            duration1,
        }
    }

    /// High for `high` ticks, then low for `low` ticks
    pub const fn high_low(high: u16, low: u16) -> Self {
        Self::new(true, high, false, low)
    }

    /// Total length of the symbol in ticks
    pub const fn ticks(self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }
}

impl From<PulseCode> for u32 {
    fn from(code: PulseCode) -> Self {
        u32::from(code.duration0 & MAX_DURATION)
            | (u32::from(code.level0) << 15)
            | (u32::from(code.duration1 & MAX_DURATION) << 16)
            | (u32::from(code.level1) << 31)
    }
}

/// Outcome of a single [`Encoder::encode`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeState {
    /// All input was encoded
    Complete,
    /// The sink filled up; call `encode` again once it has been drained
    MemoryFull,
}

/// Destination for encoded symbols, usually a peripheral memory block
pub trait SymbolSink {
    /// Append a symbol, handing it back if there is no room
    fn push_symbol(&mut self, symbol: PulseCode) -> Result<(), PulseCode>;
}

impl<const N: usize> SymbolSink for heapless::Vec<PulseCode, N> {
    fn push_symbol(&mut self, symbol: PulseCode) -> Result<(), PulseCode> {
        self.push(symbol)
    }
}

impl SymbolSink for alloc::vec::Vec<PulseCode> {
    fn push_symbol(&mut self, symbol: PulseCode) -> Result<(), PulseCode> {
        self.push(symbol);
        Ok(())
    }
}

/// Resumable symbol encoder
pub trait Encoder {
    type Input: ?Sized;

    /// Encode as much of `input` as fits into `sink`.
    ///
    /// Returns the number of symbols written by this call and whether the
    /// input is finished.
    fn encode(&mut self, input: &Self::Input, sink: &mut dyn SymbolSink) -> (usize, EncodeState);

    /// Forget any partial progress
    fn reset(&mut self);
}
