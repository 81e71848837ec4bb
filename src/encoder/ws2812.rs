use core::slice;

use crate::error::Result;

use super::{BytesEncoder, CopyEncoder, EncodeState, Encoder, PulseCode, PulseTiming, SymbolSink};

/// Which part of the transmission the encoder is producing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Bit pulses for the pixel bytes
    SendData,
    /// The low-level latch gap
    SendReset,
}

/// WS2812 frame encoder: pixel bits followed by the reset gap
///
/// A transmission is complete only after both stages finished. Either
/// stage may stop early with [`EncodeState::MemoryFull`]; the peripheral
/// driver drains its memory block and calls `encode` again with the same
/// data.
#[derive(Debug, Clone)]
pub struct Ws2812Encoder {
    bytes: BytesEncoder,
    copy: CopyEncoder,
    reset_code: PulseCode,
    stage: Stage,
    timing: PulseTiming,
}

impl Ws2812Encoder {
    pub fn new(timing: PulseTiming) -> Self {
        Self {
            bytes: BytesEncoder::new(timing.bit0, timing.bit1, true),
            copy: CopyEncoder::new(),
            reset_code: timing.reset_code(),
            stage: Stage::SendData,
            timing,
        }
    }

    /// Encoder for a peripheral running at `resolution_hz`
    pub fn with_resolution(resolution_hz: u32) -> Result<Self> {
        Ok(Self::new(PulseTiming::at_resolution(resolution_hz)?))
    }

    pub const fn stage(&self) -> Stage {
        self.stage
    }

    pub const fn timing(&self) -> &PulseTiming {
        &self.timing
    }
}

impl Encoder for Ws2812Encoder {
    type Input = [u8];

    fn encode(&mut self, input: &[u8], sink: &mut dyn SymbolSink) -> (usize, EncodeState) {
        let mut written = 0;

        if self.stage == Stage::SendData {
            let (count, state) = self.bytes.encode(input, sink);
            written += count;
            match state {
                EncodeState::Complete => self.stage = Stage::SendReset,
                EncodeState::MemoryFull => return (written, EncodeState::MemoryFull),
            }
        }

        let (count, state) = self.copy.encode(slice::from_ref(&self.reset_code), sink);
        written += count;
        if state == EncodeState::Complete {
            self.stage = Stage::SendData;
        }
        (written, state)
    }

    fn reset(&mut self) {
        self.bytes.reset();
        self.copy.reset();
        self.stage = Stage::SendData;
    }
}
