use super::{EncodeState, Encoder, PulseCode, SymbolSink};

/// Encodes every bit of a byte stream as one symbol
///
/// Progress is tracked as a bit offset so an interrupted call resumes on
/// the exact bit that did not fit.
#[derive(Debug, Clone)]
pub struct BytesEncoder {
    bit0: PulseCode,
    bit1: PulseCode,
    msb_first: bool,
    /// Next bit to emit, counted from the start of the input
    position: usize,
}

impl BytesEncoder {
    pub const fn new(bit0: PulseCode, bit1: PulseCode, msb_first: bool) -> Self {
        Self {
            bit0,
            bit1,
            msb_first,
            position: 0,
        }
    }

    fn symbol_for(&self, byte: u8, bit: usize) -> PulseCode {
        let shift = if self.msb_first { 7 - bit } else { bit };
        if (byte >> shift) & 1 == 1 {
            self.bit1
        } else {
            self.bit0
        }
    }
}

impl Encoder for BytesEncoder {
    type Input = [u8];

    fn encode(&mut self, input: &[u8], sink: &mut dyn SymbolSink) -> (usize, EncodeState) {
        let total_bits = input.len() * 8;
        let mut written = 0;

        while self.position < total_bits {
            let byte = input[self.position / 8];
            let symbol = self.symbol_for(byte, self.position % 8);
            if sink.push_symbol(symbol).is_err() {
                return (written, EncodeState::MemoryFull);
            }
            written += 1;
            self.position += 1;
        }

        self.position = 0;
        (written, EncodeState::Complete)
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
