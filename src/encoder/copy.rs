use super::{EncodeState, Encoder, PulseCode, SymbolSink};

/// Copies prepared symbols into the sink unchanged
#[derive(Debug, Clone, Default)]
pub struct CopyEncoder {
    position: usize,
}

impl CopyEncoder {
    pub const fn new() -> Self {
        Self { position: 0 }
    }
}

impl Encoder for CopyEncoder {
    type Input = [PulseCode];

    fn encode(&mut self, input: &[PulseCode], sink: &mut dyn SymbolSink) -> (usize, EncodeState) {
        let mut written = 0;

        for symbol in &input[self.position.min(input.len())..] {
            if sink.push_symbol(*symbol).is_err() {
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
