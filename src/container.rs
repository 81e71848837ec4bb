//! Stored effect containers.
//!
//! An effect file is a 12-byte little-endian header followed by raw RGB
//! frames:
//!
//! | offset | field            | type |
//! |--------|------------------|------|
//! | 0      | magic `GXRM`     | 4 B  |
//! | 4      | version          | u16  |
//! | 6      | frame count      | u16  |
//! | 8      | LEDs per frame   | u16  |
//! | 10     | frame delay (ms) | u16  |
//! | 12     | frames           | `frame_count * leds_per_frame * 3` B |
//!
//! Frames are stored frame-major, one `[r, g, b]` triplet per logical LED.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, info};
use snafu::prelude::*;

use crate::color::{Rgb, from_rgb_bytes};
use crate::error::{
    InvalidArgumentSnafu, InvalidFormatSnafu, NotFoundSnafu, ResourceExhaustedSnafu, Result,
    TruncatedSnafu,
};
use crate::storage::Storage;

/// Directory that holds effect files.
pub const EFFECTS_DIR: &str = "/fx";
/// Container tag, the little-endian bytes of `0x4D52_5847`.
pub const EFFECT_MAGIC: [u8; 4] = 0x4D52_5847_u32.to_le_bytes();
/// The only container version this reader accepts.
pub const EFFECT_VERSION: u16 = 1;
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 12;

const MAX_PATH_LEN: usize = 128;

/// Header metadata of an effect container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectInfo {
    pub frame_count: u16,
    pub leds_per_frame: u16,
    /// Advisory delay between frames; the reader does not enforce it
    pub frame_delay_ms: u16,
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

impl EffectInfo {
    /// Bytes in one frame
    pub const fn frame_size(&self) -> usize {
        self.leds_per_frame as usize * 3
    }

    /// Bytes of frame data following the header
    pub const fn payload_len(&self) -> usize {
        self.frame_size().saturating_mul(self.frame_count as usize)
    }

    /// Parse and validate the fixed header
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() >= HEADER_LEN,
            TruncatedSnafu {
                expected: HEADER_LEN,
                actual: bytes.len(),
            }
        );
        ensure!(
            bytes[0..4] == EFFECT_MAGIC,
            InvalidFormatSnafu {
                reason: "bad magic"
            }
        );
        ensure!(
            read_u16(bytes, 4) == EFFECT_VERSION,
            InvalidFormatSnafu {
                reason: "unsupported version"
            }
        );

        Ok(Self {
            frame_count: read_u16(bytes, 6),
            leds_per_frame: read_u16(bytes, 8),
            frame_delay_ms: read_u16(bytes, 10),
        })
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut header = [0; HEADER_LEN];
        header[0..4].copy_from_slice(&EFFECT_MAGIC);
        header[4..6].copy_from_slice(&EFFECT_VERSION.to_le_bytes());
        header[6..8].copy_from_slice(&self.frame_count.to_le_bytes());
        header[8..10].copy_from_slice(&self.leds_per_frame.to_le_bytes());
        header[10..12].copy_from_slice(&self.frame_delay_ms.to_le_bytes());
        header
    }
}

/// A loaded effect: header plus all frames held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectFile {
    info: EffectInfo,
    frames: Vec<u8>,
}

impl EffectFile {
    /// Build an effect from frame data; `frames` must be exactly
    /// `info.payload_len()` bytes
    pub fn new(info: EffectInfo, frames: Vec<u8>) -> Result<Self> {
        ensure!(
            frames.len() == info.payload_len(),
            InvalidArgumentSnafu {
                reason: "frame data does not match header"
            }
        );
        Ok(Self { info, frames })
    }

    /// Parse a complete container.
    ///
    /// The payload must be exactly as long as the header declares: short
    /// payloads are a truncated read, trailing bytes an invalid format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let info = EffectInfo::parse(bytes)?;
        let payload = &bytes[HEADER_LEN..];
        let expected = info.payload_len();

        ensure!(
            payload.len() >= expected,
            TruncatedSnafu {
                expected,
                actual: payload.len(),
            }
        );
        ensure!(
            payload.len() == expected,
            InvalidFormatSnafu {
                reason: "trailing data after frames"
            }
        );

        let mut frames = Vec::new();
        frames
            .try_reserve_exact(expected)
            .map_err(|_| ResourceExhaustedSnafu.build())?;
        frames.extend_from_slice(payload);

        Ok(Self { info, frames })
    }

    /// Serialize header and frames
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.frames.len());
        bytes.extend_from_slice(&self.info.to_bytes());
        bytes.extend_from_slice(&self.frames);
        bytes
    }

    pub const fn info(&self) -> &EffectInfo {
        &self.info
    }

    pub const fn frame_count(&self) -> u16 {
        self.info.frame_count
    }

    /// Raw RGB bytes of one frame, `None` past the last frame
    pub fn frame(&self, index: u16) -> Option<&[u8]> {
        if index >= self.info.frame_count {
            return None;
        }
        let size = self.info.frame_size();
        let start = usize::from(index) * size;
        self.frames.get(start..start + size)
    }

    /// Color of one logical LED in one frame
    pub fn pixel(&self, frame: u16, led: usize) -> Option<Rgb> {
        let frame = self.frame(frame)?;
        from_rgb_bytes(frame.get(led.checked_mul(3)?..)?)
    }

    /// Release the frame data
    pub fn close(self) {
        debug!("Closed effect ({} frames)", self.info.frame_count);
    }
}

/// Effect files kept in [`EFFECTS_DIR`] on a [`Storage`]
#[derive(Debug)]
pub struct EffectStore<S: Storage> {
    storage: S,
}

impl<S: Storage> EffectStore<S> {
    /// Wrap a storage, creating the effects directory if needed
    pub fn new(mut storage: S) -> Result<Self> {
        storage.ensure_dir(EFFECTS_DIR)?;
        Ok(Self { storage })
    }

    /// Names of all stored effects, in no particular order
    pub fn list(&self) -> Result<Vec<String>> {
        self.storage.list(EFFECTS_DIR)
    }

    /// Load an effect with all of its frames
    pub fn open(&self, name: &str) -> Result<EffectFile> {
        let path = effect_path(name)?;
        let bytes = self.storage.read(&path)?.context(NotFoundSnafu {
            what: path.as_str(),
        })?;
        let effect = EffectFile::from_bytes(&bytes)?;

        info!(
            "Loaded effect '{}' ({} frames, {} leds)",
            name, effect.info.frame_count, effect.info.leds_per_frame
        );
        Ok(effect)
    }

    /// Store an effect under `name`, replacing any existing one
    pub fn save(&mut self, name: &str, effect: &EffectFile) -> Result<()> {
        let path = effect_path(name)?;
        self.storage.write(&path, &effect.to_bytes())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn effect_path(name: &str) -> Result<String> {
    ensure!(
        !name.is_empty() && !name.contains('/'),
        InvalidArgumentSnafu {
            reason: "invalid effect name"
        }
    );
    let path = format!("{EFFECTS_DIR}/{name}");
    ensure!(
        path.len() < MAX_PATH_LEN,
        InvalidArgumentSnafu {
            reason: "effect name too long"
        }
    );
    Ok(path)
}
