//! Logical to physical LED mapping.
//!
//! A [`Topology`] is an ordered list of physically wired strips that are
//! chained on one data line. Animations address LEDs by logical index;
//! the topology translates that into the position inside the wire-order
//! pixel buffer, flipping strips that are wired backwards.

use heapless::Vec;
use log::info;

use crate::error::{InvalidArgumentSnafu, Result};

/// Maximum number of strips chained on one data line.
pub const MAX_STRIPS: usize = 8;

/// One physically wired LED segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strip {
    pub led_count: u16,
    /// The strip is wired backwards relative to the logical direction
    pub reversed: bool,
}

impl Strip {
    pub const fn forward(led_count: u16) -> Self {
        Self {
            led_count,
            reversed: false,
        }
    }

    pub const fn reversed(led_count: u16) -> Self {
        Self {
            led_count,
            reversed: true,
        }
    }
}

/// Immutable strip layout, built once at startup
#[derive(Debug, Clone)]
pub struct Topology {
    strips: Vec<Strip, MAX_STRIPS>,
    total: usize,
}

impl Topology {
    /// Build a topology from strips in wiring order
    pub fn new(strips: &[Strip]) -> Result<Self> {
        let strips = Vec::from_slice(strips)
            .map_err(|()| InvalidArgumentSnafu { reason: "too many strips" }.build())?;
        Ok(Self::from_strips(strips))
    }

    /// Single forward strip
    pub fn single(led_count: u16) -> Self {
        let mut strips = Vec::new();
        // Capacity is never zero, so one strip always fits
        let _ = strips.push(Strip::forward(led_count));
        Self::from_strips(strips)
    }

    fn from_strips(strips: Vec<Strip, MAX_STRIPS>) -> Self {
        let total = strips.iter().map(|s| usize::from(s.led_count)).sum();

        info!(
            "Topology loaded: {} strips, {} total LEDs",
            strips.len(),
            total
        );

        Self { strips, total }
    }

    /// Total LEDs across all strips
    pub const fn total_leds(&self) -> usize {
        self.total
    }

    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Map a logical index to a physical buffer index.
    ///
    /// Out-of-range input is clamped to the last LED. An empty topology
    /// maps everything to `0`; callers must check [`Self::total_leds`]
    /// before writing.
    pub fn map(&self, logical_index: usize) -> usize {
        let mut base = 0;

        for strip in &self.strips {
            let len = usize::from(strip.led_count);
            if logical_index < base + len {
                let local = logical_index - base;
                return if strip.reversed {
                    base + (len - 1 - local)
                } else {
                    base + local
                };
            }
            base += len;
        }

        self.total.saturating_sub(1)
    }
}
