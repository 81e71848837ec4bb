//! Crate-wide error type.
//!
//! Configuration and storage calls surface every failure explicitly.
//! Real-time paths (topology mapping, pixel writes, scheduler ticks)
//! degrade silently instead and never produce an [`Error`].

use alloc::string::String;

use snafu::prelude::*;

/// Errors returned by the driver, the effect store and the scheduler.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// A named resource does not exist.
    #[snafu(display("{what} not found"))]
    NotFound { what: String },

    /// Stored data is not in a format this crate understands.
    #[snafu(display("invalid format: {reason}"))]
    InvalidFormat { reason: &'static str },

    /// Fewer bytes were available than the header declared.
    #[snafu(display("truncated read: expected {expected} bytes, got {actual}"))]
    Truncated { expected: usize, actual: usize },

    /// Memory or a peripheral channel could not be allocated.
    ResourceExhausted,

    /// An argument was empty, zero-sized or otherwise unusable.
    #[snafu(display("invalid argument: {reason}"))]
    InvalidArgument { reason: &'static str },

    /// The operation requires an initialization step that has not happened.
    #[snafu(display("invalid state: {reason}"))]
    InvalidState { reason: &'static str },

    /// The underlying storage or peripheral failed.
    #[snafu(display("{operation} failed"))]
    Io { operation: &'static str },

    /// The peripheral did not signal completion in time.
    Timeout,
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    FormatInvalid,
    ResourceExhausted,
    InvalidArgument,
    InvalidState,
    Io,
}

impl Error {
    /// Classify the error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidFormat { .. } => ErrorKind::FormatInvalid,
            Self::ResourceExhausted => ErrorKind::ResourceExhausted,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Truncated { .. } | Self::Io { .. } | Self::Timeout => ErrorKind::Io,
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
