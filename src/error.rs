//! Errors reported while decoding a QOA stream.
//!
//! Every error is terminal: the decoder never returns partially decoded
//! audio.

use std::io;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The stream does not start with `qoaf`.
    #[error("not a qoa stream (magic {found:02x?})")]
    InvalidMagic { found: [u8; 4] },
    /// The source ran out of bytes in the middle of a fixed-size field.
    #[error("input truncated while reading {what} at byte {offset}")]
    TruncatedInput { what: &'static str, offset: u64 },
    /// A frame declares a different channel count than the first frame.
    #[error("frame {frame} has {found} channels, stream started with {expected}")]
    ChannelCountMismatch { expected: u8, found: u8, frame: usize },
    /// A frame changes the sample rate while it is required to be constant.
    #[error("frame {frame} has sample rate {found} Hz, stream started with {expected} Hz")]
    SampleRateMismatch {
        expected: u32,
        found: u32,
        frame: usize,
    },
    #[error("frame {frame} has an invalid header: {reason}")]
    InvalidFrameHeader { frame: usize, reason: &'static str },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Classification of a [`DecodeError`] without its details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidMagic,
    TruncatedInput,
    ChannelCountMismatch,
    SampleRateMismatch,
    InvalidFrameHeader,
    Io,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMagic { .. } => ErrorKind::InvalidMagic,
            Self::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Self::ChannelCountMismatch { .. } => ErrorKind::ChannelCountMismatch,
            Self::SampleRateMismatch { .. } => ErrorKind::SampleRateMismatch,
            Self::InvalidFrameHeader { .. } => ErrorKind::InvalidFrameHeader,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns true if the error was caused by the input ending early.
    pub fn is_truncated(&self) -> bool {
        self.kind() == ErrorKind::TruncatedInput
    }
}
