#![forbid(unsafe_code)]
//! # QOA - Quite OK Audio Format
//!
//! A decode-only library for QOA streams. Bytes go in through any
//! [`std::io::Read`], interleaved 16-bit PCM comes out as [`DecodedAudio`].
//!
//! ```no_run
//! let bytes = std::fs::read("sample.qoa")?;
//! let audio = qoadec::decode_bytes(&bytes)?;
//! println!("{} channels at {} Hz", audio.channel_count, audio.sample_rate);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod audio;
pub mod config;
mod decoder;
pub mod error;
pub mod header;
pub mod lms;
#[cfg(feature = "rodio")]
mod playback;
pub mod reader;
pub mod slice;

#[cfg(any(test, feature = "__test_helper"))]
pub mod test_helper;

pub use audio::DecodedAudio;
pub use config::{DecoderConfig, FrameLimit, SampleRatePolicy};
pub use decoder::{decode_all, decode_all_with, decode_bytes, QoaDecoder};
pub use error::{DecodeError, ErrorKind, Result};
pub use header::{FileHeader, FrameHeader};
#[cfg(feature = "rodio")]
pub use playback::QoaRodioSource;

pub const QOA_MAGIC: u32 = u32::from_be_bytes(*b"qoaf");
/// Size of the file header.
pub const QOA_HEADER_SIZE: usize = 8;
pub const QOA_FRAME_HEADER_SIZE: usize = 8;
pub const QOA_LMS_LEN: usize = 4;
/// Bytes of LMS state per channel at the start of each frame.
pub const QOA_LMS_SIZE: usize = QOA_LMS_LEN * 2 * 2;
pub const QOA_SLICE_LEN: usize = 20;
pub const QOA_SLICES_PER_FRAME: usize = 256;
pub const QOA_FRAME_LEN: usize = QOA_SLICES_PER_FRAME * QOA_SLICE_LEN;
pub const QOA_MAX_CHANNELS: usize = 8;
