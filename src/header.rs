//! File and frame headers.

use std::io;

use crate::error::{DecodeError, Result};
use crate::reader::ByteReader;
use crate::{
    QOA_FRAME_HEADER_SIZE, QOA_LMS_SIZE, QOA_MAGIC, QOA_MAX_CHANNELS, QOA_SLICES_PER_FRAME,
    QOA_SLICE_LEN,
};

/// The 8 bytes at the start of every QOA stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Sample frames (samples per channel) the stream declares. Zero means
    /// the count is unknown.
    pub total_sample_frames: u32,
    /// Frames expected from `total_sample_frames`.
    pub frame_count: u32,
}

impl FileHeader {
    pub fn parse<R: io::Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let magic = reader.read_array::<4>("magic")?;
        if u32::from_be_bytes(magic) != QOA_MAGIC {
            return Err(DecodeError::InvalidMagic { found: magic });
        }
        let total_sample_frames = reader.read_u32("total_sample_frames")?;
        Ok(Self {
            total_sample_frames,
            frame_count: expected_frame_count(total_sample_frames),
        })
    }
}

/// Rounds `samples / 256 / 20 + 0.5` half up in single precision. This is
/// not a ceiling: an exact multiple of 5120 yields one frame more than it
/// fills, and above 2^24 samples the `f32` quotient can add another.
pub fn expected_frame_count(total_sample_frames: u32) -> u32 {
    let frames = total_sample_frames as f32 / QOA_SLICES_PER_FRAME as f32 / QOA_SLICE_LEN as f32;
    (frames + 0.5).round() as u32
}

/// The metadata at the beginning of each frame of slices.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameHeader {
    /// Number of channels in this frame
    pub channel_count: u8,
    /// Sample rate in HZ for this frame (24 bits on the wire)
    pub sample_rate: u32,
    /// Samples per channel in this frame
    pub sample_frame_count: u16,
    /// Size of the whole frame in bytes as written by the encoder. Advisory.
    pub byte_size: u16,
}

impl FrameHeader {
    /// Reads a frame header, or returns `Ok(None)` if the source ended
    /// exactly before it.
    pub fn try_parse<R: io::Read>(reader: &mut ByteReader<R>) -> Result<Option<Self>> {
        let Some([channel_count]) = reader.try_read_array::<1>("channel_count")? else {
            return Ok(None);
        };
        Ok(Some(Self::parse_rest(reader, channel_count)?))
    }

    pub fn parse<R: io::Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let channel_count = reader.read_u8("channel_count")?;
        Self::parse_rest(reader, channel_count)
    }

    fn parse_rest<R: io::Read>(reader: &mut ByteReader<R>, channel_count: u8) -> Result<Self> {
        let sample_rate = reader.read_u24("sample_rate")?;
        let sample_frame_count = reader.read_u16("sample_frame_count")?;
        let byte_size = reader.read_u16("byte_size")?;
        Ok(Self {
            channel_count,
            sample_rate,
            sample_frame_count,
            byte_size,
        })
    }

    /// Slices stored per channel, the last one possibly padded.
    pub fn slices_per_channel(&self) -> usize {
        (self.sample_frame_count as usize).div_ceil(QOA_SLICE_LEN)
    }

    /// The frame size implied by the channel and sample counts.
    pub fn computed_byte_size(&self) -> usize {
        let channels = self.channel_count as usize;
        QOA_FRAME_HEADER_SIZE + QOA_LMS_SIZE * channels + 8 * self.slices_per_channel() * channels
    }

    /// Checks the header against what a conforming encoder writes. Every
    /// header can be decoded, so nothing is rejected unless `strict` is set.
    pub fn validate(&self, frame: usize, strict: bool) -> Result<()> {
        if !strict {
            return Ok(());
        }
        let invalid = |reason| DecodeError::InvalidFrameHeader { frame, reason };
        if self.channel_count == 0 {
            return Err(invalid("zero channels"));
        }
        if self.sample_rate == 0 {
            return Err(invalid("zero sample rate"));
        }
        if self.channel_count as usize > QOA_MAX_CHANNELS {
            return Err(invalid("more than 8 channels"));
        }
        if self.slices_per_channel() > QOA_SLICES_PER_FRAME {
            return Err(invalid("more than 256 slices per channel"));
        }
        if self.byte_size as usize != self.computed_byte_size() {
            return Err(invalid("byte size does not match contents"));
        }
        Ok(())
    }
}
