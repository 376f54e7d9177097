use std::io;

use log::{debug, trace, warn};

use crate::audio::{interleave, DecodedAudio};
use crate::config::{DecoderConfig, FrameLimit, SampleRatePolicy};
use crate::error::{DecodeError, Result};
use crate::header::{FileHeader, FrameHeader};
use crate::lms::LmsState;
use crate::reader::ByteReader;
use crate::slice::decode_slice;
use crate::QOA_SLICE_LEN;

/// Decoder of QOA streams.
///
/// The file header is read and checked by [`QoaDecoder::new`]; all frames are
/// decoded in one pass by [`QoaDecoder::decode`]. Reads are small and
/// sequential, so wrapping a `File` in a `BufReader` is recommended.
#[derive(Debug)]
pub struct QoaDecoder<R> {
    reader: ByteReader<R>,
    config: DecoderConfig,
    file_header: FileHeader,
    /// Set by the first frame header.
    stream: Option<StreamFormat>,
    lms: Vec<LmsState>,
    frames_decoded: usize,
}

#[derive(Debug, Clone, Copy)]
struct StreamFormat {
    channel_count: u8,
    first_sample_rate: u32,
    last_sample_rate: u32,
}

impl<R> QoaDecoder<R>
where
    R: io::Read,
{
    /// Read the file header of a QOA stream read from `reader`.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Result<Self> {
        let mut reader = ByteReader::new(reader);
        let file_header = FileHeader::parse(&mut reader)?;
        debug!(
            "qoa stream declares {} sample frames across {} frames",
            file_header.total_sample_frames, file_header.frame_count
        );

        Ok(Self {
            reader,
            config,
            file_header,
            stream: None,
            lms: Vec::new(),
            frames_decoded: 0,
        })
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Consume this `QoaDecoder` and return the inner reader.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Decode every frame and return the interleaved samples.
    ///
    /// Any error discards everything decoded so far.
    pub fn decode(mut self) -> Result<DecodedAudio> {
        let mut channels: Vec<Vec<i16>> = Vec::new();
        match self.config.frame_limit {
            FrameLimit::Declared => {
                for _ in 0..self.file_header.frame_count {
                    let header = FrameHeader::parse(&mut self.reader)?;
                    self.decode_frame(header, &mut channels)?;
                }
            }
            FrameLimit::UntilExhausted => {
                while let Some(header) = FrameHeader::try_parse(&mut self.reader)? {
                    self.decode_frame(header, &mut channels)?;
                }
            }
        }

        // Even a stream declaring no samples holds at least one frame.
        let Some(format) = self.stream else {
            return Err(DecodeError::TruncatedInput {
                what: "channel_count",
                offset: self.reader.position(),
            });
        };
        if self.config.frame_limit == FrameLimit::UntilExhausted {
            self.check_declared_length(channels.first().map_or(0, Vec::len))?;
        }
        let samples = interleave(&channels);
        debug!(
            "decoded {} frames, {} samples",
            self.frames_decoded,
            samples.len()
        );

        Ok(DecodedAudio {
            sample_rate: format.last_sample_rate,
            channel_count: u32::from(format.channel_count),
            samples,
        })
    }

    fn decode_frame(&mut self, header: FrameHeader, channels: &mut Vec<Vec<i16>>) -> Result<()> {
        let frame = self.frames_decoded;
        trace!(
            "frame {}: {} channels, {} Hz, {} sample frames, {} bytes",
            frame,
            header.channel_count,
            header.sample_rate,
            header.sample_frame_count,
            header.byte_size
        );
        self.check_frame_header(&header)?;

        let num_channels = header.channel_count as usize;
        if channels.len() != num_channels {
            // Only happens on the first frame; later frames were checked above.
            channels.resize_with(num_channels, Vec::new);
            self.lms.resize_with(num_channels, Default::default);
        }

        // The LMS block replaces whatever state the previous frame left.
        for lms in &mut self.lms {
            *lms = LmsState::parse(&mut self.reader)?;
        }

        let mut remaining = header.sample_frame_count as usize;
        for _ in 0..header.slices_per_channel() {
            let keep = remaining.min(QOA_SLICE_LEN);
            for (lms, out) in self.lms.iter_mut().zip(channels.iter_mut()) {
                let slice = self.reader.read_u64("slice")?;
                let samples = decode_slice(slice, lms);
                out.extend_from_slice(&samples[..keep]);
            }
            remaining -= keep;
        }

        self.frames_decoded += 1;
        Ok(())
    }

    /// Validates `header` and records the stream format from the first frame.
    fn check_frame_header(&mut self, header: &FrameHeader) -> Result<()> {
        let frame = self.frames_decoded;
        header.validate(frame, self.config.verify_frame_size)?;

        let format = self.stream.get_or_insert(StreamFormat {
            channel_count: header.channel_count,
            first_sample_rate: header.sample_rate,
            last_sample_rate: header.sample_rate,
        });

        if header.channel_count != format.channel_count {
            return Err(DecodeError::ChannelCountMismatch {
                expected: format.channel_count,
                found: header.channel_count,
                frame,
            });
        }
        if self.config.sample_rate_policy == SampleRatePolicy::RequireConstant
            && header.sample_rate != format.first_sample_rate
        {
            return Err(DecodeError::SampleRateMismatch {
                expected: format.first_sample_rate,
                found: header.sample_rate,
                frame,
            });
        }
        format.last_sample_rate = header.sample_rate;
        Ok(())
    }

    /// Compares the decoded length with the file header. Zero means the
    /// length was not known when the stream was written.
    fn check_declared_length(&self, decoded: usize) -> Result<()> {
        let declared = self.file_header.total_sample_frames as usize;
        if declared == 0 {
            return Ok(());
        }
        if decoded < declared {
            return Err(DecodeError::TruncatedInput {
                what: "frame",
                offset: self.reader.position(),
            });
        }
        if decoded > declared {
            warn!("qoa stream declares {declared} sample frames but holds {decoded}");
        }
        Ok(())
    }
}

/// Decode all samples of a QOA stream read from `reader`.
///
/// If the frames do not all have the same number of channels an error is
/// returned. The sample rate of the last frame is reported.
pub fn decode_all<R: io::Read>(reader: R) -> Result<DecodedAudio> {
    QoaDecoder::new(reader)?.decode()
}

/// Same as [`decode_all`] with an explicit configuration.
pub fn decode_all_with<R: io::Read>(reader: R, config: &DecoderConfig) -> Result<DecodedAudio> {
    QoaDecoder::with_config(reader, config.clone())?.decode()
}

/// Decode a QOA stream held in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedAudio> {
    decode_all(bytes)
}
