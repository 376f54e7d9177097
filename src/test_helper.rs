//! Packs synthetic QOA streams for tests and benchmarks.
#![allow(clippy::missing_panics_doc)]

use crate::{QOA_FRAME_HEADER_SIZE, QOA_LMS_LEN, QOA_LMS_SIZE, QOA_MAGIC, QOA_SLICE_LEN};

/// Packs a 4-bit scale factor index and 20 residual codes into a slice.
pub fn pack_slice(sf_quant: u8, codes: [u8; QOA_SLICE_LEN]) -> u64 {
    assert!(sf_quant < 16);
    codes.iter().fold(u64::from(sf_quant), |slice, &code| {
        assert!(code < 8);
        (slice << 3) | u64::from(code)
    })
}

/// One channel's LMS block as written at the start of a frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct LmsBlock {
    pub history: [i16; QOA_LMS_LEN],
    pub weights: [i16; QOA_LMS_LEN],
}

impl LmsBlock {
    pub fn new(history: [i16; QOA_LMS_LEN], weights: [i16; QOA_LMS_LEN]) -> Self {
        Self { history, weights }
    }
}

/// Builds a byte stream frame by frame. Nothing is validated, so malformed
/// streams can be produced on purpose.
#[derive(Clone, Debug)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new(total_sample_frames: u32) -> Self {
        let mut bytes = QOA_MAGIC.to_be_bytes().to_vec();
        bytes.extend_from_slice(&total_sample_frames.to_be_bytes());
        Self { bytes }
    }

    /// Appends a frame. `slices` holds one entry per slice group, each with
    /// one slice per channel. The frame's `byte_size` is set to the size of
    /// what is actually written.
    pub fn frame(
        self,
        sample_rate: u32,
        sample_frame_count: u16,
        lms: &[LmsBlock],
        slices: &[Vec<u64>],
    ) -> Self {
        let byte_size = QOA_FRAME_HEADER_SIZE
            + QOA_LMS_SIZE * lms.len()
            + 8 * slices.iter().map(Vec::len).sum::<usize>();
        self.frame_with_size(sample_rate, sample_frame_count, byte_size as u16, lms, slices)
    }

    pub fn frame_with_size(
        mut self,
        sample_rate: u32,
        sample_frame_count: u16,
        byte_size: u16,
        lms: &[LmsBlock],
        slices: &[Vec<u64>],
    ) -> Self {
        self.bytes.push(lms.len() as u8);
        self.bytes.extend_from_slice(&sample_rate.to_be_bytes()[1..]);
        self.bytes.extend_from_slice(&sample_frame_count.to_be_bytes());
        self.bytes.extend_from_slice(&byte_size.to_be_bytes());
        for block in lms {
            for v in block.history.iter().chain(block.weights.iter()) {
                self.bytes.extend_from_slice(&v.to_be_bytes());
            }
        }
        for group in slices {
            for slice in group {
                self.bytes.extend_from_slice(&slice.to_be_bytes());
            }
        }
        self
    }

    /// Appends raw bytes after the last frame.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// A frame of `slice_groups * 20` sample frames in every channel, with
/// varying scale factors and residuals. Useful where only the shape of the
/// stream matters.
pub fn busy_stream(channels: usize, frames: usize, slice_groups: usize) -> Vec<u8> {
    let samples = (frames * slice_groups * QOA_SLICE_LEN) as u32;
    let mut builder = StreamBuilder::new(samples);
    let lms = vec![LmsBlock::new([0; 4], [0, 0, -(1 << 13), 1 << 14]); channels];
    for f in 0..frames {
        let slices: Vec<Vec<u64>> = (0..slice_groups)
            .map(|g| {
                (0..channels)
                    .map(|c| {
                        let seed = f * 31 + g * 7 + c;
                        let codes = std::array::from_fn(|i| ((seed + i * 5) % 8) as u8);
                        pack_slice((seed % 16) as u8, codes)
                    })
                    .collect()
            })
            .collect();
        builder = builder.frame(
            44100,
            (slice_groups * QOA_SLICE_LEN) as u16,
            &lms,
            &slices,
        );
    }
    builder.build()
}
