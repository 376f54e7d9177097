//! Decoder configuration structs.

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Configuration for [`QoaDecoder`](crate::QoaDecoder).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecoderConfig {
    /// How the decoder decides that the last frame has been read.
    pub frame_limit: FrameLimit,
    /// Whether frames may change the sample rate.
    pub sample_rate_policy: SampleRatePolicy,
    /// If set, frames must declare at least one channel and a non-zero
    /// sample rate, each frame's `byte_size` must match its contents and
    /// frames may not hold more than 256 slices per channel.
    pub verify_frame_size: bool,
}

/// Termination condition of the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameLimit {
    /// Read frames until the source ends on a frame boundary. The declared
    /// sample count is then only checked against what was decoded.
    #[default]
    UntilExhausted,
    /// Read exactly the number of frames derived from the file header and
    /// ignore anything after them. The count is computed in `f32`, so very
    /// long streams may expect one frame more than they hold.
    Declared,
}

/// Which sample rate the decoded audio reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleRatePolicy {
    /// Accept changes and report the last frame's sample rate.
    #[default]
    LastFrame,
    /// Every frame must use the first frame's sample rate.
    RequireConstant,
}
