use std::time::Duration;

/// A fully decoded QOA stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Sample rate in HZ of `samples`
    pub sample_rate: u32,
    /// Number of channels in `samples`
    pub channel_count: u32,
    /// Interleaved samples of all channels (e.g. L-R-L-R-L-R... if there are
    /// two channels)
    pub samples: Vec<i16>,
}

impl DecodedAudio {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u32 {
        self.channel_count
    }

    pub fn samples_per_channel(&self) -> usize {
        match self.channel_count {
            0 => 0,
            n => self.samples.len() / n as usize,
        }
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples_per_channel() as f64 / f64::from(self.sample_rate))
    }

    /// Samples of a single channel, in order.
    pub fn channel(&self, idx: usize) -> impl Iterator<Item = i16> + '_ {
        let stride = self.channel_count.max(1) as usize;
        self.samples.iter().skip(idx).step_by(stride).copied()
    }
}

/// Interleaves per-channel sample runs into one sequence, channel-minor.
///
/// All channels are expected to hold the same number of samples.
pub(crate) fn interleave(channels: &[Vec<i16>]) -> Vec<i16> {
    match channels {
        [] => Vec::new(),
        [mono] => mono.clone(),
        _ => {
            let len = channels[0].len();
            debug_assert!(channels.iter().all(|c| c.len() == len));
            let mut samples = Vec::with_capacity(len * channels.len());
            for i in 0..len {
                samples.extend(channels.iter().map(|c| c[i]));
            }
            samples
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_stereo() {
        let samples = interleave(&[vec![1, 2, 3], vec![-1, -2, -3]]);
        assert_eq!(samples, [1, -1, 2, -2, 3, -3]);
    }

    #[test]
    fn test_interleave_mono_is_flat() {
        assert_eq!(interleave(&[vec![4, 5, 6]]), [4, 5, 6]);
        assert!(interleave(&[]).is_empty());
    }

    #[test]
    fn test_interleave_many_channels() {
        let channels: Vec<Vec<i16>> = (0..5).map(|c| vec![c, c + 10]).collect();
        assert_eq!(interleave(&channels), [0, 1, 2, 3, 4, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_accessors() {
        let audio = DecodedAudio {
            sample_rate: 4,
            channel_count: 2,
            samples: vec![1, -1, 2, -2, 3, -3, 4, -4],
        };
        assert_eq!(audio.samples_per_channel(), 4);
        assert_eq!(audio.duration(), Duration::from_secs(1));
        assert_eq!(audio.channel(1).collect::<Vec<_>>(), [-1, -2, -3, -4]);
    }
}
