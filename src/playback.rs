//! Rodio playback of decoded audio.

use std::time::Duration;
use std::vec;

use crate::DecodedAudio;

/// Plays decoded audio through Rodio.
pub struct QoaRodioSource {
    samples: vec::IntoIter<i16>,
    channels: u16,
    sample_rate: u32,
    duration: Duration,
}

impl DecodedAudio {
    /// Wrap the decoded samples as a Rodio Source for playback.
    pub fn into_source(self) -> QoaRodioSource {
        QoaRodioSource {
            channels: self.channel_count as u16,
            sample_rate: self.sample_rate,
            duration: self.duration(),
            samples: self.samples.into_iter(),
        }
    }
}

impl Iterator for QoaRodioSource {
    type Item = i16;

    fn next(&mut self) -> Option<Self::Item> {
        self.samples.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

impl rodio::Source for QoaRodioSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.samples.len())
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }
}
