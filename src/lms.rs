//! The per-channel adaptive predictor.

use std::io;

use crate::error::Result;
use crate::reader::ByteReader;
use crate::QOA_LMS_LEN;

/// History and weights of one channel's LMS filter.
///
/// Values are 16 bits on the wire. They are held widened so that weight
/// adaptation inside a frame never wraps; history entries are always clamped
/// samples and stay within `i16`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LmsState {
    pub history: [i32; QOA_LMS_LEN],
    pub weights: [i32; QOA_LMS_LEN],
}

impl LmsState {
    pub fn new(history: [i16; QOA_LMS_LEN], weights: [i16; QOA_LMS_LEN]) -> Self {
        Self {
            history: history.map(i32::from),
            weights: weights.map(i32::from),
        }
    }

    /// Reads 4 history values followed by 4 weights.
    pub fn parse<R: io::Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let mut state = Self::default();
        for h in &mut state.history {
            *h = i32::from(reader.read_i16("lms history")?);
        }
        for w in &mut state.weights {
            *w = i32::from(reader.read_i16("lms weights")?);
        }
        Ok(state)
    }

    /// Weighted sum of the history, scaled down by 2^13.
    #[inline(always)]
    pub fn predict(&self) -> i32 {
        let mut prediction: i64 = 0;
        for i in 0..QOA_LMS_LEN {
            prediction += i64::from(self.weights[i]) * i64::from(self.history[i]);
        }
        (prediction >> 13) as i32
    }

    /// Adapts the weights towards `residual` and pushes `sample` into the
    /// history.
    #[inline(always)]
    pub fn update(&mut self, sample: i16, residual: i32) {
        let delta = residual >> 4;
        for i in 0..QOA_LMS_LEN {
            self.weights[i] += if self.history[i] < 0 { -delta } else { delta };
        }

        self.history.copy_within(1.., 0);
        self.history[QOA_LMS_LEN - 1] = i32::from(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_history_then_weights() {
        let mut bytes = Vec::new();
        for v in [100_i16, -200, 300, -400, 0, 0, -(1 << 13), 1 << 14] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        let lms = LmsState::parse(&mut ByteReader::new(&bytes[..])).unwrap();
        assert_eq!(lms.history, [100, -200, 300, -400]);
        assert_eq!(lms.weights, [0, 0, -8192, 16384]);
    }

    #[test]
    fn test_parse_truncated() {
        let bytes = [0_u8; 15];
        let err = LmsState::parse(&mut ByteReader::new(&bytes[..])).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_zero_state_predicts_zero() {
        assert_eq!(LmsState::default().predict(), 0);
    }

    #[test]
    fn test_predict_shifts_arithmetically() {
        let lms = LmsState::new([0, 0, 300, -400], [0, 0, -(1 << 13), 1 << 14]);
        // (300 * -8192 + -400 * 16384) / 8192
        assert_eq!(lms.predict(), -1100);

        let lms = LmsState::new([0, 0, 0, -1], [0, 0, 0, 1]);
        assert_eq!(lms.predict(), -1);
    }

    #[test]
    fn test_predict_does_not_overflow() {
        let lms = LmsState::new([i16::MAX; 4], [i16::MAX; 4]);
        assert_eq!(lms.predict(), (4 * 32767_i64 * 32767 >> 13) as i32);
        let lms = LmsState::new([i16::MIN; 4], [i16::MIN; 4]);
        assert_eq!(lms.predict(), 524_288);
    }

    #[test]
    fn test_update_shifts_history() {
        let mut lms = LmsState::new([1, 2, 3, 4], [0; 4]);
        lms.update(5, 0);
        assert_eq!(lms.history, [2, 3, 4, 5]);
        assert_eq!(lms.weights, [0; 4]);
    }

    #[test]
    fn test_update_adapts_weights_by_history_sign() {
        let mut lms = LmsState::new([-1, 0, 7, -9], [10, 10, 10, 10]);
        lms.update(0, 160);
        assert_eq!(lms.weights, [0, 20, 20, 0]);

        // -1 >> 4 stays -1
        let mut lms = LmsState::new([-1, 1, -1, 1], [0; 4]);
        lms.update(0, -1);
        assert_eq!(lms.weights, [1, -1, 1, -1]);
    }
}
