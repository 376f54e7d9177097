//! Dequantization and decoding of 64-bit slices.

use crate::lms::LmsState;
use crate::QOA_SLICE_LEN;

/// Scale factors indexed by the 4-bit code at the top of a slice.
pub const QOA_SCALEFACTOR_TAB: [i32; 16] = [
    1, 7, 21, 45, 84, 138, 211, 304, 421, 562, 731, 928, 1157, 1419, 1715, 2048,
];

/// The residual dequantization steps `{0.75, -0.75, 2.5, -2.5, 4.5, -4.5, 7, -7}`
/// expressed in quarters.
const QOA_DEQUANT_QUARTERS: [i32; 8] = [3, -3, 10, -10, 18, -18, 28, -28];

/// `round(scalefactor * step)` for every scale factor and residual code,
/// rounding halves away from zero.
pub const QOA_DEQUANT_TAB: [[i32; 8]; 16] = build_dequant_tab();

const fn build_dequant_tab() -> [[i32; 8]; 16] {
    let mut tab = [[0; 8]; 16];
    let mut sf = 0;
    while sf < 16 {
        let mut q = 0;
        while q < 8 {
            let quarters = QOA_SCALEFACTOR_TAB[sf] * QOA_DEQUANT_QUARTERS[q];
            tab[sf][q] = if quarters < 0 {
                -((-quarters + 2) / 4)
            } else {
                (quarters + 2) / 4
            };
            q += 1;
        }
        sf += 1;
    }
    tab
}

/// Dequantized residual for a scale factor index and a residual code.
/// Only the low 4 and 3 bits of the arguments are used.
#[inline(always)]
pub fn dequantize(sf_quant: u8, residual_code: u8) -> i32 {
    QOA_DEQUANT_TAB[(sf_quant & 0xf) as usize][(residual_code & 0x7) as usize]
}

/// Decodes one slice into 20 samples and advances `lms` by the same.
///
/// All 20 samples are always produced; the caller drops any beyond the
/// frame's sample count.
pub fn decode_slice(mut slice: u64, lms: &mut LmsState) -> [i16; QOA_SLICE_LEN] {
    let sf_quant = (slice >> 60) as u8;
    slice <<= 4;

    let mut samples = [0_i16; QOA_SLICE_LEN];
    for sample in &mut samples {
        let residual_code = (slice >> 61) as u8;
        slice <<= 3;

        let dequantized = dequantize(sf_quant, residual_code);
        let predicted = lms.predict();
        let reconstructed = (i64::from(predicted) + i64::from(dequantized))
            .clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16;

        lms.update(reconstructed, dequantized);
        *sample = reconstructed;
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::pack_slice;
    use rstest::rstest;

    /// The table as published with the format.
    const PUBLISHED_DEQUANT_TAB: [[i32; 8]; 16] = [
        [1, -1, 3, -3, 5, -5, 7, -7],
        [5, -5, 18, -18, 32, -32, 49, -49],
        [16, -16, 53, -53, 95, -95, 147, -147],
        [34, -34, 113, -113, 203, -203, 315, -315],
        [63, -63, 210, -210, 378, -378, 588, -588],
        [104, -104, 345, -345, 621, -621, 966, -966],
        [158, -158, 528, -528, 950, -950, 1477, -1477],
        [228, -228, 760, -760, 1368, -1368, 2128, -2128],
        [316, -316, 1053, -1053, 1895, -1895, 2947, -2947],
        [422, -422, 1405, -1405, 2529, -2529, 3934, -3934],
        [548, -548, 1828, -1828, 3290, -3290, 5117, -5117],
        [696, -696, 2320, -2320, 4176, -4176, 6496, -6496],
        [868, -868, 2893, -2893, 5207, -5207, 8099, -8099],
        [1064, -1064, 3548, -3548, 6386, -6386, 9933, -9933],
        [1286, -1286, 4288, -4288, 7718, -7718, 12005, -12005],
        [1536, -1536, 5120, -5120, 9216, -9216, 14336, -14336],
    ];

    #[test]
    fn test_dequant_table_matches_published() {
        assert_eq!(QOA_DEQUANT_TAB, PUBLISHED_DEQUANT_TAB);
    }

    #[test]
    fn test_dequant_table_matches_float_rounding() {
        const STEPS: [f64; 8] = [0.75, -0.75, 2.5, -2.5, 4.5, -4.5, 7.0, -7.0];
        for (sf, row) in QOA_DEQUANT_TAB.iter().enumerate() {
            for (q, &value) in row.iter().enumerate() {
                let expected = (f64::from(QOA_SCALEFACTOR_TAB[sf]) * STEPS[q]).round() as i32;
                assert_eq!(value, expected, "sf={sf} q={q}");
            }
        }
    }

    #[rstest]
    #[case(0, 0, 1)]
    #[case(0, 1, -1)]
    #[case(1, 2, 18)]
    #[case(15, 7, -14336)]
    fn test_dequantize(#[case] sf: u8, #[case] code: u8, #[case] expected: i32) {
        assert_eq!(dequantize(sf, code), expected);
    }

    #[test]
    fn test_code_zero_from_zero_state() {
        let mut lms = LmsState::default();
        let samples = decode_slice(pack_slice(0, [0; 20]), &mut lms);
        assert_eq!(samples, [1; 20]);
        assert_eq!(lms.history, [1; 4]);
        assert_eq!(lms.weights, [0; 4]);
    }

    #[test]
    fn test_regression_vector() {
        let mut lms = LmsState::new([100, -200, 300, -400], [0, 0, -(1 << 13), 1 << 14]);
        let codes: [u8; 20] = std::array::from_fn(|i| (i % 8) as u8);
        let samples = decode_slice(pack_slice(3, codes), &mut lms);
        assert_eq!(
            samples,
            [
                -1066, -1766, -2354, -3052, -3552, -4246, -4635, -5315, -5977, -6687, -7308,
                -8047, -8616, -9379, -9870, -10640, -11431, -12305, -13135, -14111,
            ]
        );
        assert_eq!(lms.history, [-11431, -12305, -13135, -14111]);
        assert_eq!(lms.weights, [28, 4, -8178, 16394]);
    }

    #[test]
    fn test_residuals_are_read_msb_first() {
        // Only the first residual is non-zero.
        let mut codes = [0_u8; 20];
        codes[0] = 6;
        let slice = pack_slice(0, codes);
        assert_eq!(slice >> 57, 6);

        let mut lms = LmsState::default();
        let samples = decode_slice(slice, &mut lms);
        assert_eq!(samples[0], 7);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut lms = LmsState::new([i16::MAX; 4], [1 << 13; 4]);
        let samples = decode_slice(pack_slice(15, [6; 20]), &mut lms);
        assert!(samples.iter().all(|&s| s == i16::MAX));

        let mut lms = LmsState::new([i16::MIN; 4], [1 << 13; 4]);
        let samples = decode_slice(pack_slice(15, [7; 20]), &mut lms);
        assert!(samples.iter().all(|&s| s == i16::MIN));
    }

    #[test]
    fn test_history_holds_last_samples() {
        let mut lms = LmsState::new([5, 6, 7, 8], [0; 4]);
        let codes: [u8; 20] = std::array::from_fn(|i| ((i + 2) % 8) as u8);
        let samples = decode_slice(pack_slice(4, codes), &mut lms);
        let expected: Vec<i32> = samples[16..].iter().map(|&s| i32::from(s)).collect();
        assert_eq!(lms.history.to_vec(), expected);
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let slice = 0x9c3a_51e7_0042_d1f3;
        let start = LmsState::new([-3, 900, -27, 14], [120, -4000, 2048, 9000]);
        let mut a = start.clone();
        let mut b = start;
        assert_eq!(decode_slice(slice, &mut a), decode_slice(slice, &mut b));
        assert_eq!(a, b);
    }
}
