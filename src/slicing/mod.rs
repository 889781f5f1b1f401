// src/slicing/mod.rs
//! Cycle extraction and Fourier resampling
//!
//! Slicing never clamps: a frame range that does not fit the series is an
//! error. Resampling follows the real-FFT scheme: the spectrum is truncated or
//! zero-padded to the target length, with the shared Nyquist bin doubled when
//! downsampling and halved when upsampling an even-length spectrum.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;
use std::fmt;

use crate::error::GaitResult;
use crate::segmentation::FrameRange;
use crate::utils::{rate_relative_sample_count, validate_sample_rate, BoundsChecker};

/// Extract the half-open `range` of a series
pub fn slice(series: &[f64], range: FrameRange) -> GaitResult<Vec<f64>> {
    slice_named("series", series, range)
}

/// As [`slice`], naming the series in any error
pub fn slice_named(name: &str, series: &[f64], range: FrameRange) -> GaitResult<Vec<f64>> {
    let bounds = BoundsChecker::new(name).check_slice(range.start, range.end, series.len())?;
    Ok(series[bounds].to_vec())
}

/// Fourier-method resampler with a reusable FFT planner
pub struct Resampler {
    planner: FftPlanner<f64>,
}

impl fmt::Debug for Resampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resampler").finish()
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Resample `series` to exactly `num` samples
    pub fn resample(&mut self, series: &[f64], num: usize) -> GaitResult<Vec<f64>> {
        let checker = BoundsChecker::new("resample");
        checker.check_non_empty(series.len())?;
        checker.check_sample_count(num)?;

        let nx = series.len();
        if nx == num {
            return Ok(series.to_vec());
        }

        let mut spectrum: Vec<Complex64> = series.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        self.planner.plan_fft_forward(nx).process(&mut spectrum);

        // Half spectrum of the output, filled from the input's low bins
        let kept = nx.min(num);
        let mut half = vec![Complex64::new(0.0, 0.0); num / 2 + 1];
        let shared = kept / 2 + 1;
        half[..shared].copy_from_slice(&spectrum[..shared]);
        if kept % 2 == 0 {
            if num < nx {
                half[kept / 2] *= 2.0;
            } else {
                half[kept / 2] *= 0.5;
            }
        }

        // Hermitian extension to the full output spectrum
        let mut full = vec![Complex64::new(0.0, 0.0); num];
        full[..half.len()].copy_from_slice(&half);
        for (k, bin) in full.iter_mut().enumerate().skip(half.len()) {
            *bin = half[num - k].conj();
        }

        self.planner.plan_fft_inverse(num).process(&mut full);

        let scale = 1.0 / nx as f64;
        Ok(full.iter().map(|c| c.re * scale).collect())
    }

    /// Resample so the output covers the same duration at `target_hz`
    ///
    /// At least one sample is produced.
    pub fn resample_rate_relative(&mut self, series: &[f64], input_rate_hz: f64, target_hz: f64) -> GaitResult<Vec<f64>> {
        validate_sample_rate("input rate", input_rate_hz)?;
        validate_sample_rate("target rate", target_hz)?;
        let num = rate_relative_sample_count(series.len(), input_rate_hz, target_hz).max(1);
        self.resample(series, num)
    }
}

/// Resample `series` to exactly `num` samples
pub fn resample(series: &[f64], num: usize) -> GaitResult<Vec<f64>> {
    Resampler::new().resample(series, num)
}

/// Resample to `floor(len / input_rate_hz * target_hz)` samples, at least one
pub fn resample_rate_relative(series: &[f64], input_rate_hz: f64, target_hz: f64) -> GaitResult<Vec<f64>> {
    Resampler::new().resample_rate_relative(series, input_rate_hz, target_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaitError;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "sample {}: {} vs {}", i, a, e);
        }
    }

    fn sine(n: usize, periods: f64) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * periods * i as f64 / n as f64).sin()).collect()
    }

    #[test]
    fn test_slice_half_open() {
        let series: Vec<f64> = (0..300).map(f64::from).collect();
        let cycle = slice(&series, FrameRange::new(100, 220)).unwrap();

        assert_eq!(cycle.len(), 120);
        assert_eq!(cycle[0], 100.0);
        assert_eq!(cycle[119], 219.0);
    }

    #[test]
    fn test_slice_out_of_range_is_error() {
        let series = vec![0.0; 200];

        for range in [FrameRange::new(100, 201), FrameRange::new(-1, 10), FrameRange::new(50, 40)] {
            let err = slice_named("Knee Flexion Left", &series, range).unwrap_err();
            match err {
                GaitError::Slice { series, length, .. } => {
                    assert_eq!(series, "Knee Flexion Left");
                    assert_eq!(length, 200);
                }
                other => panic!("Expected slice error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_slice_to_end_is_valid() {
        let series = vec![1.0; 10];
        assert_eq!(slice(&series, FrameRange::new(10, 10)).unwrap().len(), 0);
        assert_eq!(slice(&series, FrameRange::new(0, 10)).unwrap().len(), 10);
    }

    #[test]
    fn test_resample_constant() {
        let out = resample(&[3.0; 40], 51).unwrap();
        assert_close(&out, &[3.0; 51], 1e-9);

        let out = resample(&[3.0; 40], 7).unwrap();
        assert_close(&out, &[3.0; 7], 1e-9);
    }

    #[test]
    fn test_resample_band_limited_sine() {
        // Whole periods are represented exactly on any grid above Nyquist
        let out = resample(&sine(64, 3.0), 100).unwrap();
        assert_close(&out, &sine(100, 3.0), 1e-9);

        let out = resample(&sine(100, 3.0), 64).unwrap();
        assert_close(&out, &sine(64, 3.0), 1e-9);
    }

    #[test]
    fn test_resample_identity_length() {
        let series = vec![1.0, -2.0, 5.5, 0.25];
        assert_eq!(resample(&series, 4).unwrap(), series);
    }

    #[test]
    fn test_resample_single_sample() {
        assert_close(&resample(&[2.5], 5).unwrap(), &[2.5; 5], 1e-12);
    }

    #[test]
    fn test_resample_rejects_degenerate_input() {
        assert!(matches!(resample(&[], 10), Err(GaitError::InvalidData { .. })));
        assert!(matches!(resample(&[1.0, 2.0], 0), Err(GaitError::InvalidData { .. })));
    }

    #[test]
    fn test_rate_relative_count() {
        // 1.5 s of analog data at 1000 Hz re-expressed at 250 Hz
        let out = resample_rate_relative(&vec![0.0; 1500], 1000.0, 250.0).unwrap();
        assert_eq!(out.len(), 375);

        let out = resample_rate_relative(&[1.0, 2.0], 1000.0, 100.0).unwrap();
        assert_eq!(out.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_resample_length_is_exact(
            series in prop::collection::vec(-1000.0f64..1000.0, 1..200),
            num in 1usize..300,
        ) {
            let out = resample(&series, num).unwrap();
            prop_assert_eq!(out.len(), num);
        }

        #[test]
        fn prop_slice_length(len in 0usize..500, start in 0i64..500, width in 0i64..500) {
            let series = vec![0.0; len];
            let range = FrameRange::new(start, start + width);
            let result = slice(&series, range);
            if (start + width) as usize <= len {
                prop_assert_eq!(result.unwrap().len(), width as usize);
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
