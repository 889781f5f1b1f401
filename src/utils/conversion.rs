//! Conversion utilities between the recording clocks
//!
//! A recording carries two independent clocks: the motion ("points") clock
//! and the analog clock, each with its own rate and first-frame offset.

/// Convert an event time to a frame index on a clock
///
/// The frame is `floor(time * rate) - first_frame`, so it is relative to the
/// first frame stored in the sample arrays and may be negative for events
/// recorded before it.
pub fn time_to_frame(time_s: f64, rate_hz: f64, first_frame: i64) -> i64 {
    (time_s * rate_hz).floor() as i64 - first_frame
}

/// Convert a frame index back to seconds on a clock
pub fn frame_to_time(frame: i64, rate_hz: f64, first_frame: i64) -> f64 {
    (frame + first_frame) as f64 / rate_hz
}

/// Number of samples covering `length` input samples at `input_rate_hz`
/// when re-expressed at `target_hz`
pub fn rate_relative_sample_count(length: usize, input_rate_hz: f64, target_hz: f64) -> usize {
    ((length as f64 / input_rate_hz) * target_hz).floor() as usize
}
