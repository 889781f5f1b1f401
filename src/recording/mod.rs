// src/recording/mod.rs
//! In-memory representation of a decoded motion-capture recording
//!
//! Decoding the binary file is left to a [`RecordingSource`] implementation.
//! Everything downstream works on the [`RawRecording`] it produces, which is
//! treated as immutable once built.

use ndarray::{s, Array2, Array3, ArrayView1};
use tracing::debug;

use crate::config::constants::recording::{DEFAULT_ANALOG_RATE_HZ, DEFAULT_POINT_RATE_HZ, POINT_AXES};
use crate::error::{GaitErrorBuilder, GaitResult};
use crate::utils::{validate_matching_length, validate_sample_rate, ValidationError};

/// Seam to whatever decodes a recording file
pub trait RecordingSource {
    /// Produce the decoded recording
    fn read_recording(&self) -> GaitResult<RawRecording>;

    /// Name used in logs and batch results
    fn source_name(&self) -> String;
}

impl RecordingSource for RawRecording {
    fn read_recording(&self) -> GaitResult<RawRecording> {
        Ok(self.clone())
    }

    fn source_name(&self) -> String {
        self.name.clone()
    }
}

/// Clock of one sampled section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionClock {
    pub first_frame: i64,
    pub rate_hz: f64,
}

/// Per-section clocks from the file header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingHeader {
    pub points: SectionClock,
    pub analogs: SectionClock,
}

impl Default for RecordingHeader {
    fn default() -> Self {
        Self {
            points: SectionClock { first_frame: 0, rate_hz: DEFAULT_POINT_RATE_HZ },
            analogs: SectionClock { first_frame: 0, rate_hz: DEFAULT_ANALOG_RATE_HZ },
        }
    }
}

/// EVENT parameter group, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventParameters {
    pub times: Vec<f64>,
    pub contexts: Vec<String>,
    pub labels: Vec<String>,
}

/// Explicit point group lists written by the modelling software
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointGroup {
    Angles,
    Powers,
    Moments,
    Forces,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointGroups {
    pub angles: Vec<String>,
    pub powers: Vec<String>,
    pub moments: Vec<String>,
    pub forces: Vec<String>,
}

impl PointGroups {
    pub fn get(&self, group: PointGroup) -> &[String] {
        match group {
            PointGroup::Angles => &self.angles,
            PointGroup::Powers => &self.powers,
            PointGroup::Moments => &self.moments,
            PointGroup::Forces => &self.forces,
        }
    }

    fn get_mut(&mut self, group: PointGroup) -> &mut Vec<String> {
        match group {
            PointGroup::Angles => &mut self.angles,
            PointGroup::Powers => &mut self.powers,
            PointGroup::Moments => &mut self.moments,
            PointGroup::Forces => &mut self.forces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty() && self.powers.is_empty() && self.moments.is_empty() && self.forces.is_empty()
    }
}

/// POINT parameter group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointParameters {
    pub labels: Vec<String>,
    pub groups: PointGroups,
}

/// ANALOG parameter group, index-aligned with `labels`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalogParameters {
    pub labels: Vec<String>,
    pub descriptions: Vec<String>,
    pub units: Vec<String>,
    pub scale: Vec<f64>,
    pub gain: Vec<f64>,
    pub offset: Vec<f64>,
}

impl AnalogParameters {
    /// Row of the first channel carrying `label`
    pub fn index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// A decoded recording: header, parameter tables and both sample arrays
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecording {
    pub name: String,
    pub header: RecordingHeader,
    pub events: EventParameters,
    pub points: PointParameters,
    pub analogs: AnalogParameters,
    pub subject_name: Option<String>,
    /// Motion samples, `[axis, channel, frame]`
    pub point_data: Array3<f64>,
    /// Analog samples, `[channel, frame]`
    pub analog_data: Array2<f64>,
}

impl RawRecording {
    pub fn point_frame_count(&self) -> usize {
        self.point_data.shape()[2]
    }

    pub fn analog_frame_count(&self) -> usize {
        self.analog_data.shape()[1]
    }

    /// One axis of one point channel
    pub fn point_series(&self, channel: usize, axis: usize) -> Option<ArrayView1<'_, f64>> {
        if axis >= POINT_AXES || channel >= self.point_data.shape()[1] {
            return None;
        }
        Some(self.point_data.slice(s![axis, channel, ..]))
    }

    pub fn analog_series(&self, channel: usize) -> Option<ArrayView1<'_, f64>> {
        if channel >= self.analog_data.shape()[0] {
            return None;
        }
        Some(self.analog_data.row(channel))
    }

    /// Check that parameter tables agree with each other and with the sample arrays
    pub fn validate(&self) -> GaitResult<()> {
        let err = || GaitErrorBuilder::new("recording", "validate");

        validate_sample_rate("points.rate_hz", self.header.points.rate_hz)?;
        validate_sample_rate("analogs.rate_hz", self.header.analogs.rate_hz)?;

        let event_count = self.events.times.len();
        validate_matching_length("events.contexts", event_count, self.events.contexts.len())?;
        validate_matching_length("events.labels", event_count, self.events.labels.len())?;

        let shape = self.point_data.shape();
        if shape[0] != POINT_AXES {
            return Err(ValidationError::InvalidArrayShape {
                field: "point_data".to_string(),
                actual: shape.to_vec(),
                expected: format!("[{}, channels, frames]", POINT_AXES),
            }
            .into());
        }
        if shape[1] != self.points.labels.len() {
            return Err(err().length_mismatch("point channels", self.points.labels.len(), shape[1]));
        }

        let analog_count = self.analogs.labels.len();
        if self.analog_data.shape()[0] != analog_count {
            return Err(err().length_mismatch("analog channels", analog_count, self.analog_data.shape()[0]));
        }
        validate_matching_length("analogs.descriptions", analog_count, self.analogs.descriptions.len())?;
        validate_matching_length("analogs.units", analog_count, self.analogs.units.len())?;

        for (field, table) in [
            ("analogs.scale", &self.analogs.scale),
            ("analogs.gain", &self.analogs.gain),
            ("analogs.offset", &self.analogs.offset),
        ] {
            if !table.is_empty() {
                validate_matching_length(field, analog_count, table.len())?;
            }
        }

        for group in [PointGroup::Angles, PointGroup::Powers, PointGroup::Moments, PointGroup::Forces] {
            if let Some(missing) = self
                .points
                .groups
                .get(group)
                .iter()
                .find(|label| !self.points.labels.contains(label))
            {
                return Err(err().invalid_data(
                    "point group",
                    &format!("{:?} lists '{}' which is not a point label", group, missing),
                ));
            }
        }

        Ok(())
    }
}

/// Assembles a [`RawRecording`] channel by channel
#[derive(Debug, Clone, Default)]
pub struct RecordingBuilder {
    name: String,
    header: RecordingHeader,
    events: EventParameters,
    points: PointParameters,
    analogs: AnalogParameters,
    subject_name: Option<String>,
    point_series: Vec<[Vec<f64>; POINT_AXES]>,
    analog_series: Vec<Vec<f64>>,
}

impl RecordingBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn point_clock(mut self, rate_hz: f64, first_frame: i64) -> Self {
        self.header.points = SectionClock { first_frame, rate_hz };
        self
    }

    pub fn analog_clock(mut self, rate_hz: f64, first_frame: i64) -> Self {
        self.header.analogs = SectionClock { first_frame, rate_hz };
        self
    }

    pub fn subject(mut self, name: &str) -> Self {
        self.subject_name = Some(name.to_string());
        self
    }

    /// Add an event with its raw CONTEXTS and LABELS strings
    pub fn event(mut self, time_s: f64, context: &str, label: &str) -> Self {
        self.events.times.push(time_s);
        self.events.contexts.push(context.to_string());
        self.events.labels.push(label.to_string());
        self
    }

    pub fn point_channel(mut self, label: &str, axes: [Vec<f64>; POINT_AXES]) -> Self {
        self.points.labels.push(label.to_string());
        self.point_series.push(axes);
        self
    }

    /// List a point label under an explicit group
    pub fn point_group(mut self, group: PointGroup, label: &str) -> Self {
        self.points.groups.get_mut(group).push(label.to_string());
        self
    }

    pub fn analog_channel(mut self, label: &str, description: &str, unit: &str, samples: Vec<f64>) -> Self {
        self.analogs.labels.push(label.to_string());
        self.analogs.descriptions.push(description.to_string());
        self.analogs.units.push(unit.to_string());
        self.analogs.scale.push(1.0);
        self.analogs.gain.push(1.0);
        self.analogs.offset.push(0.0);
        self.analog_series.push(samples);
        self
    }

    /// Pack the channels into sample arrays and validate the result
    pub fn build(self) -> GaitResult<RawRecording> {
        let err = || GaitErrorBuilder::new("recording", "build");

        let point_frames = self.point_series.first().map(|axes| axes[0].len()).unwrap_or(0);
        let mut point_data = Array3::<f64>::zeros((POINT_AXES, self.point_series.len(), point_frames));
        for (channel, axes) in self.point_series.iter().enumerate() {
            for (axis, samples) in axes.iter().enumerate() {
                if samples.len() != point_frames {
                    return Err(err().length_mismatch(
                        &format!("frames of point '{}'", self.points.labels[channel]),
                        point_frames,
                        samples.len(),
                    ));
                }
                for (frame, value) in samples.iter().enumerate() {
                    point_data[[axis, channel, frame]] = *value;
                }
            }
        }

        let analog_frames = self.analog_series.first().map(Vec::len).unwrap_or(0);
        let mut analog_data = Array2::<f64>::zeros((self.analog_series.len(), analog_frames));
        for (channel, samples) in self.analog_series.iter().enumerate() {
            if samples.len() != analog_frames {
                return Err(err().length_mismatch(
                    &format!("frames of analog '{}'", self.analogs.labels[channel]),
                    analog_frames,
                    samples.len(),
                ));
            }
            for (frame, value) in samples.iter().enumerate() {
                analog_data[[channel, frame]] = *value;
            }
        }

        let recording = RawRecording {
            name: self.name,
            header: self.header,
            events: self.events,
            points: self.points,
            analogs: self.analogs,
            subject_name: self.subject_name,
            point_data,
            analog_data,
        };
        recording.validate()?;

        debug!(
            name = %recording.name,
            points = recording.points.labels.len(),
            analogs = recording.analogs.labels.len(),
            "Built recording"
        );
        Ok(recording)
    }
}
