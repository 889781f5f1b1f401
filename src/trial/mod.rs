// src/trial/mod.rs
//! Trial composition
//!
//! A [`TrialAnalysis`] is assembled from independently built facets. Each
//! facet is produced by a free function that receives only the parts of the
//! recording it reads, together with the segmented cycles.

pub mod emg;
pub mod kinematics;
pub mod kinetics;

pub use emg::{build_emg, synergy_input, EmgChannels, SynergyInput, SynergyResample};
pub use kinematics::{build_gps, build_kinematics, GpsKinematics, KinematicChannels, KINEMATIC_CHANNELS};
pub use kinetics::{build_kinetics, KineticChannels};

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, info_span};

use crate::classification::classify_points_with_groups;
use crate::config::AnalysisConfig;
use crate::diagnostics::Diagnostics;
use crate::emg::EmgLabelSet;
use crate::error::{GaitErrorBuilder, GaitResult};
use crate::events::{organize_recording, Event, EventSet};
use crate::recording::RawRecording;
use crate::segmentation::{segment, CycleBoundaries, CycleSide, FrameRange, GaitCycle};
use crate::slicing::slice_named;

/// Named series keyed by channel name
pub type SeriesMap = BTreeMap<String, Vec<f64>>;

/// Which sample clock a series runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Motion,
    Analog,
}

impl Clock {
    fn range(self, cycle: &GaitCycle) -> FrameRange {
        match self {
            Clock::Motion => cycle.motion_frames,
            Clock::Analog => cycle.analog_frames,
        }
    }
}

/// Whole-trial series and their per-cycle slices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleSlices {
    pub trial: SeriesMap,
    pub cycles: BTreeMap<CycleSide, SeriesMap>,
}

impl CycleSlices {
    /// Slice every series over each cycle that was found
    pub fn build(trial: SeriesMap, boundaries: &CycleBoundaries, clock: Clock) -> GaitResult<Self> {
        let mut cycles = BTreeMap::new();
        for cycle in boundaries.cycles() {
            let range = clock.range(cycle);
            let sliced = trial
                .iter()
                .map(|(name, series)| Ok((name.clone(), slice_named(name, series, range)?)))
                .collect::<GaitResult<SeriesMap>>()?;
            cycles.insert(cycle.side, sliced);
        }
        Ok(Self { trial, cycles })
    }

    pub fn cycle(&self, side: CycleSide) -> Option<&SeriesMap> {
        self.cycles.get(&side)
    }

    pub fn get(&self, side: CycleSide, name: &str) -> Option<&[f64]> {
        self.cycles.get(&side)?.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trial.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.trial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trial.is_empty()
    }

    /// Keep only series whose name satisfies `keep`
    pub fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.trial.retain(|name, _| keep(name));
        for series in self.cycles.values_mut() {
            series.retain(|name, _| keep(name));
        }
    }
}

/// Everything extracted from one recording
#[derive(Debug, Clone)]
pub struct TrialAnalysis {
    pub name: String,
    pub subject: Option<String>,
    pub events: EventSet,
    pub cycles: CycleBoundaries,
    pub kinematics: KinematicChannels,
    pub kinetics: KineticChannels,
    pub emg: EmgChannels,
    pub gps: GpsKinematics,
    pub diagnostics: Diagnostics,
    config: AnalysisConfig,
}

impl TrialAnalysis {
    /// Organize events, segment cycles and extract every facet
    ///
    /// Fails on a trial without events, on structurally inconsistent data,
    /// and when a cycle's frame range does not fit a channel.
    pub fn from_recording(recording: &RawRecording, config: &AnalysisConfig) -> GaitResult<Self> {
        let span = info_span!("trial", name = %recording.name);
        let _enter = span.enter();

        if let Err(errors) = config.validate_consistency() {
            return Err(GaitErrorBuilder::new("trial", "from_recording").configuration(&errors.join("; ")));
        }
        recording.validate()?;

        let events = organize_recording(recording)?;
        let cycles = segment(&events);

        let point_groups = classify_points_with_groups(&recording.points.labels, &recording.points.groups);
        let kinematics = build_kinematics(&recording.points.labels, &point_groups, &recording.point_data, &cycles)?;
        let kinetics = build_kinetics(&recording.points.labels, &point_groups, &recording.point_data, &cycles)?;
        let emg = build_emg(
            &recording.analogs,
            &recording.analog_data,
            recording.header.analogs.rate_hz,
            &cycles,
            &config.emg,
        )?;
        let gps = build_gps(&kinematics, config.segmentation.gps_sample_count)?;

        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(events.diagnostics.clone());
        diagnostics.extend(cycles.diagnostics.clone());
        diagnostics.extend(emg.diagnostics.clone());

        info!(
            kinematics = kinematics.slices.len(),
            kinetics = kinetics.len(),
            emg = emg.canonical.len(),
            diagnostics = diagnostics.len(),
            "Processed trial"
        );

        Ok(Self {
            name: recording.name.clone(),
            subject: recording.subject_name.clone(),
            events,
            cycles,
            kinematics,
            kinetics,
            emg,
            gps,
            diagnostics,
            config: config.clone(),
        })
    }

    /// Muscle-synergy input for the configured cycle, channels and resampling
    pub fn synergy_input(&self) -> GaitResult<SynergyInput> {
        let synergy = &self.config.synergy;
        synergy_input(&self.emg, &synergy.channels, synergy.cycle, SynergyResample::from_config(synergy))
    }

    /// Serializable output contract
    pub fn output(&self) -> TrialOutput {
        let by_side = |slices: &CycleSlices| {
            slices
                .cycles
                .iter()
                .map(|(side, series)| (*side, series.clone()))
                .collect::<BTreeMap<_, _>>()
        };

        TrialOutput {
            trial: self.name.clone(),
            subject: self.subject.clone(),
            emg_label_set: self.emg.label_set,
            events: self.events.events.clone(),
            cycles: self.cycles.cycles().map(|c| (c.side, *c)).collect(),
            kinematics: by_side(&self.kinematics.slices),
            kinetics: self.kinetics.by_side(),
            emg: by_side(&self.emg.canonical),
            emg_spares: by_side(&self.emg.spares),
            emg_passthrough: by_side(&self.emg.passthrough),
            gps_kinematics: self.gps.series.clone(),
            needs_review: self.diagnostics.needs_review(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// Output of one trial: channel name to samples, partitioned by cycle and category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutput {
    pub trial: String,
    pub subject: Option<String>,
    pub emg_label_set: EmgLabelSet,
    pub events: Vec<Event>,
    pub cycles: BTreeMap<CycleSide, GaitCycle>,
    pub kinematics: BTreeMap<CycleSide, SeriesMap>,
    pub kinetics: BTreeMap<CycleSide, SeriesMap>,
    /// Keyed by canonical code
    pub emg: BTreeMap<CycleSide, SeriesMap>,
    pub emg_spares: BTreeMap<CycleSide, SeriesMap>,
    /// Keyed by raw label, never merged into `emg`
    pub emg_passthrough: BTreeMap<CycleSide, SeriesMap>,
    pub gps_kinematics: SeriesMap,
    pub needs_review: bool,
    pub diagnostics: Diagnostics,
}
