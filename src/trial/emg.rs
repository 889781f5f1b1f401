// src/trial/emg.rs
//! Normalized EMG series and muscle-synergy input

use ndarray::Array2;
use tracing::{debug, warn};

use crate::classification::{classify_analogs, ChannelCategory};
use crate::config::{EmgConfig, SynergyConfig, SynergyResampleMode};
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::emg::{detect_label_set, label_map_for, normalize_with_limit, CanonicalSite, Detection, EmgLabelSet};
use crate::error::{GaitErrorBuilder, GaitResult};
use crate::recording::AnalogParameters;
use crate::segmentation::{CycleBoundaries, CycleSide};
use crate::slicing::Resampler;
use crate::utils::{rate_relative_sample_count, validate_sample_rate};
use super::{Clock, CycleSlices, SeriesMap};

/// EMG series after label normalization
#[derive(Debug, Clone, PartialEq)]
pub struct EmgChannels {
    pub label_set: EmgLabelSet,
    pub analog_rate_hz: f64,
    /// Keyed by canonical code
    pub canonical: CycleSlices,
    /// Keyed by raw label
    pub spares: CycleSlices,
    /// Labels the active table does not know, keyed by raw label
    pub passthrough: CycleSlices,
    pub diagnostics: Diagnostics,
}

/// How synergy rows are resampled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynergyResample {
    /// Keep the cycle's duration at this rate (Hz)
    Frequency(f64),
    /// Fixed number of samples
    Count(usize),
}

impl SynergyResample {
    pub fn from_config(config: &SynergyConfig) -> Self {
        match config.mode {
            SynergyResampleMode::Frequency => SynergyResample::Frequency(f64::from(config.target)),
            SynergyResampleMode::Count => SynergyResample::Count(config.target as usize),
        }
    }
}

/// Muscle-synergy input matrix, one row per channel found
#[derive(Debug, Clone, PartialEq)]
pub struct SynergyInput {
    pub side: CycleSide,
    pub channels: Vec<String>,
    pub matrix: Array2<f64>,
    pub diagnostics: Diagnostics,
}

pub fn build_emg(
    analogs: &AnalogParameters,
    analog_data: &Array2<f64>,
    analog_rate_hz: f64,
    cycles: &CycleBoundaries,
    config: &EmgConfig,
) -> GaitResult<EmgChannels> {
    let groups = classify_analogs(&analogs.labels, &analogs.units);
    let emg_labels = groups.get(ChannelCategory::Emg);

    let detection = match config.label_set {
        Some(label_set) => Detection::configured(label_set),
        None => detect_label_set(&analogs.labels, &analogs.descriptions, &analogs.units),
    };
    let map = label_map_for(detection.label_set).with_overrides(&config.mapping_overrides);
    let normalization = normalize_with_limit(&map, emg_labels, config.max_canonical_channels);

    let row = |raw: &str| -> GaitResult<Vec<f64>> {
        analogs
            .index(raw)
            .map(|i| analog_data.row(i).to_vec())
            .ok_or_else(|| {
                GaitErrorBuilder::new("emg", "build").invalid_data("analog channel", &format!("'{}' has no samples", raw))
            })
    };

    let mut canonical = SeriesMap::new();
    for (raw, code) in &normalization.canonical {
        canonical.insert(code.clone(), row(raw)?);
    }
    let mut spares = SeriesMap::new();
    for raw in &normalization.spares {
        spares.insert(raw.clone(), row(raw)?);
    }
    let mut passthrough = SeriesMap::new();
    for raw in &normalization.passthrough {
        passthrough.insert(raw.clone(), row(raw)?);
    }

    let mut canonical = CycleSlices::build(canonical, cycles, Clock::Analog)?;
    let spares = CycleSlices::build(spares, cycles, Clock::Analog)?;
    let mut passthrough = CycleSlices::build(passthrough, cycles, Clock::Analog)?;

    if let Some(used) = &config.channels_used {
        canonical.retain(|name| used.iter().any(|u| u == name));
        passthrough.retain(|name| used.iter().any(|u| u == name));
        debug!(kept = canonical.len() + passthrough.len(), "Filtered EMG channels");
    }

    let mut diagnostics = detection.diagnostics;
    diagnostics.extend(normalization.diagnostics);

    Ok(EmgChannels {
        label_set: detection.label_set,
        analog_rate_hz,
        canonical,
        spares,
        passthrough,
        diagnostics,
    })
}

/// Stack the requested channels of one cycle into a synergy input matrix
///
/// An empty `labels` list requests all twelve canonical sites. Channels not
/// present are reported and left out of the matrix.
pub fn synergy_input(
    emg: &EmgChannels,
    labels: &[String],
    side: CycleSide,
    resample: SynergyResample,
) -> GaitResult<SynergyInput> {
    let err = || GaitErrorBuilder::new("emg", "synergy_input");
    let requested: Vec<String> = if labels.is_empty() {
        CanonicalSite::all().map(CanonicalSite::code).collect()
    } else {
        labels.to_vec()
    };

    let cycle = emg
        .canonical
        .cycle(side)
        .ok_or_else(|| err().invalid_data("cycle", &format!("no {} cycle to build synergy input from", side)))?;
    let passthrough = emg.passthrough.cycle(side);

    let mut diagnostics = Diagnostics::new();
    let mut found: Vec<(&String, &Vec<f64>)> = Vec::new();
    for label in &requested {
        match cycle.get(label).or_else(|| passthrough.and_then(|p| p.get(label))) {
            Some(series) => found.push((label, series)),
            None => diagnostics.push(DiagnosticCode::MissingSynergyChannel, format!("{} not in {} cycle", label, side)),
        }
    }

    let Some((_, first)) = found.first() else {
        warn!(side = %side, "No synergy channels available");
        return Ok(SynergyInput {
            side,
            channels: Vec::new(),
            matrix: Array2::zeros((0, 0)),
            diagnostics,
        });
    };

    let samples = match resample {
        SynergyResample::Count(count) => count,
        SynergyResample::Frequency(target_hz) => {
            validate_sample_rate("synergy target", target_hz)?;
            rate_relative_sample_count(first.len(), emg.analog_rate_hz, target_hz).max(1)
        }
    };

    let mut resampler = Resampler::new();
    let mut matrix = Array2::<f64>::zeros((found.len(), samples));
    for (mut row, (_, series)) in matrix.rows_mut().into_iter().zip(&found) {
        let resampled = resampler.resample(series, samples)?;
        for (dst, src) in row.iter_mut().zip(resampled) {
            *dst = src;
        }
    }

    Ok(SynergyInput {
        side,
        channels: found.iter().map(|(label, _)| (*label).clone()).collect(),
        matrix,
        diagnostics,
    })
}
