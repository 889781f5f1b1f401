// src/trial/kinetics.rs
//! Joint powers, moments and forces, one series per axis

use ndarray::{s, Array3};
use std::collections::BTreeMap;

use crate::classification::{ChannelCategory, ChannelGroups};
use crate::config::constants::channels::GROUND_REACTION_MARKER;
use crate::config::constants::recording::AXIS_NAMES;
use crate::error::GaitResult;
use crate::segmentation::{CycleBoundaries, CycleSide};
use super::{Clock, CycleSlices, SeriesMap};

/// Kinetic series keyed `{label}_{X|Y|Z}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KineticChannels {
    pub powers: CycleSlices,
    pub moments: CycleSlices,
    pub forces: CycleSlices,
}

impl KineticChannels {
    pub fn len(&self) -> usize {
        self.powers.len() + self.moments.len() + self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All categories merged per cycle
    pub fn by_side(&self) -> BTreeMap<CycleSide, SeriesMap> {
        let mut merged: BTreeMap<CycleSide, SeriesMap> = BTreeMap::new();
        for slices in [&self.powers, &self.moments, &self.forces] {
            for (side, series) in &slices.cycles {
                merged
                    .entry(*side)
                    .or_default()
                    .extend(series.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }
}

fn axis_series<'a>(
    labels: impl IntoIterator<Item = &'a String>,
    all_labels: &[String],
    point_data: &Array3<f64>,
) -> SeriesMap {
    let mut series = SeriesMap::new();
    for label in labels {
        let Some(channel) = all_labels.iter().position(|l| l == label) else {
            continue;
        };
        for (axis, axis_name) in AXIS_NAMES.iter().enumerate() {
            series.insert(
                format!("{}_{}", label, axis_name),
                point_data.slice(s![axis, channel, ..]).to_vec(),
            );
        }
    }
    series
}

pub fn build_kinetics(
    labels: &[String],
    groups: &ChannelGroups,
    point_data: &Array3<f64>,
    cycles: &CycleBoundaries,
) -> GaitResult<KineticChannels> {
    // Ground reaction channels count as forces whatever their category
    let ground_reaction = labels.iter().filter(|l| {
        l.contains(GROUND_REACTION_MARKER) && groups.category_of(l) != Some(ChannelCategory::Force)
    });
    let forces = groups.get(ChannelCategory::Force).iter().chain(ground_reaction);

    Ok(KineticChannels {
        powers: CycleSlices::build(
            axis_series(groups.get(ChannelCategory::Power), labels, point_data),
            cycles,
            Clock::Motion,
        )?,
        moments: CycleSlices::build(
            axis_series(groups.get(ChannelCategory::Moment), labels, point_data),
            cycles,
            Clock::Motion,
        )?,
        forces: CycleSlices::build(axis_series(forces, labels, point_data), cycles, Clock::Motion)?,
    })
}
