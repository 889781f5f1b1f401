// src/trial/kinematics.rs
//! Clinical joint-angle series and their time-normalized (GPS) form

use ndarray::{s, Array3};
use tracing::debug;

use crate::classification::{ChannelCategory, ChannelGroups};
use crate::error::GaitResult;
use crate::segmentation::{CycleBoundaries, CycleSide};
use crate::slicing::Resampler;
use super::{Clock, CycleSlices, SeriesMap};

/// Angle channel label, axis, clinical series name
pub const KINEMATIC_CHANNELS: [(&str, usize, &str); 18] = [
    ("LPelvisAngles", 0, "Pelvic Tilt Left"),
    ("RPelvisAngles", 0, "Pelvic Tilt Right"),
    ("LHipAngles", 0, "Hip Flexion Left"),
    ("RHipAngles", 0, "Hip Flexion Right"),
    ("LKneeAngles", 0, "Knee Flexion Left"),
    ("RKneeAngles", 0, "Knee Flexion Right"),
    ("LAnkleAngles", 0, "Ankle Dorsiflexion Left"),
    ("RAnkleAngles", 0, "Ankle Dorsiflexion Right"),
    ("LPelvisAngles", 1, "Pelvic Obliquity Left"),
    ("RPelvisAngles", 1, "Pelvic Obliquity Right"),
    ("LHipAngles", 1, "Hip Abduction Left"),
    ("RHipAngles", 1, "Hip Abduction Right"),
    ("LPelvisAngles", 2, "Pelvic Rotation Left"),
    ("RPelvisAngles", 2, "Pelvic Rotation Right"),
    ("LHipAngles", 2, "Hip Rotation Left"),
    ("RHipAngles", 2, "Hip Rotation Right"),
    ("LFootProgressAngles", 2, "Foot Progression Left"),
    ("RFootProgressAngles", 2, "Foot Progression Right"),
];

/// Clinical kinematic series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KinematicChannels {
    pub slices: CycleSlices,
}

/// Kinematics resampled to a fixed number of points per cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsKinematics {
    pub sample_count: usize,
    pub series: SeriesMap,
}

/// Exact label first, then the first angle label containing it
fn find_angle_channel(labels: &[String], angles: &[String], wanted: &str) -> Option<usize> {
    let matched = angles
        .iter()
        .find(|l| l.as_str() == wanted)
        .or_else(|| angles.iter().find(|l| l.contains(wanted)))?;
    labels.iter().position(|l| l == matched)
}

pub fn build_kinematics(
    labels: &[String],
    groups: &ChannelGroups,
    point_data: &Array3<f64>,
    cycles: &CycleBoundaries,
) -> GaitResult<KinematicChannels> {
    let angles = groups.get(ChannelCategory::Angle);
    let mut trial = SeriesMap::new();

    for (label, axis, name) in KINEMATIC_CHANNELS {
        match find_angle_channel(labels, angles, label) {
            Some(channel) => {
                trial.insert(name.to_string(), point_data.slice(s![axis, channel, ..]).to_vec());
            }
            None => debug!(label, "Angle channel not present"),
        }
    }

    Ok(KinematicChannels {
        slices: CycleSlices::build(trial, cycles, Clock::Motion)?,
    })
}

/// Resample left-side series over the left cycle and the rest over the right cycle
pub fn build_gps(kinematics: &KinematicChannels, sample_count: usize) -> GaitResult<GpsKinematics> {
    let mut resampler = Resampler::new();
    let mut series = SeriesMap::new();

    for name in kinematics.slices.names() {
        let side = if name.contains("Left") { CycleSide::Left } else { CycleSide::Right };
        if let Some(cycle) = kinematics.slices.get(side, name) {
            if cycle.is_empty() {
                continue;
            }
            series.insert(name.to_string(), resampler.resample(cycle, sample_count)?);
        }
    }

    Ok(GpsKinematics { sample_count, series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::classify_points;
    use crate::segmentation::{FrameRange, GaitCycle};

    fn boundaries(left: (i64, i64), right: (i64, i64)) -> CycleBoundaries {
        let cycle = |side, (start, end)| GaitCycle {
            side,
            motion_frames: FrameRange::new(start, end),
            analog_frames: FrameRange::new(start * 10, end * 10),
        };
        CycleBoundaries {
            left: Some(cycle(CycleSide::Left, left)),
            right: Some(cycle(CycleSide::Right, right)),
            full: None,
            diagnostics: Default::default(),
        }
    }

    fn point_data(channels: usize, frames: usize) -> Array3<f64> {
        Array3::from_shape_fn((3, channels, frames), |(axis, channel, frame)| {
            (axis * 1000 + channel * 100) as f64 + frame as f64
        })
    }

    #[test]
    fn test_eighteen_named_series() {
        let labels: Vec<String> = ["LPelvisAngles", "RPelvisAngles", "LHipAngles", "RHipAngles", "LKneeAngles",
            "RKneeAngles", "LAnkleAngles", "RAnkleAngles", "LFootProgressAngles", "RFootProgressAngles"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let groups = classify_points(&labels);
        let kinematics =
            build_kinematics(&labels, &groups, &point_data(labels.len(), 60), &boundaries((10, 30), (20, 50))).unwrap();

        assert_eq!(kinematics.slices.len(), 18);
        // LHipAngles is channel 2, axis 2
        assert_eq!(kinematics.slices.trial["Hip Rotation Left"][0], 2200.0);
        assert_eq!(kinematics.slices.get(CycleSide::Left, "Hip Rotation Left").unwrap().len(), 20);
        assert_eq!(kinematics.slices.get(CycleSide::Right, "Knee Flexion Right").unwrap()[0], 520.0);
        assert!(kinematics.slices.cycle(CycleSide::Full).is_none());
    }

    #[test]
    fn test_altered_label_substring_match() {
        let labels = vec!["Subject:LKneeAngles".to_string()];
        let groups = classify_points(&labels);
        let kinematics = build_kinematics(&labels, &groups, &point_data(1, 40), &boundaries((0, 10), (5, 15))).unwrap();

        assert!(kinematics.slices.trial.contains_key("Knee Flexion Left"));
        assert_eq!(kinematics.slices.len(), 1);
    }

    #[test]
    fn test_cycle_beyond_data_fails() {
        let labels = vec!["LKneeAngles".to_string()];
        let groups = classify_points(&labels);
        let result = build_kinematics(&labels, &groups, &point_data(1, 25), &boundaries((0, 10), (5, 30)));
        assert!(result.is_err());
    }

    #[test]
    fn test_gps_side_selection() {
        let labels = vec!["LKneeAngles".to_string(), "RKneeAngles".to_string()];
        let groups = classify_points(&labels);
        let kinematics = build_kinematics(&labels, &groups, &point_data(2, 80), &boundaries((0, 40), (10, 70))).unwrap();
        let gps = build_gps(&kinematics, 51).unwrap();

        assert_eq!(gps.series.len(), 2);
        assert!(gps.series.values().all(|s| s.len() == 51));
        // Fourier resampling keeps the cycle's first sample
        assert!(gps.series["Knee Flexion Left"][0].abs() < 10.0);
        assert!((gps.series["Knee Flexion Right"][0] - 110.0).abs() < 10.0);
    }
}
