// src/classification/mod.rs
//! Channel classification by label and unit heuristics
//!
//! Both classifiers are pure and total: every distinct label lands in exactly
//! one category, and the first matching rule decides which.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::config::constants::channels::*;
use crate::recording::{PointGroup, PointGroups};

/// Semantic channel category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelCategory {
    Angle,
    Power,
    Force,
    Moment,
    Marker,
    Emg,
    Forceplate,
    /// Residual bucket
    Other,
}

/// Disjoint partition of a section's labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelGroups {
    groups: BTreeMap<ChannelCategory, Vec<String>>,
}

impl ChannelGroups {
    fn insert(&mut self, category: ChannelCategory, label: &str) {
        self.groups.entry(category).or_default().push(label.to_string());
    }

    /// Labels in a category, in first-seen order
    pub fn get(&self, category: ChannelCategory) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn category_of(&self, label: &str) -> Option<ChannelCategory> {
        self.groups
            .iter()
            .find(|(_, labels)| labels.iter().any(|l| l == label))
            .map(|(category, _)| *category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelCategory, &[String])> {
        self.groups.iter().map(|(category, labels)| (*category, labels.as_slice()))
    }

    /// Total number of classified labels
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn point_category(label: &str) -> ChannelCategory {
    if label.contains(ANGLE_MARKER) {
        ChannelCategory::Angle
    } else if label.contains(POWER_MARKER) {
        ChannelCategory::Power
    } else if label.contains(FORCE_MARKER) {
        ChannelCategory::Force
    } else if label.contains(MOMENT_MARKER) {
        ChannelCategory::Moment
    } else if label.contains(VIRTUAL_MARKER) {
        ChannelCategory::Other
    } else {
        ChannelCategory::Marker
    }
}

fn analog_category(label: &str, unit: &str) -> ChannelCategory {
    let unit = unit.to_lowercase();
    if label.contains(MYOMETER_LABEL_MARKER) {
        ChannelCategory::Other
    } else if unit.contains(VOLTAGE_UNIT_MARKER) && !SYNC_LABEL_MARKERS.iter().any(|m| label.contains(m)) {
        ChannelCategory::Emg
    } else if unit.contains(FORCE_UNIT_MARKER) {
        ChannelCategory::Forceplate
    } else {
        ChannelCategory::Other
    }
}

/// Classify motion labels: Angle, Power, Force, Moment, virtual (`*`) as Other, else Marker
pub fn classify_points<S: AsRef<str>>(labels: &[S]) -> ChannelGroups {
    let mut groups = ChannelGroups::default();
    let mut seen = HashSet::new();
    for label in labels.iter().map(AsRef::as_ref) {
        if seen.insert(label) {
            groups.insert(point_category(label), label);
        }
    }
    groups
}

/// Classify motion labels, preferring the recording's explicit group lists
pub fn classify_points_with_groups<S: AsRef<str>>(labels: &[S], explicit: &PointGroups) -> ChannelGroups {
    if explicit.is_empty() {
        return classify_points(labels);
    }

    let explicit_category = |label: &str| {
        [
            (PointGroup::Angles, ChannelCategory::Angle),
            (PointGroup::Powers, ChannelCategory::Power),
            (PointGroup::Forces, ChannelCategory::Force),
            (PointGroup::Moments, ChannelCategory::Moment),
        ]
        .into_iter()
        .find(|(group, _)| explicit.get(*group).iter().any(|l| l == label))
        .map(|(_, category)| category)
    };

    let mut groups = ChannelGroups::default();
    let mut seen = HashSet::new();
    for label in labels.iter().map(AsRef::as_ref) {
        if seen.insert(label) {
            let category = explicit_category(label).unwrap_or_else(|| point_category(label));
            groups.insert(category, label);
        }
    }
    groups
}

/// Classify analog labels by unit: voltage as EMG (sync channels excluded), force units as Forceplate
///
/// Units are index-aligned with labels; a missing unit counts as empty.
pub fn classify_analogs<S: AsRef<str>, U: AsRef<str>>(labels: &[S], units: &[U]) -> ChannelGroups {
    let mut groups = ChannelGroups::default();
    let mut seen = HashSet::new();
    for (i, label) in labels.iter().map(AsRef::as_ref).enumerate() {
        if seen.insert(label) {
            let unit = units.get(i).map(AsRef::as_ref).unwrap_or("");
            groups.insert(analog_category(label, unit), label);
        }
    }
    groups
}
