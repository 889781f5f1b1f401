// src/emg/mod.rs
//! EMG label-set detection and normalization
//!
//! Recording hardware has emitted several naming schemes for the same twelve
//! electrode sites. A trial's scheme is detected once, its static table is
//! selected, and every EMG channel is rewritten to a canonical `{side}{muscle}`
//! code. Channels a table marks as spare are kept apart from the canonical
//! set; channels it does not know pass through under their raw label.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

use crate::config::constants::channels::VOLTAGE_UNIT_MARKER;
use crate::config::constants::emg::*;
use crate::diagnostics::{DiagnosticCode, Diagnostics};

/// Body side of an electrode site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn code(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

/// Muscles instrumented on each leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Muscle {
    RectusFemoris,
    VastusMedialis,
    MedialHamstrings,
    TibialisAnterior,
    MedialGastrocnemius,
    Soleus,
}

impl Muscle {
    pub const ALL: [Muscle; 6] = [
        Muscle::RectusFemoris,
        Muscle::VastusMedialis,
        Muscle::MedialHamstrings,
        Muscle::TibialisAnterior,
        Muscle::MedialGastrocnemius,
        Muscle::Soleus,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Muscle::RectusFemoris => "RF",
            Muscle::VastusMedialis => "VM",
            Muscle::MedialHamstrings => "MH",
            Muscle::TibialisAnterior => "TA",
            Muscle::MedialGastrocnemius => "MG",
            Muscle::Soleus => "SOL",
        }
    }
}

/// One of the twelve canonical electrode sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CanonicalSite {
    pub side: Side,
    pub muscle: Muscle,
}

impl CanonicalSite {
    /// All sites, left leg first, in muscle order
    pub fn all() -> impl Iterator<Item = CanonicalSite> {
        [Side::Left, Side::Right]
            .into_iter()
            .flat_map(|side| Muscle::ALL.into_iter().map(move |muscle| CanonicalSite { side, muscle }))
    }

    pub fn code(self) -> String {
        format!("{}{}", self.side.code(), self.muscle.code())
    }

    pub fn parse(code: &str) -> Option<CanonicalSite> {
        Self::all().find(|site| site.code() == code)
    }
}

impl fmt::Display for CanonicalSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Recognised raw naming generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmgLabelSet {
    /// `EMG1`..`EMG12`
    Numbered,
    /// `BEMG1`..`BEMG16`, four spares
    Superset,
    /// Canonical codes written directly, e.g. `LRF`
    ShortMuscle,
    /// Muscle names truncated to 16 characters, e.g. `L Rectus Femoris`
    LongMuscle,
    /// Delsys IM sensors, `LRF.IM EMG1`..`RSOL.IM EMG16`
    DelsysIm,
    /// `Voltage.EMG1`..`Voltage.EMG12`
    DeviceVoltage,
    /// Numbered muscle codes with six broken channels, `LRF01`..`RRF16`
    AnalogEmg,
    Unknown,
}

const TWELVE_SITE_ORDER: [&str; 12] = [
    "LRF", "LVM", "LMH", "LTA", "LMG", "LSOL", "RRF", "RVM", "RMH", "RTA", "RMG", "RSOL",
];

const NUMBERED_LABELS: [&str; 12] = [
    "EMG1", "EMG2", "EMG3", "EMG4", "EMG5", "EMG6", "EMG7", "EMG8", "EMG9", "EMG10", "EMG11", "EMG12",
];

const SUPERSET_LABELS: [&str; 12] = [
    "BEMG1", "BEMG2", "BEMG3", "BEMG4", "BEMG5", "BEMG6", "BEMG7", "BEMG8", "BEMG9", "BEMG10", "BEMG11", "BEMG12",
];
const SUPERSET_SPARES: [&str; 4] = ["BEMG13", "BEMG14", "BEMG15", "BEMG16"];

const DEVICE_VOLTAGE_LABELS: [&str; 12] = [
    "Voltage.EMG1", "Voltage.EMG2", "Voltage.EMG3", "Voltage.EMG4", "Voltage.EMG5", "Voltage.EMG6",
    "Voltage.EMG7", "Voltage.EMG8", "Voltage.EMG9", "Voltage.EMG10", "Voltage.EMG11", "Voltage.EMG12",
];

const LONG_MUSCLE_LABELS: [&str; 12] = [
    "L Rectus Femoris", "L Vastus Mediali", "L Medial Hamstri", "L Tibialis Anter", "L Medial Gastroc", "L Soleus",
    "R Rectus Femoris", "R Vastus Mediali", "R Medial Hamstri", "R Tibialis Anter", "R Medial Gastroc", "R Soleus",
];

const DELSYS_IM_TABLE: [(&str, &str); 12] = [
    ("LRF.IM EMG1", "LRF"),
    ("LVM.IM EMG2", "LVM"),
    ("LSM.IM EMG3", "LMH"),
    ("LTA.IM EMG5", "LTA"),
    ("LMG.IM EMG7", "LMG"),
    ("LSOL.IM EMG8", "LSOL"),
    ("RRF.IM EMG9", "RRF"),
    ("RVM.IM EMG10", "RVM"),
    ("RSM.IM EMG11", "RMH"),
    ("RTA.IM EMG13", "RTA"),
    ("RMG.IM EMG15", "RMG"),
    ("RSOL.IM EMG16", "RSOL"),
];
const DELSYS_IM_SPARES: [&str; 4] = ["LST.IM EMG4", "LPR.IM EMG6", "RST.IM EMG12", "RPR.IM EMG14"];

const ANALOG_EMG_TABLE: [(&str, &str); 10] = [
    ("LRF01", "LRF"),
    ("LMH02", "LMH"),
    ("RVM09", "RVM"),
    ("LVM10", "LVM"),
    ("LTA11", "LTA"),
    ("LMG12", "LMG"),
    ("RMG13", "RMG"),
    ("RTA14", "RTA"),
    ("RMH15", "RMH"),
    ("RRF16", "RRF"),
];
const ANALOG_EMG_SPARES: [&str; 6] = ["BROKEN03", "BROKEN04", "BROKEN05", "BROKEN06", "BROKEN07", "BROKEN08"];

/// Where a raw label goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelTarget {
    Canonical(String),
    Spare,
}

/// Raw label table for one naming generation
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    label_set: EmgLabelSet,
    entries: BTreeMap<String, LabelTarget>,
}

/// Override value that moves a raw label into the spare bucket
pub const SPARE_OVERRIDE: &str = "spare";

impl LabelMap {
    fn from_tables(label_set: EmgLabelSet, mapped: &[(&str, &str)], spares: &[&str]) -> Self {
        let mut entries: BTreeMap<String, LabelTarget> = mapped
            .iter()
            .map(|(raw, code)| (raw.to_string(), LabelTarget::Canonical(code.to_string())))
            .collect();
        entries.extend(spares.iter().map(|raw| (raw.to_string(), LabelTarget::Spare)));
        Self { label_set, entries }
    }

    fn in_site_order(label_set: EmgLabelSet, raw: &[&str; 12], spares: &[&str]) -> Self {
        let mapped: Vec<(&str, &str)> = raw.iter().copied().zip(TWELVE_SITE_ORDER).collect();
        Self::from_tables(label_set, &mapped, spares)
    }

    pub fn label_set(&self) -> EmgLabelSet {
        self.label_set
    }

    pub fn lookup(&self, raw: &str) -> Option<&LabelTarget> {
        self.entries.get(raw)
    }

    /// Distinct canonical codes the table can produce
    pub fn canonical_codes(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .filter_map(|target| match target {
                LabelTarget::Canonical(code) => Some(code.as_str()),
                LabelTarget::Spare => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply raw label remappings; a value of `"spare"` demotes the label
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (raw, target) in overrides {
            let target = if target.eq_ignore_ascii_case(SPARE_OVERRIDE) {
                LabelTarget::Spare
            } else {
                LabelTarget::Canonical(target.clone())
            };
            debug!(raw = %raw, target = ?target, "Applying EMG mapping override");
            self.entries.insert(raw.clone(), target);
        }
        self
    }
}

/// Static table for a naming generation
pub fn label_map_for(label_set: EmgLabelSet) -> LabelMap {
    match label_set {
        EmgLabelSet::Numbered => LabelMap::in_site_order(label_set, &NUMBERED_LABELS, &[]),
        EmgLabelSet::Superset => LabelMap::in_site_order(label_set, &SUPERSET_LABELS, &SUPERSET_SPARES),
        EmgLabelSet::ShortMuscle => LabelMap::in_site_order(label_set, &TWELVE_SITE_ORDER, &[]),
        EmgLabelSet::LongMuscle => LabelMap::in_site_order(label_set, &LONG_MUSCLE_LABELS, &[]),
        EmgLabelSet::DeviceVoltage => LabelMap::in_site_order(label_set, &DEVICE_VOLTAGE_LABELS, &[]),
        EmgLabelSet::DelsysIm => LabelMap::from_tables(label_set, &DELSYS_IM_TABLE, &DELSYS_IM_SPARES),
        EmgLabelSet::AnalogEmg => LabelMap::from_tables(label_set, &ANALOG_EMG_TABLE, &ANALOG_EMG_SPARES),
        EmgLabelSet::Unknown => LabelMap::from_tables(label_set, &[], &[]),
    }
}

/// What decided the label set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionSource {
    /// Vendor marker in the description of this analog channel
    Description { channel: String },
    LabelSignature,
    Configured,
    Undetected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label_set: EmgLabelSet,
    pub source: DetectionSource,
    pub diagnostics: Diagnostics,
}

impl Detection {
    /// Use a configured label set without inspecting the recording
    pub fn configured(label_set: EmgLabelSet) -> Self {
        Self {
            label_set,
            source: DetectionSource::Configured,
            diagnostics: Diagnostics::new(),
        }
    }
}

const DESCRIPTION_MARKERS: [(&str, EmgLabelSet); 4] = [
    (MARKER_DELSYS_IM, EmgLabelSet::DelsysIm),
    (MARKER_EMG_CHANNEL, EmgLabelSet::Numbered),
    (MARKER_DEVICE_VOLTAGE, EmgLabelSet::DeviceVoltage),
    (MARKER_ANALOG_EMG_VOLTAGE, EmgLabelSet::AnalogEmg),
];

fn is_voltage(unit: &str) -> bool {
    unit.to_lowercase().contains(VOLTAGE_UNIT_MARKER)
}

fn label_signature<S: AsRef<str>>(labels: &[S]) -> Option<EmgLabelSet> {
    let emg_tagged: Vec<&str> = labels
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| l.contains(EMG_LABEL_TAG))
        .collect();
    let superset_count = emg_tagged.iter().filter(|l| l.starts_with(SUPERSET_LABEL_PREFIX)).count();

    let candidate = if superset_count > CANONICAL_SITE_COUNT {
        EmgLabelSet::Superset
    } else if emg_tagged.len() == CANONICAL_SITE_COUNT {
        EmgLabelSet::Numbered
    } else if emg_tagged.is_empty() && labels.iter().any(|l| l.as_ref() == SHORT_SIGNATURE_LABEL) {
        EmgLabelSet::ShortMuscle
    } else if emg_tagged.is_empty() && labels.iter().any(|l| l.as_ref() == LONG_SIGNATURE_LABEL) {
        EmgLabelSet::LongMuscle
    } else {
        return None;
    };

    // The table must know every EMG-tagged label it would be applied to
    let map = label_map_for(candidate);
    if let Some(unknown) = emg_tagged.iter().find(|l| map.lookup(l).is_none()) {
        debug!(candidate = ?candidate, label = %unknown, "Label signature rejected");
        return None;
    }
    Some(candidate)
}

/// Detect the naming generation of a trial's analog channels
///
/// Voltage channels are scanned in order and the first description carrying
/// a vendor marker decides. Failing that, the label signatures of known
/// generations are tried. Inputs are index-aligned.
pub fn detect_label_set<L, D, U>(labels: &[L], descriptions: &[D], units: &[U]) -> Detection
where
    L: AsRef<str>,
    D: AsRef<str>,
    U: AsRef<str>,
{
    let mut diagnostics = Diagnostics::new();
    let mut voltage_channels = 0usize;

    for (i, unit) in units.iter().enumerate() {
        if !is_voltage(unit.as_ref()) {
            continue;
        }
        voltage_channels += 1;
        let description = descriptions.get(i).map(AsRef::as_ref).unwrap_or("");
        if let Some((_, label_set)) = DESCRIPTION_MARKERS.iter().find(|(marker, _)| description.contains(marker)) {
            let channel = labels.get(i).map(|l| l.as_ref().to_string()).unwrap_or_default();
            info!(label_set = ?label_set, channel = %channel, "Detected EMG label set from description");
            return Detection {
                label_set: *label_set,
                source: DetectionSource::Description { channel },
                diagnostics,
            };
        }
    }

    if let Some(label_set) = label_signature(labels) {
        info!(label_set = ?label_set, "Detected EMG label set from label signature");
        return Detection {
            label_set,
            source: DetectionSource::LabelSignature,
            diagnostics,
        };
    }

    if voltage_channels > 0 {
        diagnostics.push(
            DiagnosticCode::UnrecognizedLabelSet,
            format!("{} voltage channels match no known EMG naming scheme", voltage_channels),
        );
    }
    Detection {
        label_set: EmgLabelSet::Unknown,
        source: DetectionSource::Undetected,
        diagnostics,
    }
}

/// Result of rewriting a trial's EMG labels
#[derive(Debug, Clone, PartialEq)]
pub struct EmgNormalization {
    pub label_set: EmgLabelSet,
    /// Raw label and canonical code, in input order
    pub canonical: Vec<(String, String)>,
    /// Known non-canonical channels, raw labels
    pub spares: Vec<String>,
    /// Labels absent from the table, kept unchanged
    pub passthrough: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl EmgNormalization {
    pub fn canonical_code(&self, raw: &str) -> Option<&str> {
        self.canonical
            .iter()
            .find(|(r, _)| r == raw)
            .map(|(_, code)| code.as_str())
    }
}

/// Rewrite raw EMG labels, flagging more than twelve channels for review
pub fn normalize<S: AsRef<str>>(map: &LabelMap, raw_labels: &[S]) -> EmgNormalization {
    normalize_with_limit(map, raw_labels, CANONICAL_SITE_COUNT)
}

/// As [`normalize`] with a configurable surplus threshold
pub fn normalize_with_limit<S: AsRef<str>>(map: &LabelMap, raw_labels: &[S], max_channels: usize) -> EmgNormalization {
    let mut result = EmgNormalization {
        label_set: map.label_set(),
        canonical: Vec::new(),
        spares: Vec::new(),
        passthrough: Vec::new(),
        diagnostics: Diagnostics::new(),
    };
    let mut claimed: BTreeSet<String> = BTreeSet::new();

    for raw in raw_labels.iter().map(AsRef::as_ref) {
        match map.lookup(raw) {
            Some(LabelTarget::Canonical(code)) if claimed.insert(code.clone()) => {
                result.canonical.push((raw.to_string(), code.clone()));
            }
            Some(LabelTarget::Canonical(code)) => {
                debug!(raw = %raw, code = %code, "Canonical code already taken, keeping channel as spare");
                result.spares.push(raw.to_string());
            }
            Some(LabelTarget::Spare) => result.spares.push(raw.to_string()),
            None => {
                if map.label_set() != EmgLabelSet::Unknown {
                    result.diagnostics.push(
                        DiagnosticCode::LabelLookupMiss,
                        format!("'{}' is not in the {:?} table", raw, map.label_set()),
                    );
                }
                result.passthrough.push(raw.to_string());
            }
        }
    }

    if raw_labels.len() > max_channels {
        result.diagnostics.push(
            DiagnosticCode::EmgChannelSurplus,
            format!(
                "{} EMG channels for {} canonical sites; check which set to use",
                raw_labels.len(),
                max_channels
            ),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_COVERAGE: [EmgLabelSet; 4] = [
        EmgLabelSet::Numbered,
        EmgLabelSet::Superset,
        EmgLabelSet::ShortMuscle,
        EmgLabelSet::LongMuscle,
    ];

    fn raw_labels_for(set: EmgLabelSet) -> Vec<&'static str> {
        match set {
            EmgLabelSet::Numbered => NUMBERED_LABELS.to_vec(),
            EmgLabelSet::Superset => SUPERSET_LABELS.iter().chain(SUPERSET_SPARES.iter()).copied().collect(),
            EmgLabelSet::ShortMuscle => TWELVE_SITE_ORDER.to_vec(),
            EmgLabelSet::LongMuscle => LONG_MUSCLE_LABELS.to_vec(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_canonical_sites() {
        let codes: Vec<String> = CanonicalSite::all().map(CanonicalSite::code).collect();
        assert_eq!(codes, TWELVE_SITE_ORDER.to_vec());
        assert_eq!(
            CanonicalSite::parse("RSOL"),
            Some(CanonicalSite { side: Side::Right, muscle: Muscle::Soleus })
        );
        assert_eq!(CanonicalSite::parse("LXX"), None);
    }

    #[test]
    fn test_full_coverage_sets_yield_twelve_distinct_codes() {
        for set in FULL_COVERAGE {
            let map = label_map_for(set);
            let result = normalize(&map, &raw_labels_for(set));

            let codes: BTreeSet<&str> = result.canonical.iter().map(|(_, c)| c.as_str()).collect();
            assert_eq!(result.canonical.len(), 12, "{:?}", set);
            assert_eq!(codes.len(), 12, "{:?}", set);
            assert!(codes.iter().all(|c| CanonicalSite::parse(c).is_some()));
        }
    }

    #[test]
    fn test_superset_keeps_spares_and_flags_review() {
        let map = label_map_for(EmgLabelSet::Superset);
        let result = normalize(&map, &raw_labels_for(EmgLabelSet::Superset));

        assert_eq!(result.spares, vec!["BEMG13", "BEMG14", "BEMG15", "BEMG16"]);
        assert!(result.passthrough.is_empty());
        assert!(result.diagnostics.has(DiagnosticCode::EmgChannelSurplus));
        assert!(result.diagnostics.needs_review());
    }

    #[test]
    fn test_delsys_semimembranosus_maps_to_hamstrings() {
        let map = label_map_for(EmgLabelSet::DelsysIm);
        let raw = ["LSM.IM EMG3", "LST.IM EMG4", "RPR.IM EMG14"];
        let result = normalize(&map, &raw);

        assert_eq!(result.canonical_code("LSM.IM EMG3"), Some("LMH"));
        assert_eq!(result.spares, vec!["LST.IM EMG4", "RPR.IM EMG14"]);
    }

    #[test]
    fn test_analog_emg_broken_channels_are_spares() {
        let map = label_map_for(EmgLabelSet::AnalogEmg);
        assert_eq!(map.canonical_codes().len(), 10);
        let result = normalize(&map, &["LRF01", "BROKEN05", "RRF16"]);
        assert_eq!(result.canonical_code("RRF16"), Some("RRF"));
        assert_eq!(result.spares, vec!["BROKEN05"]);
    }

    #[test]
    fn test_lookup_miss_passes_through() {
        let map = label_map_for(EmgLabelSet::Numbered);
        let result = normalize(&map, &["EMG1", "EMG13"]);

        assert_eq!(result.passthrough, vec!["EMG13"]);
        assert_eq!(result.diagnostics.count(DiagnosticCode::LabelLookupMiss), 1);
        assert!(!result.diagnostics.has(DiagnosticCode::EmgChannelSurplus));
    }

    #[test]
    fn test_unknown_set_is_identity() {
        let map = label_map_for(EmgLabelSet::Unknown);
        let result = normalize(&map, &["Sensor A", "Sensor B"]);

        assert!(result.canonical.is_empty());
        assert_eq!(result.passthrough, vec!["Sensor A", "Sensor B"]);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_overrides_select_superset_channels() {
        let mut overrides = BTreeMap::new();
        overrides.insert("BEMG3".to_string(), "spare".to_string());
        overrides.insert("BEMG15".to_string(), "LMH".to_string());
        let map = label_map_for(EmgLabelSet::Superset).with_overrides(&overrides);

        let result = normalize(&map, &raw_labels_for(EmgLabelSet::Superset));
        assert_eq!(result.canonical_code("BEMG15"), Some("LMH"));
        assert!(result.spares.contains(&"BEMG3".to_string()));
        assert_eq!(result.canonical.len(), 12);
    }

    #[test]
    fn test_detect_from_description_marker() {
        let detection = detect_label_set(
            &["Force.Fz1", "EMG1", "EMG2"],
            &["Force plate", "EMG Channel 1", "Delsys IM EMG"],
            &["N", "V", "V"],
        );

        assert_eq!(detection.label_set, EmgLabelSet::Numbered);
        assert_eq!(detection.source, DetectionSource::Description { channel: "EMG1".to_string() });
    }

    #[test]
    fn test_marker_on_non_voltage_channel_is_ignored() {
        let detection = detect_label_set(&["X"], &["Delsys IM EMG"], &["N"]);
        assert_eq!(detection.label_set, EmgLabelSet::Unknown);
        assert!(detection.diagnostics.is_empty());
    }

    #[test]
    fn test_detect_from_label_signature() {
        let superset = raw_labels_for(EmgLabelSet::Superset);
        let units = vec!["V"; superset.len()];
        let descriptions = vec![""; superset.len()];
        let detection = detect_label_set(&superset, &descriptions, &units);
        assert_eq!(detection.label_set, EmgLabelSet::Superset);
        assert_eq!(detection.source, DetectionSource::LabelSignature);

        let long = detect_label_set(&LONG_MUSCLE_LABELS, &[""; 12], &["mV"; 12]);
        assert_eq!(long.label_set, EmgLabelSet::LongMuscle);

        let short = detect_label_set(&TWELVE_SITE_ORDER, &[""; 12], &["mV"; 12]);
        assert_eq!(short.label_set, EmgLabelSet::ShortMuscle);
    }

    #[test]
    fn test_signature_requires_table_coverage() {
        let voltage: Vec<String> = (1..=12).map(|i| format!("Voltage.EMG{}", i)).collect();
        let detection = detect_label_set(&voltage, &vec!["Amplifier"; 12], &vec!["V"; 12]);
        assert_eq!(detection.label_set, EmgLabelSet::Unknown);
        assert!(detection.diagnostics.has(DiagnosticCode::UnrecognizedLabelSet));

        let result = normalize(&label_map_for(detection.label_set), &voltage);
        assert_eq!(result.passthrough, voltage);
        assert!(!result.diagnostics.has(DiagnosticCode::LabelLookupMiss));

        let detection = detect_label_set(&SUPERSET_LABELS, &[""; 12], &["V"; 12]);
        assert_eq!(detection.label_set, EmgLabelSet::Unknown);
        assert!(detection.diagnostics.has(DiagnosticCode::UnrecognizedLabelSet));

        let detection = detect_label_set(&NUMBERED_LABELS, &[""; 12], &["V"; 12]);
        assert_eq!(detection.label_set, EmgLabelSet::Numbered);
        assert_eq!(detection.source, DetectionSource::LabelSignature);
    }

    #[test]
    fn test_undetected_voltage_channels_raise_warning() {
        let detection = detect_label_set(&["Sensor A"], &["Some Amplifier"], &["V"]);
        assert_eq!(detection.label_set, EmgLabelSet::Unknown);
        assert!(detection.diagnostics.has(DiagnosticCode::UnrecognizedLabelSet));
    }
}
