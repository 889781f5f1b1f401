// src/config/mod.rs
//! Analysis configuration

pub mod constants;
pub mod loader;
pub mod schema_validator;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};
pub use schema_validator::{SchemaValidator, ValidationError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::emg::EmgLabelSet;
use crate::segmentation::CycleSide;

/// Complete analysis configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub emg: EmgConfig,
    #[serde(default)]
    pub synergy: SynergyConfig,
}

/// Cycle segmentation and time normalization settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Samples per time-normalized (GPS) kinematic cycle
    #[serde(default = "defaults::gps_sample_count")]
    pub gps_sample_count: usize,
}

/// EMG label normalization settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EmgConfig {
    /// Force a naming generation instead of detecting it
    #[serde(default)]
    pub label_set: Option<EmgLabelSet>,

    /// Keep only these canonical channels in the EMG output
    #[serde(default)]
    pub channels_used: Option<Vec<String>>,

    /// EMG-tagged channel count above which a trial is flagged for review
    #[serde(default = "defaults::max_canonical_channels")]
    pub max_canonical_channels: usize,

    /// Raw label -> canonical code remappings applied on top of the detected
    /// table; the value `"spare"` moves a raw label into the spare bucket
    #[serde(default)]
    pub mapping_overrides: BTreeMap<String, String>,
}

/// Muscle-synergy input settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SynergyConfig {
    #[serde(default = "defaults::synergy_cycle")]
    pub cycle: CycleSide,

    #[serde(default = "defaults::synergy_mode")]
    pub mode: SynergyResampleMode,

    /// Target frequency (Hz) in `frequency` mode, sample count in `count` mode
    #[serde(default = "defaults::synergy_target")]
    pub target: u32,

    /// Row order of the synergy matrix; empty means all canonical sites
    #[serde(default)]
    pub channels: Vec<String>,
}

/// How synergy input rows are resampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynergyResampleMode {
    /// Samples scaled by cycle duration times the target frequency
    Frequency,
    /// Fixed sample count
    Count,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;
    use crate::segmentation::CycleSide;
    use super::SynergyResampleMode;

    pub fn gps_sample_count() -> usize { kinematics::DEFAULT_GPS_SAMPLE_COUNT }
    pub fn max_canonical_channels() -> usize { emg::CANONICAL_SITE_COUNT }
    pub fn synergy_cycle() -> CycleSide { CycleSide::Left }
    pub fn synergy_mode() -> SynergyResampleMode { SynergyResampleMode::Frequency }
    pub fn synergy_target() -> u32 { synergy::DEFAULT_TARGET }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            gps_sample_count: defaults::gps_sample_count(),
        }
    }
}

impl Default for EmgConfig {
    fn default() -> Self {
        Self {
            label_set: None,
            channels_used: None,
            max_canonical_channels: defaults::max_canonical_channels(),
            mapping_overrides: BTreeMap::new(),
        }
    }
}

impl Default for SynergyConfig {
    fn default() -> Self {
        Self {
            cycle: defaults::synergy_cycle(),
            mode: defaults::synergy_mode(),
            target: defaults::synergy_target(),
            channels: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration consistency
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.segmentation.gps_sample_count < kinematics::MIN_GPS_SAMPLE_COUNT {
            errors.push("GPS sample count must be at least 1".to_string());
        }

        if self.synergy.target < synergy::MIN_TARGET {
            errors.push("Synergy target must be at least 1".to_string());
        }

        if let Some(used) = &self.emg.channels_used {
            for channel in &self.synergy.channels {
                if !used.contains(channel) {
                    errors.push(format!(
                        "Synergy channel '{}' is not among the EMG channels used",
                        channel
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
