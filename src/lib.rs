//! Gait-Core: gait-cycle extraction from motion-capture recordings
//!
//! This library turns a decoded motion-capture recording into clinically
//! meaningful gait-cycle data. It features:
//!
//! - Channel classification of point and analog labels
//! - EMG label normalization across hardware naming generations
//! - Event organization on the motion and analog clocks
//! - Left, right and full gait-cycle segmentation
//! - Cycle slicing and Fourier resampling
//! - Layered configuration and parallel batch processing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gait_core::{AnalysisConfig, RecordingBuilder, TrialAnalysis};
//!
//! fn main() -> Result<(), gait_core::GaitError> {
//!     let recording = RecordingBuilder::new("walk01")
//!         .event(1.0, "Left", "Foot Strike")
//!         .event(2.2, "Left", "Foot Strike")
//!         .build()?;
//!
//!     let analysis = TrialAnalysis::from_recording(&recording, &AnalysisConfig::default())?;
//!     let output = analysis.output();
//!     println!("Left cycle: {:?}", output.cycles);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod batch;
pub mod classification;
pub mod config;
pub mod diagnostics;
pub mod emg;
pub mod error;
pub mod events;
pub mod recording;
pub mod segmentation;
pub mod slicing;
pub mod trial;
pub mod utils;

// Re-export commonly used types for convenience
pub use batch::{process_batch, process_sources, BatchSummary, TrialOutcome};
pub use classification::{classify_analogs, classify_points, classify_points_with_groups, ChannelCategory, ChannelGroups};
pub use config::{AnalysisConfig, ConfigError, ConfigLoader};
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use emg::{detect_label_set, label_map_for, normalize, CanonicalSite, EmgLabelSet, EmgNormalization, LabelMap};
pub use error::{ErrorContext, GaitError, GaitResult};
pub use events::{organize, Event, EventKind, EventSet, EventSide};
pub use recording::{RawRecording, RecordingBuilder, RecordingSource};
pub use segmentation::{segment, CycleBoundaries, CycleSide, FrameRange, GaitCycle};
pub use slicing::{resample, resample_rate_relative, slice, Resampler};
pub use trial::{TrialAnalysis, TrialOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Gait-cycle extraction from motion-capture recordings".to_string(),
        features: vec![
            "Channel classification".to_string(),
            "EMG label normalization".to_string(),
            "Gait cycle segmentation".to_string(),
            "Fourier resampling".to_string(),
            "Parallel batch processing".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.name, NAME);
        assert_eq!(info.version, VERSION);
        assert!(!info.features.is_empty());
    }

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "gait-core");
    }
}
