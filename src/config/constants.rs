// src/config/constants.rs
//! System-wide constants for gait trial processing

/// Recording clock constants
pub mod recording {
    pub const DEFAULT_POINT_RATE_HZ: f64 = 120.0;
    pub const DEFAULT_ANALOG_RATE_HZ: f64 = 1000.0;
    pub const MIN_SAMPLE_RATE_HZ: f64 = 1.0;
    pub const MAX_SAMPLE_RATE_HZ: f64 = 100_000.0;

    /// Motion samples are stored as [axis, channel, frame]
    pub const POINT_AXES: usize = 3;
    pub const AXIS_NAMES: [&str; POINT_AXES] = ["X", "Y", "Z"];
}

/// Gait event constants
pub mod events {
    /// Events in one canonical full stride: strike, off, strike, off, strike, off, strike
    pub const CANONICAL_EVENT_COUNT: usize = 7;

    pub const CONTEXT_LEFT: &str = "Left";
    pub const CONTEXT_RIGHT: &str = "Right";
    pub const LABEL_FOOT_STRIKE: &str = "Foot Strike";
    pub const LABEL_FOOT_OFF: &str = "Foot Off";
}

/// Channel classification markers
pub mod channels {
    /// Unit substring marking a voltage (EMG candidate) channel, compared lowercase
    pub const VOLTAGE_UNIT_MARKER: &str = "v";
    /// Unit substring marking a force or moment channel, compared lowercase
    pub const FORCE_UNIT_MARKER: &str = "n";
    /// Foot-switch sync channels share voltage units with EMG
    pub const SYNC_LABEL_MARKERS: [&str; 2] = ["FSL", "FSR"];
    pub const MYOMETER_LABEL_MARKER: &str = "myometer";

    pub const ANGLE_MARKER: &str = "Angle";
    pub const POWER_MARKER: &str = "Power";
    pub const FORCE_MARKER: &str = "Force";
    pub const MOMENT_MARKER: &str = "Moment";
    pub const GROUND_REACTION_MARKER: &str = "Ground";
    pub const VIRTUAL_MARKER: &str = "*";
}

/// EMG normalization constants
pub mod emg {
    /// Electrode sites defined per trial: six muscles on each leg
    pub const CANONICAL_SITE_COUNT: usize = 12;
    pub const MAX_CHANNELS_USED: usize = 32;

    pub const MARKER_DELSYS_IM: &str = "Delsys IM EMG";
    pub const MARKER_EMG_CHANNEL: &str = "EMG Channel";
    pub const MARKER_DEVICE_VOLTAGE: &str = "Analog Device::Voltage";
    pub const MARKER_ANALOG_EMG_VOLTAGE: &str = "Analog EMG::Voltage";

    pub const EMG_LABEL_TAG: &str = "EMG";
    pub const SUPERSET_LABEL_PREFIX: &str = "BEMG";
    pub const SHORT_SIGNATURE_LABEL: &str = "LRF";
    pub const LONG_SIGNATURE_LABEL: &str = "L Rectus Femoris";
}

/// Time-normalized kinematics constants
pub mod kinematics {
    pub const DEFAULT_GPS_SAMPLE_COUNT: usize = 51;
    pub const MIN_GPS_SAMPLE_COUNT: usize = 1;
    pub const MAX_GPS_SAMPLE_COUNT: usize = 1001;
}

/// Muscle-synergy input constants
pub mod synergy {
    pub const DEFAULT_TARGET: u32 = 1000;
    pub const MIN_TARGET: u32 = 1;
    pub const MAX_TARGET: u32 = 100_000;
}

/// Configuration discovery
pub mod paths {
    pub const SYSTEM_CONFIG_PATH: &str = "/etc/gait-core/config.toml";
    pub const USER_CONFIG_DIR: &str = ".gait-core";
    pub const DEFAULT_CONFIG_FILE: &str = "gait-core.toml";
    pub const LOCAL_CONFIG_FILE: &str = "config/local.toml";

    /// Environment overrides look like `GAIT_SEGMENTATION__GPS_SAMPLE_COUNT=101`
    pub const ENV_PREFIX: &str = "GAIT_";
    pub const ENV_SECTION_SEPARATOR: &str = "__";
}
