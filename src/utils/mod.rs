//! Common utility functions for gait trial processing
//!
//! - Bounds checking for frame-range extraction
//! - Validation of recording metadata
//! - Clock conversions between time and frame indices

pub mod bounds;
pub mod conversion;
pub mod validation;

pub use bounds::{check_slice_bounds, BoundsChecker, BoundsError, BoundsResult};

pub use conversion::{frame_to_time, rate_relative_sample_count, time_to_frame};

pub use validation::{
    validate_matching_length,
    validate_sample_rate,
    ValidationError,
    ValidationResult,
};
