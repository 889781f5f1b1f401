//! Validation utilities for recording metadata
//!
//! The file reader hands over parameter tables and sample arrays that are
//! expected to agree with each other. These helpers check that agreement
//! before any trial processing starts.

use std::fmt;

use crate::config::constants::recording;
use crate::error::{ErrorContext, GaitError};

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value out of valid range
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },
    /// Two tables that must describe the same channels disagree in length
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    /// Array size violation
    InvalidArrayShape {
        field: String,
        actual: Vec<usize>,
        expected: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfRange { field, value, min, max } => {
                write!(f, "Field '{}' value '{}' is out of range [{}, {}]", field, value, min, max)
            }
            ValidationError::LengthMismatch { field, expected, actual } => {
                write!(f, "Field '{}' has {} entries, expected {}", field, actual, expected)
            }
            ValidationError::InvalidArrayShape { field, actual, expected } => {
                write!(f, "Array '{}' has shape {:?}, expected {}", field, actual, expected)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for GaitError {
    fn from(err: ValidationError) -> Self {
        let (expected, actual) = match &err {
            ValidationError::LengthMismatch { expected, actual, .. } => {
                (Some(expected.to_string()), Some(actual.to_string()))
            }
            _ => (None, None),
        };
        GaitError::InvalidData {
            data_type: "recording".to_string(),
            reason: err.to_string(),
            expected,
            actual,
            context: ErrorContext::new("recording", "validate"),
        }
    }
}

/// Validate a clock sample rate
pub fn validate_sample_rate(field: &str, rate_hz: f64) -> ValidationResult<()> {
    if !rate_hz.is_finite() || rate_hz < recording::MIN_SAMPLE_RATE_HZ || rate_hz > recording::MAX_SAMPLE_RATE_HZ {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: rate_hz.to_string(),
            min: recording::MIN_SAMPLE_RATE_HZ.to_string(),
            max: recording::MAX_SAMPLE_RATE_HZ.to_string(),
        });
    }
    Ok(())
}

/// Validate that a parameter table has one entry per channel
pub fn validate_matching_length(field: &str, expected: usize, actual: usize) -> ValidationResult<()> {
    if expected != actual {
        return Err(ValidationError::LengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
