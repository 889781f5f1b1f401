//! Bounds checking utilities for frame-range extraction
//!
//! Frame ranges come from event timestamps and sample rates, so a bad rate
//! or a corrupted timestamp surfaces here first. Ranges are never clamped.

use std::fmt;
use std::ops::Range;

/// Bounds checking error types
#[derive(Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// Slice bounds invalid for the series
    SliceBoundsInvalid {
        start: i64,
        end: i64,
        length: usize,
        context: String,
    },
    /// Operation requires at least one sample
    EmptySeries { context: String },
    /// Requested output length is unusable
    InvalidSampleCount { requested: usize, context: String },
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::SliceBoundsInvalid { start, end, length, context } => {
                write!(f, "Slice bounds [{}..{}) invalid for length {} in {}", start, end, length, context)
            }
            BoundsError::EmptySeries { context } => {
                write!(f, "Series {} has no samples", context)
            }
            BoundsError::InvalidSampleCount { requested, context } => {
                write!(f, "Sample count {} invalid in {}", requested, context)
            }
        }
    }
}

impl std::error::Error for BoundsError {}

/// Result type for bounds checking operations
pub type BoundsResult<T> = Result<T, BoundsError>;

/// Bounds checker carrying a context label for error reporting
#[derive(Debug, Clone)]
pub struct BoundsChecker {
    context: String,
}

impl BoundsChecker {
    /// Create new bounds checker
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
        }
    }

    /// Check a signed half-open range against a series length and convert it
    /// to an index range
    pub fn check_slice(&self, start: i64, end: i64, length: usize) -> BoundsResult<Range<usize>> {
        if start < 0 || start > end || end > length as i64 {
            return Err(BoundsError::SliceBoundsInvalid {
                start,
                end,
                length,
                context: self.context.clone(),
            });
        }
        Ok(start as usize..end as usize)
    }

    /// Check that a series is non-empty
    pub fn check_non_empty(&self, length: usize) -> BoundsResult<()> {
        if length == 0 {
            return Err(BoundsError::EmptySeries {
                context: self.context.clone(),
            });
        }
        Ok(())
    }

    /// Check that a requested sample count is at least one
    pub fn check_sample_count(&self, requested: usize) -> BoundsResult<()> {
        if requested == 0 {
            return Err(BoundsError::InvalidSampleCount {
                requested,
                context: self.context.clone(),
            });
        }
        Ok(())
    }
}

/// Check slice bounds without constructing a checker
pub fn check_slice_bounds(start: i64, end: i64, length: usize, context: &str) -> BoundsResult<Range<usize>> {
    BoundsChecker::new(context).check_slice(start, end, length)
}
