// src/error.rs
//! Unified error handling for gait trial processing
//!
//! Fatal conditions abort processing of a single trial and are returned as
//! [`GaitError`]. Anomalies that let processing continue are not errors; they
//! are reported through [`crate::diagnostics::Diagnostics`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::utils::bounds::BoundsError;

/// Unified error type for trial processing
#[derive(Debug, Clone, Error)]
pub enum GaitError {
    /// The recording carries no gait events, so no cycle can be segmented
    #[error("[EVENTS] Trial has not been evented ({})", .context.operation)]
    NotEvented { context: ErrorContext },

    /// A computed frame range falls outside a channel series
    #[error("[SLICE] Frame range [{start}..{end}) invalid for '{series}' of length {length} ({})", .context.operation)]
    Slice {
        series: String,
        start: i64,
        end: i64,
        length: usize,
        context: ErrorContext,
    },

    /// Structurally inconsistent input data
    #[error("[DATA] Invalid {data_type}: {reason}{}", format_expectation(.expected, .actual))]
    InvalidData {
        data_type: String,
        reason: String,
        expected: Option<String>,
        actual: Option<String>,
        context: ErrorContext,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("[CONFIG] Configuration error in {component}: {reason}")]
    Configuration {
        component: String,
        reason: String,
        context: ErrorContext,
    },
}

fn format_expectation(expected: &Option<String>, actual: &Option<String>) -> String {
    match (expected, actual) {
        (Some(exp), Some(act)) => format!(" (expected: {}, got: {})", exp, act),
        _ => String::new(),
    }
}

impl GaitError {
    /// Whether the error is tied to the trial's eventing rather than its data
    pub fn is_eventing_failure(&self) -> bool {
        matches!(self, GaitError::NotEvented { .. } | GaitError::Slice { .. })
    }

    /// Context captured where the error was raised
    pub fn context(&self) -> &ErrorContext {
        match self {
            GaitError::NotEvented { context }
            | GaitError::Slice { context, .. }
            | GaitError::InvalidData { context, .. }
            | GaitError::Configuration { context, .. } => context,
        }
    }
}

/// Error context for debugging and analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub additional_info: BTreeMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            file: None,
            line: None,
            additional_info: BTreeMap::new(),
        }
    }

    /// Create error context with file and line information
    pub fn with_location(component: &str, operation: &str, file: &str, line: u32) -> Self {
        let mut context = Self::new(component, operation);
        context.file = Some(file.to_string());
        context.line = Some(line);
        context
    }

    /// Add additional information to the context
    pub fn add_info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional_info.insert(key.into(), value.into());
        self
    }
}

/// Macro for creating error context with file and line info
#[macro_export]
macro_rules! error_context {
    ($component:expr, $operation:expr) => {
        $crate::error::ErrorContext::with_location($component, $operation, file!(), line!())
    };
}

/// Result type alias for trial operations
pub type GaitResult<T> = Result<T, GaitError>;

impl From<BoundsError> for GaitError {
    fn from(err: BoundsError) -> Self {
        match err {
            BoundsError::SliceBoundsInvalid { start, end, length, context } => GaitError::Slice {
                series: context,
                start,
                end,
                length,
                context: error_context!("slicing", "slice"),
            },
            BoundsError::EmptySeries { context } => GaitError::InvalidData {
                data_type: "series".to_string(),
                reason: format!("'{}' has no samples", context),
                expected: None,
                actual: None,
                context: error_context!("slicing", "resample"),
            },
            BoundsError::InvalidSampleCount { requested, context } => GaitError::InvalidData {
                data_type: "sample count".to_string(),
                reason: format!("cannot resample '{}' to {} samples", context, requested),
                expected: Some(">= 1".to_string()),
                actual: Some(requested.to_string()),
                context: error_context!("slicing", "resample"),
            },
        }
    }
}

/// Error builder for convenient error construction
pub struct GaitErrorBuilder {
    component: String,
    operation: String,
}

impl GaitErrorBuilder {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn configuration(self, reason: &str) -> GaitError {
        let context = ErrorContext::new(&self.component, &self.operation);
        GaitError::Configuration {
            component: self.component,
            reason: reason.to_string(),
            context,
        }
    }

    pub fn invalid_data(self, data_type: &str, reason: &str) -> GaitError {
        GaitError::InvalidData {
            data_type: data_type.to_string(),
            reason: reason.to_string(),
            expected: None,
            actual: None,
            context: ErrorContext::new(&self.component, &self.operation),
        }
    }

    pub fn length_mismatch(self, data_type: &str, expected: usize, actual: usize) -> GaitError {
        GaitError::InvalidData {
            data_type: data_type.to_string(),
            reason: "length mismatch".to_string(),
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
            context: ErrorContext::new(&self.component, &self.operation),
        }
    }
}
