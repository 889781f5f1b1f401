// src/diagnostics.rs
//! Non-fatal trial diagnostics
//!
//! Anomalies that do not stop a trial are collected here and surfaced in the
//! trial output. Each pushed record is mirrored as a tracing event.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// How urgently a diagnostic needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    /// The trial should be checked by hand before its output is trusted
    Review,
}

/// Diagnostic kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    InsufficientEvents,
    ExtraEvents,
    UnmatchedFullCycle,
    UnrecognizedLabelSet,
    LabelLookupMiss,
    EmgChannelSurplus,
    MissingSideCycle,
    DiscardedCycles,
    UnsidedEvent,
    MissingSynergyChannel,
}

impl DiagnosticCode {
    /// Severity a code is raised with
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticCode::DiscardedCycles | DiagnosticCode::UnsidedEvent => Severity::Info,
            DiagnosticCode::EmgChannelSurplus => Severity::Review,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticCode::InsufficientEvents => "insufficient_events",
            DiagnosticCode::ExtraEvents => "extra_events",
            DiagnosticCode::UnmatchedFullCycle => "unmatched_full_cycle",
            DiagnosticCode::UnrecognizedLabelSet => "unrecognized_label_set",
            DiagnosticCode::LabelLookupMiss => "label_lookup_miss",
            DiagnosticCode::EmgChannelSurplus => "emg_channel_surplus",
            DiagnosticCode::MissingSideCycle => "missing_side_cycle",
            DiagnosticCode::DiscardedCycles => "discarded_cycles",
            DiagnosticCode::UnsidedEvent => "unsided_event",
            DiagnosticCode::MissingSynergyChannel => "missing_synergy_channel",
        };
        f.write_str(name)
    }
}

/// A single non-fatal finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub context: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, context: impl Into<String>) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            context: context.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.code, self.context)
    }
}

/// Ordered diagnostics collected while processing one trial
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic with its code's default severity
    pub fn push(&mut self, code: DiagnosticCode, context: impl Into<String>) {
        self.push_record(Diagnostic::new(code, context));
    }

    fn push_record(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => info!(code = %diagnostic.code, "{}", diagnostic.context),
            Severity::Warning | Severity::Review => {
                warn!(code = %diagnostic.code, severity = ?diagnostic.severity, "{}", diagnostic.context)
            }
        }
        self.records.push(diagnostic);
    }

    /// Append diagnostics gathered by another stage, keeping their order
    pub fn extend(&mut self, other: Diagnostics) {
        self.records.extend(other.records);
    }

    pub fn has(&self, code: DiagnosticCode) -> bool {
        self.records.iter().any(|d| d.code == code)
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.records.iter().filter(|d| d.code == code).count()
    }

    /// Whether any record asks for manual review
    pub fn needs_review(&self) -> bool {
        self.records.iter().any(|d| d.severity == Severity::Review)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
