// src/batch.rs
//! Parallel processing of independent trials
//!
//! Trials share nothing but the read-only configuration, so each runs on its
//! own rayon task. A fatal error aborts only the trial that raised it.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::GaitResult;
use crate::recording::{RawRecording, RecordingSource};
use crate::trial::{TrialAnalysis, TrialOutput};

/// Result of processing one trial in a batch
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub name: String,
    pub result: GaitResult<TrialOutput>,
}

impl TrialOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary counts over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub not_evented: usize,
    pub needs_review: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            match &outcome.result {
                Ok(output) => {
                    summary.processed += 1;
                    if output.needs_review {
                        summary.needs_review += 1;
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    if matches!(e, crate::error::GaitError::NotEvented { .. }) {
                        summary.not_evented += 1;
                    }
                }
            }
            summary
        })
    }
}

fn process_one<S: RecordingSource + ?Sized>(source: &S, config: &AnalysisConfig) -> TrialOutcome {
    let name = source.source_name();
    let result = source
        .read_recording()
        .and_then(|recording| TrialAnalysis::from_recording(&recording, config))
        .map(|analysis| analysis.output());

    if let Err(e) = &result {
        warn!(trial = %name, component = %e.context().component, error = %e, "Trial failed");
    }
    TrialOutcome { name, result }
}

/// Process recordings in parallel, preserving input order in the result
pub fn process_batch(recordings: &[RawRecording], config: &AnalysisConfig) -> Vec<TrialOutcome> {
    process_sources(recordings, config)
}

/// Read and process each source in parallel
pub fn process_sources<S: RecordingSource + Sync>(sources: &[S], config: &AnalysisConfig) -> Vec<TrialOutcome> {
    let outcomes: Vec<TrialOutcome> = sources
        .par_iter()
        .map(|source| process_one(source, config))
        .collect();

    let summary = BatchSummary::from_outcomes(&outcomes);
    info!(
        processed = summary.processed,
        failed = summary.failed,
        needs_review = summary.needs_review,
        "Batch complete"
    );
    outcomes
}
