// src/events/mod.rs
//! Gait event organization
//!
//! Raw event times are projected onto the motion and analog clocks and put in
//! time order. Frame indices are relative to each section's first frame.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::config::constants::events::*;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::error::{GaitError, GaitErrorBuilder, GaitResult};
use crate::error_context;
use crate::recording::RawRecording;
use crate::utils::{time_to_frame, validate_sample_rate};

/// Side an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventSide {
    Left,
    Right,
    None,
}

impl EventSide {
    /// Parse an EVENT:CONTEXTS value
    pub fn parse(context: &str) -> Self {
        match context.trim() {
            CONTEXT_LEFT => EventSide::Left,
            CONTEXT_RIGHT => EventSide::Right,
            _ => EventSide::None,
        }
    }
}

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    FootStrike,
    FootOff,
    /// Any other label, e.g. "General"; never a cycle boundary
    Other,
}

impl EventKind {
    /// Parse an EVENT:LABELS value
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            LABEL_FOOT_STRIKE => EventKind::FootStrike,
            LABEL_FOOT_OFF => EventKind::FootOff,
            _ => EventKind::Other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::FootStrike => f.write_str(LABEL_FOOT_STRIKE),
            EventKind::FootOff => f.write_str(LABEL_FOOT_OFF),
            EventKind::Other => f.write_str("Other"),
        }
    }
}

/// A gait event on both sample clocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    /// Seconds from the start of the recording
    pub time: f64,
    pub side: EventSide,
    pub kind: EventKind,
    pub motion_frame: i64,
    pub analog_frame: i64,
}

/// Time-ordered events of one trial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSet {
    pub events: Vec<Event>,
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl EventSet {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events of one side, in time order
    pub fn side(&self, side: EventSide) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.side == side)
    }
}

/// Project raw events onto both clocks and sort them by time
///
/// The sort is stable, so simultaneous events keep their recorded order.
#[allow(clippy::too_many_arguments)]
pub fn organize(
    times: &[f64],
    sides: &[EventSide],
    kinds: &[EventKind],
    motion_rate: f64,
    motion_first: i64,
    analog_rate: f64,
    analog_first: i64,
) -> GaitResult<EventSet> {
    let err = || GaitErrorBuilder::new("events", "organize");

    if sides.len() != times.len() {
        return Err(err().length_mismatch("event sides", times.len(), sides.len()));
    }
    if kinds.len() != times.len() {
        return Err(err().length_mismatch("event kinds", times.len(), kinds.len()));
    }
    if times.is_empty() {
        return Err(GaitError::NotEvented {
            context: error_context!("events", "organize"),
        });
    }
    if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
        return Err(err().invalid_data("event time", &format!("{} is not a finite time", bad)));
    }
    validate_sample_rate("motion rate", motion_rate)?;
    validate_sample_rate("analog rate", analog_rate)?;

    let mut events: Vec<Event> = times
        .iter()
        .zip(sides)
        .zip(kinds)
        .map(|((&time, &side), &kind)| Event {
            time,
            side,
            kind,
            motion_frame: time_to_frame(time, motion_rate, motion_first),
            analog_frame: time_to_frame(time, analog_rate, analog_first),
        })
        .collect();
    events.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut diagnostics = Diagnostics::new();
    if events.len() < CANONICAL_EVENT_COUNT {
        diagnostics.push(
            DiagnosticCode::InsufficientEvents,
            format!("{} events, expected {}", events.len(), CANONICAL_EVENT_COUNT),
        );
    } else if events.len() > CANONICAL_EVENT_COUNT {
        diagnostics.push(
            DiagnosticCode::ExtraEvents,
            format!("{} events, expected {}", events.len(), CANONICAL_EVENT_COUNT),
        );
    }
    for event in events.iter().filter(|e| e.side == EventSide::None) {
        diagnostics.push(
            DiagnosticCode::UnsidedEvent,
            format!("{} at {:.3}s has no Left/Right context", event.kind, event.time),
        );
    }

    debug!(count = events.len(), "Organized gait events");
    Ok(EventSet { events, diagnostics })
}

/// Organize the events stored in a recording's EVENT parameters
pub fn organize_recording(recording: &RawRecording) -> GaitResult<EventSet> {
    let sides: Vec<EventSide> = recording.events.contexts.iter().map(|c| EventSide::parse(c)).collect();
    let kinds: Vec<EventKind> = recording.events.labels.iter().map(|l| EventKind::parse(l)).collect();
    organize(
        &recording.events.times,
        &sides,
        &kinds,
        recording.header.points.rate_hz,
        recording.header.points.first_frame,
        recording.header.analogs.rate_hz,
        recording.header.analogs.first_frame,
    )
}
