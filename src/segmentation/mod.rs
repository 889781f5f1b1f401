// src/segmentation/mod.rs
//! Gait cycle segmentation
//!
//! A per-side state machine pairs consecutive same-side foot strikes into a
//! cycle. The full cycle is found structurally: starting at the first strike
//! of any side, seven consecutive events must alternate strike and off.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::constants::events::CANONICAL_EVENT_COUNT;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::events::{Event, EventKind, EventSet, EventSide};

/// Which cycle a slice belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleSide {
    Left,
    Right,
    Full,
}

impl fmt::Display for CycleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSide::Left => f.write_str("Left"),
            CycleSide::Right => f.write_str("Right"),
            CycleSide::Full => f.write_str("Full"),
        }
    }
}

/// Half-open frame range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A segmented cycle on both clocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaitCycle {
    pub side: CycleSide,
    pub motion_frames: FrameRange,
    pub analog_frames: FrameRange,
}

impl GaitCycle {
    fn between(side: CycleSide, start: &Event, end: &Event) -> Self {
        Self {
            side,
            motion_frames: FrameRange::new(start.motion_frame, end.motion_frame),
            analog_frames: FrameRange::new(start.analog_frame, end.analog_frame),
        }
    }
}

/// Cycles found in one trial
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleBoundaries {
    pub left: Option<GaitCycle>,
    pub right: Option<GaitCycle>,
    pub full: Option<GaitCycle>,
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl CycleBoundaries {
    pub fn get(&self, side: CycleSide) -> Option<&GaitCycle> {
        match side {
            CycleSide::Left => self.left.as_ref(),
            CycleSide::Right => self.right.as_ref(),
            CycleSide::Full => self.full.as_ref(),
        }
    }

    pub fn cycles(&self) -> impl Iterator<Item = &GaitCycle> {
        [&self.left, &self.right, &self.full].into_iter().flatten()
    }
}

#[derive(Debug, Clone, Copy)]
enum SideState<'a> {
    Idle,
    OpenCycle { opened_by: &'a Event },
}

/// Strike-pairing state machine for one side
struct SideTracker<'a> {
    side: CycleSide,
    state: SideState<'a>,
    first: Option<GaitCycle>,
    completed: usize,
}

impl<'a> SideTracker<'a> {
    fn new(side: CycleSide) -> Self {
        Self {
            side,
            state: SideState::Idle,
            first: None,
            completed: 0,
        }
    }

    fn on_strike(&mut self, event: &'a Event) {
        self.state = match self.state {
            SideState::Idle => SideState::OpenCycle { opened_by: event },
            SideState::OpenCycle { opened_by } => {
                let cycle = GaitCycle::between(self.side, opened_by, event);
                self.completed += 1;
                if self.first.is_none() {
                    debug!(side = %self.side, start = cycle.motion_frames.start, end = cycle.motion_frames.end, "Closed gait cycle");
                    self.first = Some(cycle);
                }
                SideState::Idle
            }
        };
    }

    fn finish(self, diagnostics: &mut Diagnostics) -> Option<GaitCycle> {
        if self.first.is_none() {
            diagnostics.push(
                DiagnosticCode::MissingSideCycle,
                format!("fewer than two {} foot strikes", self.side),
            );
        }
        if self.completed > 1 {
            diagnostics.push(
                DiagnosticCode::DiscardedCycles,
                format!("{} later {} cycles not retained", self.completed - 1, self.side),
            );
        }
        self.first
    }
}

const FULL_CYCLE_PATTERN: [EventKind; CANONICAL_EVENT_COUNT] = [
    EventKind::FootStrike,
    EventKind::FootOff,
    EventKind::FootStrike,
    EventKind::FootOff,
    EventKind::FootStrike,
    EventKind::FootOff,
    EventKind::FootStrike,
];

/// Locate the canonical strike/off window starting at the first strike
fn full_cycle(events: &[Event]) -> Result<GaitCycle, String> {
    let first_strike = events
        .iter()
        .position(|e| e.kind == EventKind::FootStrike)
        .ok_or_else(|| "no foot strike recorded".to_string())?;

    let window = events
        .get(first_strike..first_strike + CANONICAL_EVENT_COUNT)
        .ok_or_else(|| {
            format!(
                "only {} events from the first strike, {} needed",
                events.len() - first_strike,
                CANONICAL_EVENT_COUNT
            )
        })?;

    if let Some(offset) = window
        .iter()
        .zip(FULL_CYCLE_PATTERN)
        .position(|(event, expected)| event.kind != expected)
    {
        return Err(format!(
            "event {} after the first strike is {}, expected {}",
            offset,
            window[offset].kind,
            FULL_CYCLE_PATTERN[offset]
        ));
    }

    Ok(GaitCycle::between(CycleSide::Full, &window[0], &window[CANONICAL_EVENT_COUNT - 1]))
}

/// Segment a trial's events into left, right and full cycles
///
/// Only the first completed cycle of each side is retained.
pub fn segment(events: &EventSet) -> CycleBoundaries {
    let mut left = SideTracker::new(CycleSide::Left);
    let mut right = SideTracker::new(CycleSide::Right);

    for event in events.iter().filter(|e| e.kind == EventKind::FootStrike) {
        match event.side {
            EventSide::Left => left.on_strike(event),
            EventSide::Right => right.on_strike(event),
            EventSide::None => {}
        }
    }

    let mut diagnostics = Diagnostics::new();
    let left = left.finish(&mut diagnostics);
    let right = right.finish(&mut diagnostics);

    let full = match full_cycle(&events.events) {
        Ok(cycle) => Some(cycle),
        Err(reason) => {
            diagnostics.push(DiagnosticCode::UnmatchedFullCycle, reason);
            None
        }
    };

    CycleBoundaries {
        left,
        right,
        full,
        diagnostics,
    }
}
