//! Signal analyzers.
//!
//! Each analyzer is a pure function of an [`AnalysisContext`]: the instant the
//! analysis runs at, the caller's current task and mood, the retained behavior
//! history, and a copy of the pattern scores taken when the call started.
//! [`run_all`] concatenates their output in a fixed order: temporal,
//! behavioral, emotional, task characteristics.

pub mod behavioral;
pub mod emotional;
pub mod task_traits;
pub mod temporal;

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};

use crate::behavior::{BehaviorEvent, EmotionalState};
use crate::patterns::PatternScores;
use crate::signal::ProcrastinationSignal;
use crate::task::TaskSnapshot;

/// Zone in which hour-of-day rules read the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallClock {
    /// The host's local zone, daylight saving included
    Local,
    Fixed(FixedOffset),
}

impl WallClock {
    /// Hour of day (0-23) of `at` in this zone.
    pub fn hour(&self, at: DateTime<Utc>) -> u32 {
        match self {
            WallClock::Local => at.with_timezone(&Local).hour(),
            WallClock::Fixed(offset) => at.with_timezone(offset).hour(),
        }
    }
}

/// Inputs shared by every analyzer for a single analysis call.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub now: DateTime<Utc>,
    /// Zone applied when reading wall-clock hours
    pub wall_clock: WallClock,
    pub current_task: Option<&'a TaskSnapshot>,
    pub current_mood: Option<EmotionalState>,
    /// Retained behavior events, oldest first
    pub behavior: &'a [BehaviorEvent],
    pub patterns: PatternScores,
}

impl<'a> AnalysisContext<'a> {
    /// Wall-clock hour (0-23) at `now`.
    pub fn current_hour(&self) -> u32 {
        self.wall_clock.hour(self.now)
    }
}

/// Run every analyzer and concatenate their signals.
pub fn run_all(ctx: &AnalysisContext<'_>) -> Vec<ProcrastinationSignal> {
    let mut signals = Vec::new();
    signals.extend(temporal::analyze(ctx));
    signals.extend(behavioral::analyze(ctx));
    signals.extend(emotional::analyze(ctx));
    signals.extend(task_traits::analyze(ctx));
    for signal in &signals {
        tracing::trace!(
            signal_type = ?signal.signal_type,
            severity = %signal.severity,
            confidence = signal.confidence,
            "{}",
            signal.description
        );
    }
    signals
}
