//! Deadline pressure and time-of-day postponement habits.

use crate::behavior::UserAction;
use crate::signal::{ProcrastinationSignal, Severity, SignalType};

use super::AnalysisContext;

/// A deadline closer than this many hours counts as imminent.
const DEADLINE_HORIZON_HOURS: f64 = 24.0;
/// Progress below this percentage counts as "low progress".
const LOW_PROGRESS_PERCENT: f64 = 50.0;
/// Postponements within this many hours of the current hour share a slot.
const HOUR_PROXIMITY: u32 = 2;
/// Same-slot postponements needed before the habit is flagged.
const MIN_SLOT_POSTPONEMENTS: usize = 2;

pub fn analyze(ctx: &AnalysisContext<'_>) -> Vec<ProcrastinationSignal> {
    let mut signals = Vec::new();

    if let Some(signal) = deadline_pressure(ctx) {
        signals.push(signal);
    }
    if let Some(signal) = time_of_day_postponements(ctx) {
        signals.push(signal);
    }

    signals
}

fn deadline_pressure(ctx: &AnalysisContext<'_>) -> Option<ProcrastinationSignal> {
    let task = ctx.current_task?;
    let deadline = task.deadline?;
    let hours_until = (deadline - ctx.now).num_milliseconds() as f64 / 3_600_000.0;

    if hours_until < DEADLINE_HORIZON_HOURS && task.progress_percent < LOW_PROGRESS_PERCENT {
        Some(ProcrastinationSignal::new(
            SignalType::Temporal,
            Severity::High,
            0.8,
            "Task deadline approaching with low progress",
            "Break task into smaller chunks and start immediately",
            &["deadline_pressure", "low_progress"],
        ))
    } else {
        None
    }
}

/// Scans the whole retained history, with no date bound: a postponement at
/// 15:00 last week counts toward a 14:00 slot today. Events whose timestamp
/// does not parse are skipped.
fn time_of_day_postponements(ctx: &AnalysisContext<'_>) -> Option<ProcrastinationSignal> {
    let current_hour = ctx.current_hour();
    let same_slot = ctx
        .behavior
        .iter()
        .filter(|e| e.action == UserAction::TaskPostponed)
        .filter_map(|e| e.timestamp_utc())
        .filter(|ts| ctx.wall_clock.hour(*ts).abs_diff(current_hour) <= HOUR_PROXIMITY)
        .count();

    if same_slot >= MIN_SLOT_POSTPONEMENTS {
        Some(ProcrastinationSignal::new(
            SignalType::Temporal,
            Severity::Medium,
            0.6,
            "Frequent postponements during this time of day",
            "Consider scheduling tasks at your peak energy hours",
            &["time_pattern", "energy_mismatch"],
        ))
    } else {
        None
    }
}
