//! Characteristics of the current task that invite avoidance.

use crate::signal::{ProcrastinationSignal, Severity, SignalType};

use super::AnalysisContext;

const HIGH_DIFFICULTY: u8 = 7;
const MIN_CLEAR_DESCRIPTION_CHARS: usize = 20;

/// Typical low-energy hours: early morning and the afternoon dip.
fn is_low_energy_hour(hour: u32) -> bool {
    (6..=8).contains(&hour) || (14..=16).contains(&hour)
}

pub fn analyze(ctx: &AnalysisContext<'_>) -> Vec<ProcrastinationSignal> {
    let Some(task) = ctx.current_task else {
        return Vec::new();
    };
    let mut signals = Vec::new();

    if task.difficulty_level.is_some_and(|d| d > HIGH_DIFFICULTY) {
        signals.push(ProcrastinationSignal::new(
            SignalType::Pattern,
            Severity::Medium,
            0.6,
            "High-difficulty task may trigger avoidance behavior",
            "Break this complex task into smaller, easier steps",
            &["high_difficulty", "task_complexity"],
        ));
    }

    if task.description_len() < MIN_CLEAR_DESCRIPTION_CHARS {
        signals.push(ProcrastinationSignal::new(
            SignalType::Pattern,
            Severity::Low,
            0.4,
            "Unclear task definition may cause procrastination",
            "Define specific, actionable steps for this task",
            &["unclear_task", "lack_of_clarity"],
        ));
    }

    let demanding = task.energy_required.is_some_and(|e| e.is_demanding());
    if demanding && is_low_energy_hour(ctx.current_hour()) {
        signals.push(ProcrastinationSignal::new(
            SignalType::Pattern,
            Severity::Medium,
            0.5,
            "High-energy task during typical low-energy time",
            "Schedule this task during your peak energy hours",
            &["energy_mismatch", "timing_issue"],
        ));
    }

    signals
}
