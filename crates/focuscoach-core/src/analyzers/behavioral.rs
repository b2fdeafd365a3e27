//! Signals read straight off the accumulated pattern scores.

use crate::patterns::PatternKind;
use crate::signal::{ProcrastinationSignal, Severity, SignalType};

use super::AnalysisContext;

const POSTPONEMENT_THRESHOLD: f64 = 0.5;
const POSTPONEMENT_HIGH_THRESHOLD: f64 = 0.7;
const PERFECTIONISM_THRESHOLD: f64 = 0.4;
const OVERWHELM_THRESHOLD: f64 = 0.3;

/// Confidence of each signal is the pattern score that raised it.
pub fn analyze(ctx: &AnalysisContext<'_>) -> Vec<ProcrastinationSignal> {
    let mut signals = Vec::new();
    let patterns = &ctx.patterns;

    let postponement = patterns.get(PatternKind::TaskPostponementFrequency);
    if postponement > POSTPONEMENT_THRESHOLD {
        let severity = if postponement > POSTPONEMENT_HIGH_THRESHOLD {
            Severity::High
        } else {
            Severity::Medium
        };
        signals.push(ProcrastinationSignal::new(
            SignalType::Behavioral,
            severity,
            postponement,
            "High frequency of task postponements detected",
            "Try the 2-minute rule: if it takes less than 2 minutes, do it now",
            &["postponement_pattern"],
        ));
    }

    let perfectionism = patterns.get(PatternKind::PerfectionismScore);
    if perfectionism > PERFECTIONISM_THRESHOLD {
        signals.push(ProcrastinationSignal::new(
            SignalType::Behavioral,
            Severity::Medium,
            perfectionism,
            "Perfectionism tendencies may be causing delays",
            "Set \"good enough\" standards and focus on progress over perfection",
            &["perfectionism", "analysis_paralysis"],
        ));
    }

    let overwhelm = patterns.get(PatternKind::OverwhelmFrequency);
    if overwhelm > OVERWHELM_THRESHOLD {
        signals.push(ProcrastinationSignal::new(
            SignalType::Behavioral,
            Severity::Medium,
            overwhelm,
            "Frequent overwhelm episodes detected",
            "Break large tasks into smaller, manageable pieces",
            &["overwhelm", "task_complexity"],
        ));
    }

    signals
}
