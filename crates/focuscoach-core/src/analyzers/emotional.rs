//! Risk carried by the user's current mood.

use crate::behavior::EmotionalState;
use crate::signal::{ProcrastinationSignal, Severity, SignalType};

use super::AnalysisContext;

/// Row of the mood risk table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodRisk {
    pub severity: Severity,
    pub confidence: f64,
    pub intervention: &'static str,
}

/// Risk entry for `mood`, or `None` for moods that carry no risk.
pub fn mood_risk(mood: EmotionalState) -> Option<MoodRisk> {
    let (severity, confidence, intervention) = match mood {
        EmotionalState::Overwhelmed => (
            Severity::High,
            0.8,
            "Take 5 deep breaths and list just 3 priority tasks",
        ),
        EmotionalState::Anxious => (
            Severity::Medium,
            0.7,
            "Start with the easiest task to build momentum",
        ),
        EmotionalState::Distracted => (
            Severity::Medium,
            0.6,
            "Remove distractions and use a focus timer",
        ),
        EmotionalState::Tired => (
            Severity::Low,
            0.5,
            "Consider taking a short break or doing lighter tasks",
        ),
        EmotionalState::Doubtful => (
            Severity::Medium,
            0.6,
            "Review your why and past successes for motivation",
        ),
        EmotionalState::Motivated
        | EmotionalState::Focused
        | EmotionalState::Confident
        | EmotionalState::Energetic => return None,
    };
    Some(MoodRisk {
        severity,
        confidence,
        intervention,
    })
}

pub fn analyze(ctx: &AnalysisContext<'_>) -> Vec<ProcrastinationSignal> {
    let Some(mood) = ctx.current_mood else {
        return Vec::new();
    };
    let Some(risk) = mood_risk(mood) else {
        return Vec::new();
    };

    let mood_tag = mood.as_str().to_lowercase();
    vec![ProcrastinationSignal::new(
        SignalType::Emotional,
        risk.severity,
        risk.confidence,
        format!("Current emotional state ({mood}) increases procrastination risk"),
        risk.intervention,
        &["emotional_state", mood_tag.as_str()],
    )]
}
