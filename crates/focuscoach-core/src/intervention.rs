//! UI-facing nudges chosen by risk tier.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{ProcrastinationAnalysis, HIGH_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};

/// How insistently the host should present an intervention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Icon shown next to the intervention title.
    pub fn icon(&self) -> &'static str {
        match self {
            Urgency::High => "🚨",
            Urgency::Medium => "⚠️",
            Urgency::Low => "💪",
        }
    }
}

/// A suggested nudge: title, message and four concrete actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub title: String,
    pub message: String,
    pub actions: Vec<String>,
    pub urgency: Urgency,
}

impl Intervention {
    fn bundle(urgency: Urgency, title: &str, message: &str, actions: [&str; 4]) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            urgency,
        }
    }

    pub fn high() -> Self {
        Self::bundle(
            Urgency::High,
            "🚨 Procrastination Alert!",
            "I notice you might be avoiding this task. That's totally normal, but let's tackle it together!",
            [
                "Start with just 2 minutes",
                "Break it into tiny steps",
                "Remove one distraction",
                "Ask for help",
            ],
        )
    }

    pub fn medium() -> Self {
        Self::bundle(
            Urgency::Medium,
            "⚠️ Gentle Nudge",
            "You're at risk of procrastinating. Let's prevent that with some quick action!",
            [
                "Set a 15-minute timer",
                "Choose the easiest part first",
                "Clear your workspace",
                "Play focus music",
            ],
        )
    }

    pub fn low() -> Self {
        Self::bundle(
            Urgency::Low,
            "💪 Keep Going!",
            "You're doing great! Here are some tips to maintain momentum:",
            [
                "Celebrate small wins",
                "Take regular breaks",
                "Track your progress",
                "Stay hydrated",
            ],
        )
    }
}

/// Pick the bundle for `analysis`.
///
/// Any high-severity signal selects the high bundle regardless of the
/// aggregate score. The recommendation list plays no part.
pub fn personalized_intervention(analysis: &ProcrastinationAnalysis) -> Intervention {
    if analysis.risk_score > HIGH_RISK_THRESHOLD || analysis.has_high_severity_signal() {
        Intervention::high()
    } else if analysis.risk_score > MODERATE_RISK_THRESHOLD {
        Intervention::medium()
    } else {
        Intervention::low()
    }
}

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "The way to get started is to quit talking and begin doing. - Walt Disney",
    "Don't watch the clock; do what it does. Keep going. - Sam Levenson",
    "A year from now you may wish you had started today. - Karen Lamb",
    "You don't have to be great to get started, but you have to get started to be great. - Les Brown",
    "The secret of getting ahead is getting started. - Mark Twain",
];

/// One of the fixed motivational quotes, chosen with `rng`.
pub fn motivational_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES
        .choose(rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_QUOTES[0])
}
