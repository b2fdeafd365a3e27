//! Aggregating signals into a risk score and recommendations.
//!
//! The risk score is a confidence-weighted average in which each signal is
//! weighted by its severity:
//!
//! ```text
//! risk = Σ(confidence × weight(severity)) / Σ weight(severity)
//! ```
//!
//! with weights low = 0.2, medium = 0.5, high = 0.8. High-severity signals
//! therefore dominate the average without any explicit precedence rule.

use serde::{Deserialize, Serialize};

use crate::signal::{ProcrastinationSignal, Severity};

/// Score above which risk counts as high.
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Score above which risk counts as moderate.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.4;
/// Default score above which an intervention is flagged as needed.
pub const DEFAULT_INTERVENTION_THRESHOLD: f64 = 0.6;
/// Signal-specific suggestions appended after the preamble.
pub const MAX_SIGNAL_RECOMMENDATIONS: usize = 3;

const HIGH_RISK_PREAMBLE: [&str; 3] = [
    "🚨 High procrastination risk detected - take immediate action",
    "🎯 Start with just 2 minutes of work on your most important task",
    "📱 Remove all distractions from your workspace",
];

const MODERATE_RISK_PREAMBLE: [&str; 3] = [
    "⚠️ Moderate procrastination risk - be proactive",
    "⏰ Use a timer to create urgency and focus",
    "🏆 Set up a small reward for task completion",
];

const LOW_RISK_PREAMBLE: [&str; 2] = [
    "✅ Low procrastination risk - you're doing well!",
    "📈 Maintain your current momentum",
];

/// Coarse tier of a risk score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score > MODERATE_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Fixed opening recommendations for this tier.
    pub fn preamble(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &HIGH_RISK_PREAMBLE,
            RiskLevel::Moderate => &MODERATE_RISK_PREAMBLE,
            RiskLevel::Low => &LOW_RISK_PREAMBLE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcrastinationAnalysis {
    /// Aggregate risk (0.0-1.0)
    pub risk_score: f64,

    /// Every signal produced during the call, in analyzer order
    pub signals: Vec<ProcrastinationSignal>,

    /// Tier preamble followed by up to three signal suggestions
    pub recommendations: Vec<String>,

    pub intervention_needed: bool,
}

impl ProcrastinationAnalysis {
    /// Score `signals` and build recommendations.
    pub fn from_signals(signals: Vec<ProcrastinationSignal>, intervention_threshold: f64) -> Self {
        let risk_score = risk_score(&signals);
        let recommendations = recommendations(&signals, risk_score);
        Self {
            risk_score,
            intervention_needed: risk_score > intervention_threshold,
            signals,
            recommendations,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn has_high_severity_signal(&self) -> bool {
        self.signals.iter().any(|s| s.severity == Severity::High)
    }
}

/// Severity-weighted average confidence, 0 when there are no signals.
pub fn risk_score(signals: &[ProcrastinationSignal]) -> f64 {
    let (numerator, denominator) = signals.iter().fold((0.0, 0.0), |(num, den), s| {
        (num + s.weighted_confidence(), den + s.severity.weight())
    });

    if denominator > 0.0 {
        (numerator / denominator).min(1.0)
    } else {
        0.0
    }
}

/// Tier preamble, then the first three distinct suggested interventions in
/// the order their signals were produced.
pub fn recommendations(signals: &[ProcrastinationSignal], risk_score: f64) -> Vec<String> {
    let mut out: Vec<String> = RiskLevel::from_score(risk_score)
        .preamble()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut seen: Vec<&str> = Vec::new();
    for signal in signals {
        let suggestion = signal.suggested_intervention.as_str();
        if !seen.contains(&suggestion) {
            seen.push(suggestion);
        }
    }

    out.extend(
        seen.into_iter()
            .take(MAX_SIGNAL_RECOMMENDATIONS)
            .map(str::to_string),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalType;

    fn signal(severity: Severity, confidence: f64, suggestion: &str) -> ProcrastinationSignal {
        ProcrastinationSignal::new(
            SignalType::Behavioral,
            severity,
            confidence,
            "test signal",
            suggestion,
            &[],
        )
    }

    #[test]
    fn no_signals_scores_zero() {
        assert_eq!(risk_score(&[]), 0.0);
    }

    #[test]
    fn single_signal_scores_its_confidence() {
        let s = signal(Severity::Low, 0.4, "a");
        assert!((risk_score(&[s]) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn weighted_average_favours_high_severity() {
        // (0.8*0.8 + 0.4*0.2) / (0.8 + 0.2) = 0.72
        let signals = vec![
            signal(Severity::High, 0.8, "a"),
            signal(Severity::Low, 0.4, "b"),
        ];
        assert!((risk_score(&signals) - 0.72).abs() < 1e-12);
    }

    #[test]
    fn full_confidence_scores_one() {
        let signals = vec![
            signal(Severity::High, 1.0, "a"),
            signal(Severity::Medium, 1.0, "b"),
        ];
        assert!((risk_score(&signals) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn risk_levels() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.41), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.71), RiskLevel::High);
    }

    #[test]
    fn low_risk_preamble_has_two_entries() {
        let recs = recommendations(&[], 0.0);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("Low procrastination risk"));
    }

    #[test]
    fn suggestions_are_deduplicated_in_first_seen_order() {
        let signals = vec![
            signal(Severity::Medium, 0.6, "b"),
            signal(Severity::Medium, 0.6, "a"),
            signal(Severity::Medium, 0.6, "b"),
            signal(Severity::Medium, 0.6, "c"),
            signal(Severity::Medium, 0.6, "d"),
        ];
        let recs = recommendations(&signals, 0.6);
        assert_eq!(recs.len(), 6);
        assert!(recs[0].contains("Moderate procrastination risk"));
        assert_eq!(&recs[3..], &["b", "a", "c"]);
    }

    #[test]
    fn high_risk_preamble() {
        let recs = recommendations(&[signal(Severity::High, 0.9, "x")], 0.9);
        assert_eq!(recs.len(), 4);
        assert!(recs[0].contains("High procrastination risk"));
        assert_eq!(recs[3], "x");
    }

    #[test]
    fn analysis_flags_intervention_above_threshold() {
        let analysis =
            ProcrastinationAnalysis::from_signals(vec![signal(Severity::High, 0.8, "x")], 0.6);
        assert!((analysis.risk_score - 0.8).abs() < 1e-12);
        assert!(analysis.intervention_needed);
        assert!(analysis.has_high_severity_signal());
        assert_eq!(analysis.risk_level(), RiskLevel::High);

        let calm = ProcrastinationAnalysis::from_signals(vec![signal(Severity::Low, 0.4, "y")], 0.6);
        assert!(!calm.intervention_needed);
        assert!(!calm.has_high_severity_signal());
    }

    #[test]
    fn analysis_serializes_camel_case() {
        let analysis = ProcrastinationAnalysis::from_signals(Vec::new(), 0.6);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["riskScore"], 0.0);
        assert_eq!(json["interventionNeeded"], false);
        assert_eq!(json["signals"].as_array().unwrap().len(), 0);
    }
}
