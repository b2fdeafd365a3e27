//! Risk signals produced by the analyzers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family of evidence a signal belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// Characteristics of the task itself
    Pattern,
    /// Accumulated pattern scores
    Behavioral,
    /// Deadlines and time of day
    Temporal,
    /// Current mood
    Emotional,
}

/// How strongly a signal should pull the aggregate score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Weight of a signal of this severity in the risk average.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Low => 0.2,
            Severity::Medium => 0.5,
            Severity::High => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule-triggered piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcrastinationSignal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    pub severity: Severity,

    /// 0.0-1.0
    pub confidence: f64,

    pub description: String,

    pub suggested_intervention: String,

    pub triggers: Vec<String>,
}

impl ProcrastinationSignal {
    pub fn new(
        signal_type: SignalType,
        severity: Severity,
        confidence: f64,
        description: impl Into<String>,
        suggested_intervention: impl Into<String>,
        triggers: &[&str],
    ) -> Self {
        Self {
            signal_type,
            severity,
            confidence: confidence.clamp(0.0, 1.0),
            description: description.into(),
            suggested_intervention: suggested_intervention.into(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Contribution to the weighted-average numerator.
    pub fn weighted_confidence(&self) -> f64 {
        self.confidence * self.severity.weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_weights() {
        assert_eq!(Severity::Low.weight(), 0.2);
        assert_eq!(Severity::Medium.weight(), 0.5);
        assert_eq!(Severity::High.weight(), 0.8);
        assert!(Severity::High > Severity::Low);
    }

    #[test]
    fn signal_serializes_with_type_key() {
        let signal = ProcrastinationSignal::new(
            SignalType::Temporal,
            Severity::High,
            0.8,
            "Task deadline approaching with low progress",
            "Break task into smaller chunks and start immediately",
            &["deadline_pressure", "low_progress"],
        );
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "temporal");
        assert_eq!(json["severity"], "high");
        assert_eq!(
            json["suggestedIntervention"],
            "Break task into smaller chunks and start immediately"
        );
        assert_eq!(json["triggers"][1], "low_progress");
    }

    #[test]
    fn confidence_is_clamped() {
        let signal = ProcrastinationSignal::new(
            SignalType::Behavioral,
            Severity::Medium,
            1.4,
            "d",
            "i",
            &[],
        );
        assert_eq!(signal.confidence, 1.0);
        assert_eq!(signal.weighted_confidence(), 0.5);
    }
}
