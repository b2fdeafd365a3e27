//! Accumulating per-category tendency scores.
//!
//! Six named scores, each in [0, 1]. Recent behavior events push individual
//! scores up by fixed increments; nothing ever pulls them back down except an
//! explicit reset or import.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::behavior::{BehaviorEvent, EmotionalState, UserAction};

/// Named tendency tracked by [`PatternScores`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    TaskPostponementFrequency,
    DeadlinePressureTendency,
    PerfectionismScore,
    OverwhelmFrequency,
    DistractionSusceptibility,
    EnergyMismatchFrequency,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::TaskPostponementFrequency,
        PatternKind::DeadlinePressureTendency,
        PatternKind::PerfectionismScore,
        PatternKind::OverwhelmFrequency,
        PatternKind::DistractionSusceptibility,
        PatternKind::EnergyMismatchFrequency,
    ];

    /// Key used in exported pattern maps.
    pub fn key(&self) -> &'static str {
        match self {
            PatternKind::TaskPostponementFrequency => "task_postponement_frequency",
            PatternKind::DeadlinePressureTendency => "deadline_pressure_tendency",
            PatternKind::PerfectionismScore => "perfectionism_score",
            PatternKind::OverwhelmFrequency => "overwhelm_frequency",
            PatternKind::DistractionSusceptibility => "distraction_susceptibility",
            PatternKind::EnergyMismatchFrequency => "energy_mismatch_frequency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        PatternKind::ALL.into_iter().find(|k| k.key() == key)
    }

    fn index(&self) -> usize {
        match self {
            PatternKind::TaskPostponementFrequency => 0,
            PatternKind::DeadlinePressureTendency => 1,
            PatternKind::PerfectionismScore => 2,
            PatternKind::OverwhelmFrequency => 3,
            PatternKind::DistractionSusceptibility => 4,
            PatternKind::EnergyMismatchFrequency => 5,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Plain key -> score mapping used to persist pattern scores.
pub type PatternMap = BTreeMap<String, f64>;

/// Increment contributed by the event's action, if any.
fn action_increment(action: UserAction) -> Option<(PatternKind, f64)> {
    match action {
        UserAction::TaskPostponed => Some((PatternKind::TaskPostponementFrequency, 0.10)),
        UserAction::ProcrastinationDetected => Some((PatternKind::DeadlinePressureTendency, 0.20)),
        UserAction::InterventionDismissed => Some((PatternKind::DistractionSusceptibility, 0.15)),
        UserAction::TaskCreated
        | UserAction::TaskStarted
        | UserAction::TaskCompleted
        | UserAction::GoalCreated
        | UserAction::GoalUpdated
        | UserAction::HabitLogged
        | UserAction::AiAdviceRequested => None,
    }
}

/// Increment contributed by the event's mood, if any.
fn mood_increment(mood: EmotionalState) -> Option<(PatternKind, f64)> {
    match mood {
        EmotionalState::Overwhelmed => Some((PatternKind::OverwhelmFrequency, 0.10)),
        EmotionalState::Anxious => Some((PatternKind::PerfectionismScore, 0.05)),
        EmotionalState::Motivated
        | EmotionalState::Focused
        | EmotionalState::Distracted
        | EmotionalState::Confident
        | EmotionalState::Doubtful
        | EmotionalState::Energetic
        | EmotionalState::Tired => None,
    }
}

/// Every increment a single event contributes. Action and mood rules are
/// independent, so one event may move two scores.
pub fn increments_for(event: &BehaviorEvent) -> Vec<(PatternKind, f64)> {
    action_increment(event.action)
        .into_iter()
        .chain(event.emotional_state.and_then(mood_increment))
        .collect()
}

/// Outcome of [`PatternScores::import`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Keys that were applied
    pub applied: usize,
    /// Keys that name no known pattern
    pub unknown_keys: Vec<String>,
    /// Known keys whose value was NaN or infinite
    pub rejected_keys: Vec<String>,
}

/// The six pattern scores, all within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PatternScores {
    scores: [f64; 6],
}

impl PatternScores {
    /// All scores at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: PatternKind) -> f64 {
        self.scores[kind.index()]
    }

    /// Raise one score, saturating at 1.0. Negative or non-finite increments
    /// are ignored. Returns the new value.
    pub fn increment(&mut self, kind: PatternKind, by: f64) -> f64 {
        let slot = &mut self.scores[kind.index()];
        if by.is_finite() && by > 0.0 {
            *slot = (*slot + by).min(1.0);
        }
        *slot
    }

    /// Apply the fixed increments for `event`.
    pub fn apply(&mut self, event: &BehaviorEvent) {
        for (kind, by) in increments_for(event) {
            self.increment(kind, by);
        }
    }

    pub fn reset(&mut self) {
        self.scores = [0.0; 6];
    }

    pub fn iter(&self) -> impl Iterator<Item = (PatternKind, f64)> + '_ {
        PatternKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Export as a plain mapping of the six pattern keys.
    pub fn export(&self) -> PatternMap {
        self.iter().map(|(k, v)| (k.key().to_string(), v)).collect()
    }

    /// Overwrite scores from a plain mapping.
    ///
    /// Keys missing from `map` keep their current value. Values are clamped
    /// into [0, 1].
    pub fn import(&mut self, map: &PatternMap) -> ImportReport {
        let mut report = ImportReport::default();
        for (key, value) in map {
            match PatternKind::from_key(key) {
                Some(_) if !value.is_finite() => report.rejected_keys.push(key.clone()),
                Some(kind) => {
                    self.scores[kind.index()] = value.clamp(0.0, 1.0);
                    report.applied += 1;
                }
                None => report.unknown_keys.push(key.clone()),
            }
        }
        report
    }
}
