//! Behavior events observed from the user.
//!
//! A [`BehaviorEvent`] is appended by the host application whenever the user
//! does something worth remembering: creating or postponing a task, logging a
//! habit, dismissing an intervention. Events are immutable once recorded.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Kind of user action captured by a behavior event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    TaskCreated,
    TaskStarted,
    TaskCompleted,
    TaskPostponed,
    GoalCreated,
    GoalUpdated,
    HabitLogged,
    ProcrastinationDetected,
    InterventionDismissed,
    AiAdviceRequested,
}

impl UserAction {
    pub const ALL: [UserAction; 10] = [
        UserAction::TaskCreated,
        UserAction::TaskStarted,
        UserAction::TaskCompleted,
        UserAction::TaskPostponed,
        UserAction::GoalCreated,
        UserAction::GoalUpdated,
        UserAction::HabitLogged,
        UserAction::ProcrastinationDetected,
        UserAction::InterventionDismissed,
        UserAction::AiAdviceRequested,
    ];

    /// Wire name, e.g. `TASK_POSTPONED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::TaskCreated => "TASK_CREATED",
            UserAction::TaskStarted => "TASK_STARTED",
            UserAction::TaskCompleted => "TASK_COMPLETED",
            UserAction::TaskPostponed => "TASK_POSTPONED",
            UserAction::GoalCreated => "GOAL_CREATED",
            UserAction::GoalUpdated => "GOAL_UPDATED",
            UserAction::HabitLogged => "HABIT_LOGGED",
            UserAction::ProcrastinationDetected => "PROCRASTINATION_DETECTED",
            UserAction::InterventionDismissed => "INTERVENTION_DISMISSED",
            UserAction::AiAdviceRequested => "AI_ADVICE_REQUESTED",
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserAction {
    type Err = ValidationError;

    /// Accepts the wire name in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_variant(s);
        UserAction::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "action".to_string(),
                message: format!("unknown action '{s}'"),
            })
    }
}

/// Self-reported mood.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionalState {
    Motivated,
    Anxious,
    Overwhelmed,
    Focused,
    Distracted,
    Confident,
    Doubtful,
    Energetic,
    Tired,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 9] = [
        EmotionalState::Motivated,
        EmotionalState::Anxious,
        EmotionalState::Overwhelmed,
        EmotionalState::Focused,
        EmotionalState::Distracted,
        EmotionalState::Confident,
        EmotionalState::Doubtful,
        EmotionalState::Energetic,
        EmotionalState::Tired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Motivated => "MOTIVATED",
            EmotionalState::Anxious => "ANXIOUS",
            EmotionalState::Overwhelmed => "OVERWHELMED",
            EmotionalState::Focused => "FOCUSED",
            EmotionalState::Distracted => "DISTRACTED",
            EmotionalState::Confident => "CONFIDENT",
            EmotionalState::Doubtful => "DOUBTFUL",
            EmotionalState::Energetic => "ENERGETIC",
            EmotionalState::Tired => "TIRED",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_variant(s);
        EmotionalState::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "mood".to_string(),
                message: format!("unknown mood '{s}'"),
            })
    }
}

/// `task-postponed` / `Task_Postponed` -> `TASK_POSTPONED`
pub(crate) fn normalize_variant(s: &str) -> String {
    s.trim().replace('-', "_").to_ascii_uppercase()
}

/// Date-time layouts carrying a numeric offset, tried after RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// An observed user action.
///
/// `timestamp` holds the caller's string untouched. It is parsed lazily by
/// [`BehaviorEvent::timestamp_utc`]; an unparseable value never prevents the
/// event from being stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEvent {
    /// Event identifier
    #[serde(default)]
    pub id: String,

    /// What the user did
    pub action: UserAction,

    /// Free-form context attached by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    /// Mood at the time of the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<EmotionalState>,

    /// Risk value attached at capture time (0.0-1.0)
    #[serde(default)]
    pub procrastination_risk: f64,

    /// Interventions already taken
    #[serde(default)]
    pub intervention_taken: Vec<String>,

    /// When the action happened (RFC 3339)
    pub timestamp: String,

    /// Owning user
    #[serde(default)]
    pub user_id: String,
}

impl BehaviorEvent {
    /// Create an event for `action` at `at`.
    pub fn new(action: UserAction, at: DateTime<Utc>) -> Self {
        Self::with_raw_timestamp(action, at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Create an event carrying a timestamp string exactly as received.
    pub fn with_raw_timestamp(action: UserAction, timestamp: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            action,
            context: None,
            emotional_state: None,
            procrastination_risk: 0.0,
            intervention_taken: Vec::new(),
            timestamp: timestamp.into(),
            user_id: String::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn mood(mut self, mood: EmotionalState) -> Self {
        self.emotional_state = Some(mood);
        self
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn risk(mut self, risk: f64) -> Self {
        self.procrastination_risk = risk.clamp(0.0, 1.0);
        self
    }

    pub fn intervention(mut self, intervention: impl Into<String>) -> Self {
        self.intervention_taken.push(intervention.into());
        self
    }

    /// Parse the timestamp as an instant.
    ///
    /// Accepts RFC 3339, ISO 8601 date-times with a colon-less offset
    /// (`+0000`) or at minute precision, and bare dates. Forms without an
    /// offset are read as UTC; a bare date is midnight UTC. Returns `None`
    /// for anything else.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Some(dt) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        {
            return Some(dt.with_timezone(&Utc));
        }
        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
