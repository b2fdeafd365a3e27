//! Task snapshots used for scoring.
//!
//! A [`TaskSnapshot`] is a point-in-time copy of a task as the host
//! application sees it. The engine never edits tasks; it only reads the
//! fields that matter for avoidance risk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::behavior::normalize_variant;
use crate::error::ValidationError;

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            _ => Err(ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("unknown priority '{s}'"),
            }),
        }
    }
}

/// Energy a task demands from the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::VeryLow => "VERY_LOW",
            EnergyLevel::Low => "LOW",
            EnergyLevel::Medium => "MEDIUM",
            EnergyLevel::High => "HIGH",
            EnergyLevel::VeryHigh => "VERY_HIGH",
        }
    }

    /// HIGH or VERY_HIGH.
    pub fn is_demanding(&self) -> bool {
        matches!(self, EnergyLevel::High | EnergyLevel::VeryHigh)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "VERY_LOW" => Ok(EnergyLevel::VeryLow),
            "LOW" => Ok(EnergyLevel::Low),
            "MEDIUM" => Ok(EnergyLevel::Medium),
            "HIGH" => Ok(EnergyLevel::High),
            "VERY_HIGH" => Ok(EnergyLevel::VeryHigh),
            _ => Err(ValidationError::InvalidValue {
                field: "energy".to_string(),
                message: format!("unknown energy level '{s}'"),
            }),
        }
    }
}

/// Point-in-time view of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    /// Task ID
    pub id: String,

    /// Task title
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the task is completed
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    /// Soft due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Estimated duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,

    /// Hard cutoff, distinct from the due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,

    /// Progress (0-100), fractional values allowed
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress_percent: f64,

    /// Difficulty (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_required: Option<EnergyLevel>,
}

impl TaskSnapshot {
    /// Create an open, medium-priority task with no progress.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            estimated_duration: None,
            deadline: None,
            progress_percent: 0.0,
            difficulty_level: None,
            energy_required: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn estimate(mut self, minutes: u32) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    /// Progress is clamped to 0-100.
    pub fn progress(mut self, percent: f64) -> Self {
        self.progress_percent = clamp_progress(percent);
        self
    }

    pub fn difficulty(mut self, level: u8) -> Self {
        self.difficulty_level = Some(level);
        self
    }

    pub fn energy(mut self, energy: EnergyLevel) -> Self {
        self.energy_required = Some(energy);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Description length in characters, zero when absent.
    pub fn description_len(&self) -> usize {
        self.description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0)
    }
}

/// Non-finite input reads as no progress.
fn clamp_progress(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let percent = Option::<f64>::deserialize(deserializer)?;
    Ok(percent.map(clamp_progress).unwrap_or(0.0))
}
