//! The procrastination risk engine.
//!
//! A [`ProcrastinationDetector`] belongs to one user session. It keeps a
//! bounded history of behavior events and task snapshots plus the six pattern
//! scores, and computes a [`ProcrastinationAnalysis`] on demand.
//!
//! The detector has no internal synchronization. Hosts that share one across
//! threads must serialize access themselves, e.g. behind a `Mutex`.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{ProcrastinationAnalysis, DEFAULT_INTERVENTION_THRESHOLD};
use crate::analyzers::{self, AnalysisContext, WallClock};
use crate::behavior::{BehaviorEvent, EmotionalState};
use crate::clock::{Clock, SystemClock};
use crate::history::RollingBuffer;
use crate::intervention::{self, Intervention};
use crate::patterns::{ImportReport, PatternMap, PatternScores};
use crate::task::TaskSnapshot;

/// Tunables for a detector. The defaults reproduce the standard rule set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Behavior events retained
    pub behavior_capacity: usize,
    /// Task snapshots retained
    pub task_capacity: usize,
    /// Events older than this do not move pattern scores
    pub pattern_window_hours: u32,
    /// Risk above which an intervention is flagged as needed
    pub intervention_threshold: f64,
    /// Offset from UTC used for hour-of-day rules; `None` reads the host's
    /// local zone
    pub timezone_offset_hours: Option<i32>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            behavior_capacity: 100,
            task_capacity: 50,
            pattern_window_hours: 24,
            intervention_threshold: DEFAULT_INTERVENTION_THRESHOLD,
            timezone_offset_hours: None,
        }
    }
}

impl DetectorConfig {
    /// Zone for hour-of-day rules. Out-of-range offsets fall back to UTC.
    pub fn wall_clock(&self) -> WallClock {
        match self.timezone_offset_hours {
            None => WallClock::Local,
            Some(hours) => WallClock::Fixed(
                hours
                    .checked_mul(3600)
                    .and_then(FixedOffset::east_opt)
                    .unwrap_or_else(|| Utc.fix()),
            ),
        }
    }
}

/// What recording a behavior event did to the pattern scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternUpdate {
    /// The event was recent and its increments were applied
    Applied,
    /// The event is older than the pattern window
    Stale,
    /// The timestamp did not parse
    MalformedTimestamp,
}

/// Serializable snapshot of a detector's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorState {
    /// Behavior events, oldest first
    #[serde(default)]
    pub behavior: Vec<BehaviorEvent>,
    /// Task snapshots, oldest first
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
    #[serde(default)]
    pub patterns: PatternMap,
}

/// Stateful procrastination risk scorer for one user session.
#[derive(Debug, Clone)]
pub struct ProcrastinationDetector<C: Clock = SystemClock> {
    config: DetectorConfig,
    clock: C,
    behavior: RollingBuffer<BehaviorEvent>,
    tasks: RollingBuffer<TaskSnapshot>,
    patterns: PatternScores,
}

impl ProcrastinationDetector<SystemClock> {
    /// Create a detector with default config reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(DetectorConfig::default(), SystemClock)
    }

    /// Create a detector with custom config reading the system clock.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for ProcrastinationDetector<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ProcrastinationDetector<C> {
    pub fn with_clock(config: DetectorConfig, clock: C) -> Self {
        Self {
            behavior: RollingBuffer::new(config.behavior_capacity),
            tasks: RollingBuffer::new(config.task_capacity),
            patterns: PatternScores::new(),
            config,
            clock,
        }
    }

    /// Rebuild a detector from a saved state.
    ///
    /// Histories are re-trimmed to the configured capacities. Pattern scores
    /// are taken from the snapshot as-is (clamped); events are not replayed.
    pub fn from_state(config: DetectorConfig, clock: C, state: DetectorState) -> Self {
        let mut detector = Self::with_clock(config, clock);
        detector.behavior.extend(state.behavior);
        detector.tasks.extend(state.tasks);
        detector.import_patterns(&state.patterns);
        detector
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Store a behavior event and, if it is recent, bump the pattern scores.
    ///
    /// The event is always stored, even when its timestamp is malformed or
    /// outside the pattern window.
    pub fn record_behavior(&mut self, event: BehaviorEvent) -> PatternUpdate {
        let update = self.update_patterns(&event);
        tracing::debug!(
            action = %event.action,
            mood = ?event.emotional_state,
            update = ?update,
            "behavior event recorded"
        );
        let dropped = self.behavior.push(event);
        if dropped > 0 {
            tracing::trace!(dropped, "behavior history trimmed");
        }
        update
    }

    fn update_patterns(&mut self, event: &BehaviorEvent) -> PatternUpdate {
        let Some(at) = event.timestamp_utc() else {
            tracing::warn!(
                timestamp = %event.timestamp,
                "unparseable behavior timestamp, skipping pattern update"
            );
            return PatternUpdate::MalformedTimestamp;
        };

        let hours_since = (self.clock.now() - at).num_milliseconds() as f64 / 3_600_000.0;
        if hours_since > f64::from(self.config.pattern_window_hours) {
            return PatternUpdate::Stale;
        }

        self.patterns.apply(event);
        PatternUpdate::Applied
    }

    /// Store a task snapshot.
    pub fn record_task(&mut self, task: TaskSnapshot) {
        tracing::debug!(task_id = %task.id, "task snapshot recorded");
        self.tasks.push(task);
    }

    /// Score the current situation.
    pub fn analyze(
        &self,
        current_task: Option<&TaskSnapshot>,
        current_mood: Option<EmotionalState>,
    ) -> ProcrastinationAnalysis {
        let ctx = AnalysisContext {
            now: self.clock.now(),
            wall_clock: self.config.wall_clock(),
            current_task,
            current_mood,
            behavior: self.behavior.as_slice(),
            patterns: self.patterns,
        };
        let signals = analyzers::run_all(&ctx);
        let analysis =
            ProcrastinationAnalysis::from_signals(signals, self.config.intervention_threshold);

        tracing::debug!(
            risk_score = analysis.risk_score,
            signals = analysis.signals.len(),
            intervention_needed = analysis.intervention_needed,
            "procrastination risk analyzed"
        );
        analysis
    }

    /// Pick the intervention bundle for an analysis.
    pub fn personalized_intervention(&self, analysis: &ProcrastinationAnalysis) -> Intervention {
        intervention::personalized_intervention(analysis)
    }

    pub fn pattern_scores(&self) -> PatternScores {
        self.patterns
    }

    pub fn export_patterns(&self) -> PatternMap {
        self.patterns.export()
    }

    /// Overwrite pattern scores from a plain mapping. Unknown keys and
    /// non-finite values are skipped.
    pub fn import_patterns(&mut self, patterns: &PatternMap) -> ImportReport {
        let report = self.patterns.import(patterns);
        for key in &report.unknown_keys {
            tracing::warn!(key = %key, "ignoring unknown pattern key");
        }
        for key in &report.rejected_keys {
            tracing::warn!(key = %key, "ignoring non-finite pattern value");
        }
        report
    }

    pub fn reset_patterns(&mut self) {
        self.patterns.reset();
    }

    /// Retained behavior events, oldest first.
    pub fn behavior_history(&self) -> &[BehaviorEvent] {
        self.behavior.as_slice()
    }

    /// Retained task snapshots, oldest first.
    pub fn task_history(&self) -> &[TaskSnapshot] {
        self.tasks.as_slice()
    }

    /// Most recent snapshot of the task with `id`.
    pub fn latest_task(&self, id: &str) -> Option<&TaskSnapshot> {
        self.tasks.iter().rev().find(|t| t.id == id)
    }

    pub fn state(&self) -> DetectorState {
        DetectorState {
            behavior: self.behavior.as_slice().to_vec(),
            tasks: self.tasks.as_slice().to_vec(),
            patterns: self.export_patterns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::UserAction;
    use crate::clock::FixedClock;
    use crate::patterns::PatternKind;
    use crate::task::EnergyLevel;
    use chrono::{DateTime, Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    fn detector() -> ProcrastinationDetector<FixedClock> {
        ProcrastinationDetector::with_clock(DetectorConfig::default(), FixedClock::new(now()))
    }

    #[test]
    fn recent_event_updates_patterns() {
        let mut d = detector();
        let update = d.record_behavior(BehaviorEvent::new(
            UserAction::TaskPostponed,
            now() - Duration::hours(2),
        ));
        assert_eq!(update, PatternUpdate::Applied);
        assert!(
            (d.pattern_scores().get(PatternKind::TaskPostponementFrequency) - 0.1).abs() < 1e-12
        );
    }

    #[test]
    fn stale_event_is_stored_without_pattern_update() {
        let mut d = detector();
        let update = d.record_behavior(BehaviorEvent::new(
            UserAction::TaskPostponed,
            now() - Duration::hours(25),
        ));
        assert_eq!(update, PatternUpdate::Stale);
        assert_eq!(d.behavior_history().len(), 1);
        assert_eq!(d.pattern_scores(), PatternScores::new());
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut d = detector();
        let update = d.record_behavior(BehaviorEvent::new(
            UserAction::TaskPostponed,
            now() - Duration::hours(24),
        ));
        assert_eq!(update, PatternUpdate::Applied);
    }

    #[test]
    fn malformed_timestamp_is_stored_without_pattern_update() {
        let mut d = detector();
        let update = d.record_behavior(
            BehaviorEvent::with_raw_timestamp(UserAction::ProcrastinationDetected, "soon")
                .mood(EmotionalState::Overwhelmed),
        );
        assert_eq!(update, PatternUpdate::MalformedTimestamp);
        assert_eq!(d.behavior_history().len(), 1);
        assert_eq!(d.pattern_scores(), PatternScores::new());
    }

    #[test]
    fn lenient_timestamp_forms_update_patterns() {
        // now() is 2026-05-04T10:00Z.
        for raw in ["2026-05-04", "2026-05-04T09:30", "2026-05-04T09:30:00.000+0000"] {
            let mut d = detector();
            let update =
                d.record_behavior(BehaviorEvent::with_raw_timestamp(UserAction::TaskPostponed, raw));
            assert_eq!(update, PatternUpdate::Applied, "{raw}");
        }
    }

    #[test]
    fn histories_are_capped() {
        let mut d = detector();
        for i in 0..130 {
            d.record_behavior(
                BehaviorEvent::new(UserAction::TaskCreated, now()).id(format!("e{i}")),
            );
        }
        for i in 0..70 {
            d.record_task(TaskSnapshot::new(format!("t{i}"), "task"));
        }
        assert_eq!(d.behavior_history().len(), 100);
        assert_eq!(d.behavior_history()[0].id, "e30");
        assert_eq!(d.task_history().len(), 50);
        assert_eq!(d.task_history()[0].id, "t20");
    }

    #[test]
    fn latest_task_returns_newest_snapshot() {
        let mut d = detector();
        d.record_task(TaskSnapshot::new("t1", "Report").progress(10.0));
        d.record_task(TaskSnapshot::new("t2", "Other"));
        d.record_task(TaskSnapshot::new("t1", "Report").progress(60.0));
        assert_eq!(d.latest_task("t1").map(|t| t.progress_percent), Some(60.0));
        assert!(d.latest_task("missing").is_none());
    }

    #[test]
    fn empty_detector_reports_low_risk() {
        let d = detector();
        let analysis = d.analyze(None, None);
        assert_eq!(analysis.risk_score, 0.0);
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(!analysis.intervention_needed);
    }

    #[test]
    fn intervention_threshold_is_configurable() {
        let config = DetectorConfig {
            intervention_threshold: 0.3,
            ..Default::default()
        };
        let d = ProcrastinationDetector::with_clock(config, FixedClock::new(now()));
        let analysis = d.analyze(None, Some(EmotionalState::Tired));
        assert!((analysis.risk_score - 0.5).abs() < 1e-12);
        assert!(analysis.intervention_needed);
    }

    #[test]
    fn state_round_trips() {
        let mut d = detector();
        d.record_behavior(
            BehaviorEvent::new(UserAction::TaskPostponed, now()).mood(EmotionalState::Anxious),
        );
        d.record_task(TaskSnapshot::new("t1", "Report"));

        let state = d.state();
        let json = serde_json::to_string(&state).unwrap();
        let parsed: DetectorState = serde_json::from_str(&json).unwrap();

        let restored =
            ProcrastinationDetector::from_state(DetectorConfig::default(), FixedClock::new(now()), parsed);
        assert_eq!(restored.behavior_history(), d.behavior_history());
        assert_eq!(restored.task_history(), d.task_history());
        assert_eq!(restored.pattern_scores(), d.pattern_scores());
    }

    #[test]
    fn from_state_retrims_to_capacity() {
        let state = DetectorState {
            tasks: (0..10).map(|i| TaskSnapshot::new(format!("t{i}"), "x")).collect(),
            ..Default::default()
        };
        let config = DetectorConfig {
            task_capacity: 4,
            ..Default::default()
        };
        let d = ProcrastinationDetector::from_state(config, FixedClock::new(now()), state);
        assert_eq!(d.task_history().len(), 4);
        assert_eq!(d.task_history()[0].id, "t6");
    }

    #[test]
    fn reset_clears_patterns() {
        let mut d = detector();
        d.record_behavior(BehaviorEvent::new(UserAction::InterventionDismissed, now()));
        d.reset_patterns();
        assert_eq!(d.pattern_scores(), PatternScores::new());
        assert_eq!(d.behavior_history().len(), 1);
    }

    #[test]
    fn offset_out_of_range_falls_back_to_utc() {
        for hours in [99, i32::MAX] {
            let config = DetectorConfig {
                timezone_offset_hours: Some(hours),
                ..Default::default()
            };
            assert_eq!(config.wall_clock(), WallClock::Fixed(Utc.fix()));
        }
    }

    #[test]
    fn default_config_reads_host_local_hours() {
        assert_eq!(DetectorConfig::default().wall_clock(), WallClock::Local);

        // 15:00 on the host falls in the afternoon low-energy window.
        let local_afternoon = chrono::Local
            .with_ymd_and_hms(2026, 1, 15, 15, 0, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        let d = ProcrastinationDetector::with_clock(
            DetectorConfig::default(),
            FixedClock::new(local_afternoon),
        );
        let task = TaskSnapshot::new("t1", "Migrate billing")
            .description("Move the billing tables to the new schema")
            .energy(EnergyLevel::High);

        let analysis = d.analyze(Some(&task), None);
        assert_eq!(analysis.signals.len(), 1);
        assert_eq!(analysis.signals[0].triggers[0], "energy_mismatch");
    }
}
