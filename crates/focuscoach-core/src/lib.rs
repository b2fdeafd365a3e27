//! # Focuscoach Core Library
//!
//! Procrastination risk engine for a productivity assistant. The library is
//! host-agnostic: the `focuscoach` CLI is a thin layer over the same types.
//!
//! ## Architecture
//!
//! - **Detector**: per-session state (bounded behavior and task histories plus
//!   six pattern scores) and the `analyze` entry point
//! - **Analyzers**: independent rule sets (temporal, behavioral, emotional,
//!   task traits) that each emit [`ProcrastinationSignal`]s
//! - **Analysis**: severity-weighted risk aggregation and recommendations
//! - **Storage**: TOML configuration and a JSON session snapshot
//!
//! ## Key Components
//!
//! - [`ProcrastinationDetector`]: the stateful scorer
//! - [`ProcrastinationAnalysis`]: risk score, signals, recommendations
//! - [`Intervention`]: nudge bundle selected from an analysis
//! - [`Config`]: application configuration management
//! - [`Clock`]: time source injected into the detector

pub mod analysis;
pub mod analyzers;
pub mod behavior;
pub mod clock;
pub mod detector;
pub mod error;
pub mod history;
pub mod intervention;
pub mod patterns;
pub mod signal;
pub mod storage;
pub mod task;

pub use analysis::{ProcrastinationAnalysis, RiskLevel};
pub use analyzers::WallClock;
pub use behavior::{BehaviorEvent, EmotionalState, UserAction};
pub use clock::{Clock, FixedClock, SystemClock};
pub use detector::{DetectorConfig, DetectorState, PatternUpdate, ProcrastinationDetector};
pub use error::{ConfigError, CoreError, ValidationError};
pub use history::RollingBuffer;
pub use intervention::{motivational_quote, Intervention, Urgency};
pub use patterns::{ImportReport, PatternKind, PatternMap, PatternScores};
pub use signal::{ProcrastinationSignal, Severity, SignalType};
pub use storage::{Config, SessionStore};
pub use task::{EnergyLevel, Priority, TaskSnapshot};
