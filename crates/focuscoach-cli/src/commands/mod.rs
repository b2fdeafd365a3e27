pub mod analyze;
pub mod completions;
pub mod config;
pub mod event;
pub mod patterns;
pub mod task;

use focuscoach_core::{Config, CoreError, ProcrastinationDetector, SessionStore, SystemClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// The saved session loaded into a live detector.
pub struct Session {
    store: SessionStore,
    pub detector: ProcrastinationDetector<SystemClock>,
}

impl Session {
    /// Load config and session state from the data directory.
    pub fn open() -> Result<Self, CoreError> {
        let config = Config::load()?;
        let store = SessionStore::open_default()?;
        let state = store.load()?;
        tracing::debug!(
            path = %store.path().display(),
            events = state.behavior.len(),
            tasks = state.tasks.len(),
            "session loaded"
        );
        let detector =
            ProcrastinationDetector::from_state(config.detector_config(), SystemClock, state);
        Ok(Self { store, detector })
    }

    pub fn save(&self) -> Result<(), CoreError> {
        self.store.save(&self.detector.state())
    }
}
