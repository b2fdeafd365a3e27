//! JSON file holding one session's detector state.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::detector::DetectorState;
use crate::error::Result;

/// Reads and writes a [`DetectorState`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at `<data dir>/session.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(data_dir()?.join("session.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state, or an empty one if nothing was saved yet.
    pub fn load(&self) -> Result<DetectorState> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DetectorState::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, state: &DetectorState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
