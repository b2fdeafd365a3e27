//! TOML-based application configuration.
//!
//! Stores the detector tunables:
//! - History capacities (behavior events, task snapshots)
//! - Pattern update window
//! - Intervention threshold
//! - Time zone offset used for hour-of-day rules (host-local when unset)
//!
//! Configuration is stored at `~/.config/focuscoach/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::analysis::DEFAULT_INTERVENTION_THRESHOLD;
use crate::detector::DetectorConfig;
use crate::error::{ConfigError, Result};

/// History buffer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_behavior_capacity")]
    pub behavior_capacity: usize,
    #[serde(default = "default_task_capacity")]
    pub task_capacity: usize,
}

/// Pattern score configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternsConfig {
    /// Events older than this many hours do not move pattern scores
    #[serde(default = "default_update_window_hours")]
    pub update_window_hours: u32,
}

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_intervention_threshold")]
    pub intervention_threshold: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focuscoach/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Wall-clock hour = UTC hour + offset. Unset reads the host's local
    /// zone, daylight saving included.
    #[serde(default)]
    pub timezone_offset_hours: Option<i32>,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub patterns: PatternsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Value shown for, and accepted to reset, an unset time zone offset.
const LOCAL_ZONE: &str = "local";

// Default functions
fn default_behavior_capacity() -> usize {
    100
}
fn default_task_capacity() -> usize {
    50
}
fn default_update_window_hours() -> u32 {
    24
}
fn default_intervention_threshold() -> f64 {
    DEFAULT_INTERVENTION_THRESHOLD
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            behavior_capacity: default_behavior_capacity(),
            task_capacity: default_task_capacity(),
        }
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            update_window_hours: default_update_window_hours(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            intervention_threshold: default_intervention_threshold(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    // Optional numbers are cleared with "local".
                    serde_json::Value::Null | serde_json::Value::Number(_)
                        if value.eq_ignore_ascii_case(LOCAL_ZONE) =>
                    {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Null | serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.behavior_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history.behavior_capacity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.history.task_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "history.task_capacity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let threshold = self.analysis.intervention_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                key: "analysis.intervention_threshold".to_string(),
                message: format!("{threshold} is outside 0.0-1.0"),
            });
        }
        if let Some(offset) = self.timezone_offset_hours {
            if !(-12..=14).contains(&offset) {
                return Err(ConfigError::InvalidValue {
                    key: "timezone_offset_hours".to_string(),
                    message: format!("{offset} is outside -12..=14"),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some(LOCAL_ZONE.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The config is left untouched
    /// if the key is unknown, the value does not parse, or the result fails
    /// validation. Does not write to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Detector tunables derived from this config.
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            behavior_capacity: self.history.behavior_capacity,
            task_capacity: self.history.task_capacity,
            pattern_window_hours: self.patterns.update_window_hours,
            intervention_threshold: self.analysis.intervention_threshold,
            timezone_offset_hours: self.timezone_offset_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use indoc::indoc;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn fixed_offset_roundtrip() {
        let cfg = Config {
            timezone_offset_hours: Some(9),
            ..Config::default()
        };
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(toml_str.contains("timezone_offset_hours = 9"));
        assert_eq!(toml::from_str::<Config>(&toml_str).unwrap(), cfg);
    }

    #[test]
    fn defaults_match_detector_defaults() {
        assert_eq!(Config::default().detector_config(), DetectorConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(indoc! {r#"
            timezone_offset_hours = -5

            [history]
            task_capacity = 20
        "#})
        .unwrap();
        assert_eq!(cfg.timezone_offset_hours, Some(-5));
        assert_eq!(cfg.history.task_capacity, 20);
        assert_eq!(cfg.history.behavior_capacity, 100);
        assert_eq!(cfg.patterns.update_window_hours, 24);
        assert_eq!(cfg.analysis.intervention_threshold, 0.6);
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            indoc! {r#"
                [analysis]
                intervention_threshold = 1.5
            "#},
        )
        .unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidValue { ref key, .. })
                if key == "analysis.intervention_threshold"
        ));
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "history = 3 = 4").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn save_to_then_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.history.behavior_capacity = 10;
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("history.behavior_capacity").as_deref(), Some("100"));
        assert_eq!(cfg.get("analysis.intervention_threshold").as_deref(), Some("0.6"));
        assert_eq!(cfg.get("timezone_offset_hours").as_deref(), Some("local"));
        assert!(cfg.get("history").is_none());
        assert!(cfg.get("history.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_numbers() {
        let mut cfg = Config::default();
        cfg.set("history.task_capacity", "25").unwrap();
        cfg.set("analysis.intervention_threshold", "0.75").unwrap();
        cfg.set("timezone_offset_hours", "-3").unwrap();
        assert_eq!(cfg.history.task_capacity, 25);
        assert_eq!(cfg.analysis.intervention_threshold, 0.75);
        assert_eq!(cfg.timezone_offset_hours, Some(-3));
        assert_eq!(cfg.get("timezone_offset_hours").as_deref(), Some("-3"));

        cfg.set("timezone_offset_hours", "local").unwrap();
        assert_eq!(cfg.timezone_offset_hours, None);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("history.nonexistent_key", "1").is_err());
        assert!(cfg.set("history", "1").is_err());
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("history.task_capacity", "lots").is_err());
        assert!(cfg.set("history.task_capacity", "-4").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("history.behavior_capacity", "0").is_err());
        assert!(cfg.set("timezone_offset_hours", "20").is_err());
        assert_eq!(cfg, Config::default());
    }
}
