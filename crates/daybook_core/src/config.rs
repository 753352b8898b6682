//! Runtime configuration for the calendar core.
//!
//! # Responsibility
//! - Collect the data file location, working window and logging knobs.
//! - Resolve values from a caller-supplied key lookup (usually env vars).
//!
//! # Invariants
//! - `working_hours.day_start < working_hours.day_end`.
//! - `working_hours.quantum_minutes` is within `1..=60`.

use crate::calendar::WorkingHours;
use crate::logging::default_log_level;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "calendar_data.json";

pub const ENV_DATA_FILE: &str = "DAYBOOK_DATA_FILE";
pub const ENV_DAY_START: &str = "DAYBOOK_DAY_START";
pub const ENV_DAY_END: &str = "DAYBOOK_DAY_END";
pub const ENV_SLOT_QUANTUM: &str = "DAYBOOK_SLOT_QUANTUM";
pub const ENV_LOG_LEVEL: &str = "DAYBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DAYBOOK_LOG_DIR";

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub data_file: PathBuf,
    pub working_hours: WorkingHours,
    pub log_level: String,
    /// Absolute log directory; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            working_hours: WorkingHours::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CalendarConfig {
    /// Builds a config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config, asking `lookup` for each `DAYBOOK_*` key.
    ///
    /// Missing or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_DATA_FILE) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(value) = get(ENV_DAY_START) {
            config.working_hours.day_start = parse_time(ENV_DAY_START, &value)?;
        }
        if let Some(value) = get(ENV_DAY_END) {
            config.working_hours.day_end = parse_time(ENV_DAY_END, &value)?;
        }
        if let Some(value) = get(ENV_SLOT_QUANTUM) {
            config.working_hours.quantum_minutes = value.parse().map_err(|err| {
                ConfigError::Invalid {
                    key: ENV_SLOT_QUANTUM,
                    value: value.clone(),
                    reason: format!("{err}"),
                }
            })?;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let hours = &self.working_hours;
        if hours.day_start >= hours.day_end {
            return Err(ConfigError::Invalid {
                key: ENV_DAY_END,
                value: hours.day_end.format(TIME_FORMAT).to_string(),
                reason: format!(
                    "must be later than day start {}",
                    hours.day_start.format(TIME_FORMAT)
                ),
            });
        }
        if !(1..=60).contains(&hours.quantum_minutes) {
            return Err(ConfigError::Invalid {
                key: ENV_SLOT_QUANTUM,
                value: hours.quantum_minutes.to_string(),
                reason: "expected 1..=60 minutes".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_time(key: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: format!("expected HH:MM ({err})"),
    })
}

#[cfg(test)]
mod tests {
    use super::{CalendarConfig, ConfigError, ENV_DAY_END, ENV_DAY_START, ENV_SLOT_QUANTUM};
    use chrono::NaiveTime;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = CalendarConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(config.data_file.to_str(), Some("calendar_data.json"));
    }

    #[test]
    fn working_hours_are_overridable() {
        let config = CalendarConfig::from_lookup(lookup(&[
            (ENV_DAY_START, "07:30"),
            (ENV_DAY_END, " 16:00 "),
            (ENV_SLOT_QUANTUM, "30"),
        ]))
        .unwrap();

        assert_eq!(
            config.working_hours.day_start,
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
        assert_eq!(
            config.working_hours.day_end,
            NaiveTime::from_hms_opt(16, 0, 0).unwrap()
        );
        assert_eq!(config.working_hours.quantum_minutes, 30);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = CalendarConfig::from_lookup(lookup(&[
            (ENV_DAY_START, "18:00"),
            (ENV_DAY_END, "08:00"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_DAY_END));
    }

    #[test]
    fn malformed_values_name_their_key() {
        let err = CalendarConfig::from_lookup(lookup(&[(ENV_DAY_START, "8am")])).unwrap_err();
        assert!(err.to_string().contains(ENV_DAY_START));

        let err = CalendarConfig::from_lookup(lookup(&[(ENV_SLOT_QUANTUM, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_SLOT_QUANTUM));
    }
}
