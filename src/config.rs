use crate::calendar::TimeRange;
use crate::duration::DurationDefaults;
use crate::error::{ProjectError, ProjectResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const DEFAULT_CALENDAR_NAME: &str = "Standard";

/// Settings consumed when entities are created or identities change.
///
/// Every `auto_*` flag decides whether the project derives the value
/// itself (`true`) or leaves it for the caller to supply (`false`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub auto_wbs: bool,
    pub auto_outline_level: bool,
    pub auto_outline_number: bool,
    pub auto_task_id: bool,
    pub auto_task_unique_id: bool,
    pub auto_resource_id: bool,
    pub auto_resource_unique_id: bool,
    pub auto_calendar_unique_id: bool,
    pub duration_defaults: DurationDefaults,
    /// Working-time template applied to Monday through Friday, as `HH:MM` pairs.
    pub default_hours: Vec<(String, String)>,
    pub default_calendar_name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            auto_wbs: true,
            auto_outline_level: true,
            auto_outline_number: true,
            auto_task_id: true,
            auto_task_unique_id: true,
            auto_resource_id: true,
            auto_resource_unique_id: true,
            auto_calendar_unique_id: true,
            duration_defaults: DurationDefaults::default(),
            default_hours: vec![
                ("08:00".to_string(), "12:00".to_string()),
                ("13:00".to_string(), "17:00".to_string()),
            ],
            default_calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Config with every auto-numbering flag switched off.
    pub fn manual() -> Self {
        Self {
            auto_wbs: false,
            auto_outline_level: false,
            auto_outline_number: false,
            auto_task_id: false,
            auto_task_unique_id: false,
            auto_resource_id: false,
            auto_resource_unique_id: false,
            auto_calendar_unique_id: false,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> ProjectResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ProjectResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> ProjectResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> ProjectResult<()> {
        if self.duration_defaults.minutes_per_day == 0 {
            return Err(ProjectError::configuration("minutes_per_day must be positive"));
        }
        if self.duration_defaults.minutes_per_week < self.duration_defaults.minutes_per_day {
            return Err(ProjectError::configuration(format!(
                "minutes_per_week {} is shorter than minutes_per_day {}",
                self.duration_defaults.minutes_per_week, self.duration_defaults.minutes_per_day
            )));
        }
        if self.default_calendar_name.trim().is_empty() {
            return Err(ProjectError::configuration("default_calendar_name must not be empty"));
        }
        self.default_time_ranges().map(|_| ())
    }

    pub fn default_time_ranges(&self) -> ProjectResult<Vec<TimeRange>> {
        TimeRange::parse_template(&self.default_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_auto_flag() {
        let config = ProjectConfig::default();
        assert!(config.auto_wbs && config.auto_task_id && config.auto_calendar_unique_id);
        assert_eq!(config.default_calendar_name, "Standard");
        assert_eq!(config.default_time_ranges().unwrap().len(), 2);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ProjectConfig::from_json_str(r#"{ "auto_wbs": false }"#).unwrap();
        assert!(!config.auto_wbs);
        assert!(config.auto_outline_number);
        assert_eq!(config.duration_defaults.minutes_per_day, 480);
    }

    #[test]
    fn malformed_hours_template_is_rejected() {
        let err = ProjectConfig::from_json_str(r#"{ "default_hours": [["8am", "12:00"]] }"#)
            .unwrap_err();
        assert!(matches!(err, ProjectError::Configuration { .. }));
    }
}
