//! On-disk shape of the configuration file.
//!
//! ```toml
//! [work_hours]
//! start_time = "09:30"
//! end_time = "18:30"
//!
//! [progress_bar]
//! height = 2
//! completed_color = "lime"
//! uncompleted_color = "gray"
//!
//! [[breaks]]
//! start = "12:00"
//! end = "13:00"
//! exclude_from_progress = true
//! ```
//!
//! Values are kept as written here and validated when converted into
//! [Configuration](super::Configuration).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub work_hours: WorkHoursSection,
    pub progress_bar: ProgressBarSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<BreakEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHoursSection {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBarSection {
    pub height: u16,
    #[serde(default = "default_completed_color")]
    pub completed_color: String,
    #[serde(default = "default_uncompleted_color")]
    pub uncompleted_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEntry {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub exclude_from_progress: bool,
}

fn default_completed_color() -> String {
    "green".into()
}

fn default_uncompleted_color() -> String {
    "gray".into()
}

impl Default for ConfigDocument {
    /// The document written when no configuration file exists yet.
    fn default() -> Self {
        Self {
            work_hours: WorkHoursSection {
                start_time: "09:30".into(),
                end_time: "18:30".into(),
            },
            progress_bar: ProgressBarSection {
                height: 2,
                completed_color: "lime".into(),
                uncompleted_color: "gray".into(),
            },
            breaks: Vec::new(),
        }
    }
}

impl ConfigDocument {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Configuration is not a valid document")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigDocument;

    #[test]
    fn default_document_survives_disk_format() {
        let written = ConfigDocument::default().to_toml().unwrap();
        let parsed = ConfigDocument::from_toml(&written).unwrap();
        assert_eq!(parsed, ConfigDocument::default());
        assert!(written.contains("start_time = \"09:30\""));
        assert!(written.contains("completed_color = \"lime\""));
    }

    #[test]
    fn missing_optional_keys_use_defaults() {
        let document = ConfigDocument::from_toml(
            r#"
            [work_hours]
            start_time = "08:00"
            end_time = "16:00"

            [progress_bar]
            height = 4
            "#,
        )
        .unwrap();

        assert!(document.breaks.is_empty());
        assert_eq!(document.progress_bar.completed_color, "green");
        assert_eq!(document.progress_bar.uncompleted_color, "gray");
    }

    #[test]
    fn breaks_default_to_counted() {
        let document = ConfigDocument::from_toml(
            r#"
            [work_hours]
            start_time = "08:00"
            end_time = "16:00"

            [progress_bar]
            height = 4

            [[breaks]]
            start = "12:00"
            end = "12:30"

            [[breaks]]
            start = "14:00"
            end = "14:15"
            exclude_from_progress = true
            "#,
        )
        .unwrap();

        assert_eq!(document.breaks.len(), 2);
        assert!(!document.breaks[0].exclude_from_progress);
        assert!(document.breaks[1].exclude_from_progress);
    }

    #[test]
    fn missing_required_sections_fail() {
        assert!(ConfigDocument::from_toml("[progress_bar]\nheight = 2\n").is_err());
        assert!(ConfigDocument::from_toml(
            "[work_hours]\nstart_time = \"09:00\"\nend_time = \"17:00\"\n"
        )
        .is_err());
        assert!(ConfigDocument::from_toml("not toml at all = = =").is_err());
    }
}
