//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a partial
//! JSON file only needs the keys it changes.

use morpho_guidance::{GuidanceRules, GuidanceVersion};
use morpho_scoring::{ScoringRules, ScoringVersion};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root settings.
///
/// ```json
/// {
///   "guidance": { "version": "v1" },
///   "content": { "tasksPath": "lessons/tasks.json", "startTask": "t4_matrix_jump" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorphoSettings {
    /// Evidence validator selection.
    pub guidance: GuidanceSettings,
    /// Mastery scorer selection.
    pub scoring: ScoringSettings,
    /// Log output.
    pub logging: LoggingSettings,
    /// Where task content and routes are read from.
    pub content: ContentSettings,
}

impl MorphoSettings {
    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SettingsError::InvalidValue(format!(
                "logging.level: {}",
                self.logging.level
            )));
        }
        if self.content.tasks_path.trim().is_empty() {
            return Err(SettingsError::InvalidValue("content.tasksPath is empty".to_owned()));
        }
        if self.content.routes_path.trim().is_empty() {
            return Err(SettingsError::InvalidValue("content.routesPath is empty".to_owned()));
        }
        Ok(())
    }
}

/// Evidence validator settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceSettings {
    /// Heuristics version (`v1` or `v2`).
    pub version: GuidanceVersion,
}

impl GuidanceSettings {
    /// Rules for the configured version.
    pub fn rules(&self) -> GuidanceRules {
        GuidanceRules::for_version(self.version)
    }
}

/// Mastery scorer settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringSettings {
    /// Heuristics version.
    pub version: ScoringVersion,
}

impl ScoringSettings {
    /// Rules for the configured version.
    pub fn rules(&self) -> ScoringRules {
        ScoringRules::for_version(self.version)
    }
}

/// Log line format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter level; `RUST_LOG` still wins.
    pub level: String,
    /// Line format on stderr.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Compact,
        }
    }
}

/// Content locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSettings {
    /// JSON array of task records.
    pub tasks_path: String,
    /// JSON route table.
    pub routes_path: String,
    /// First task of a session; the first task in the file when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_task: Option<String>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            tasks_path: "data/tasks.json".to_owned(),
            routes_path: "data/routes.json".to_owned(),
            start_task: None,
        }
    }
}
