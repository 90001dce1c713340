//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`MorphoSettings::default()`]
//! 2. If `~/.morpho/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `MORPHO_*` environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{LOG_LEVELS, MorphoSettings};

/// Resolve the path to the settings file (`~/.morpho/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_owned());
    PathBuf::from(home).join(".morpho").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<MorphoSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON, or a file that sets an
/// invalid value, is an error.
pub fn load_settings_from_path(path: &Path) -> Result<MorphoSettings> {
    let defaults = serde_json::to_value(MorphoSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: MorphoSettings = serde_json::from_value(merged)?;
    settings.validate()?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = match target_map.remove(&key) {
                    Some(target_val) => deep_merge(target_val, source_val),
                    None => source_val,
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `MORPHO_*` environment variable overrides.
///
/// Invalid values are ignored with a warning.
pub fn apply_env_overrides(settings: &mut MorphoSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides from any variable source.
pub fn apply_overrides_from<F>(settings: &mut MorphoSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    // ── Engines ─────────────────────────────────────────────────────
    if let Some(v) = read("MORPHO_GUIDANCE_VERSION") {
        match parse_version(&v) {
            Some(version) => settings.guidance.version = version,
            None => warn!(key = "MORPHO_GUIDANCE_VERSION", value = %v, "invalid version, ignoring"),
        }
    }
    if let Some(v) = read("MORPHO_SCORING_VERSION") {
        match parse_version(&v) {
            Some(version) => settings.scoring.version = version,
            None => warn!(key = "MORPHO_SCORING_VERSION", value = %v, "invalid version, ignoring"),
        }
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("MORPHO_LOG_LEVEL") {
        match parse_log_level(&v) {
            Some(level) => settings.logging.level = level,
            None => warn!(key = "MORPHO_LOG_LEVEL", value = %v, "invalid log level, ignoring"),
        }
    }
    if let Some(v) = read("MORPHO_LOG_FORMAT") {
        match parse_version(&v) {
            Some(format) => settings.logging.format = format,
            None => warn!(key = "MORPHO_LOG_FORMAT", value = %v, "invalid log format, ignoring"),
        }
    }

    // ── Content ─────────────────────────────────────────────────────
    if let Some(v) = read("MORPHO_TASKS_PATH") {
        settings.content.tasks_path = v;
    }
    if let Some(v) = read("MORPHO_ROUTES_PATH") {
        settings.content.routes_path = v;
    }
    if let Some(v) = read("MORPHO_START_TASK") {
        settings.content.start_task = Some(v.trim().to_owned());
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a settings enum from its wire name (`v1`, `V2`, `json`, ...).
pub fn parse_version<T: DeserializeOwned>(val: &str) -> Option<T> {
    serde_json::from_value(Value::String(val.trim().to_lowercase())).ok()
}

/// Parse a log level name.
pub fn parse_log_level(val: &str) -> Option<String> {
    let level = val.trim().to_lowercase();
    LOG_LEVELS.contains(&level.as_str()).then_some(level)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
