//! # morpho-settings
//!
//! Layered configuration for the morphology lab.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`MorphoSettings::default()`]
//! 2. **User file**: `~/.morpho/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `MORPHO_*` overrides (highest priority)
//!
//! There is no global instance. The driving surface loads settings once and
//! passes the values it needs to the engines.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides_from, deep_merge, load_settings, load_settings_from_path,
    settings_path,
};
pub use types::{
    ContentSettings, GuidanceSettings, LogFormat, LoggingSettings, MorphoSettings, ScoringSettings,
};
