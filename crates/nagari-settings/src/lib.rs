//! # nagari-settings
//!
//! Configuration for the Nagari CMS backend.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`NagariSettings::default()`]
//! 2. **Settings file**: `./nagari.json` or the path given with `--config`
//!    (deep-merged over defaults)
//! 3. **Environment variables**: `NAGARI_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    DEFAULT_SETTINGS_FILE, apply_env_overrides, apply_overrides_from, deep_merge, load_settings,
    load_settings_from_path,
};
pub use types::*;
