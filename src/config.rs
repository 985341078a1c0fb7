//! Configuration module.
//!
//! Handles loading, validating, and merging `borda.toml`. A user file is
//! layered on top of the stock defaults, so it only needs the keys it wants
//! to change. Command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! default_ratio = "9:16"    # Ratio selected at startup and after reset
//! fill_percent = 95         # Share of the frame the photo may occupy (1-100)
//! background = "#ffffff"    # Matte color behind the photo
//! presets = ["9:16", "4:5", "1:1", "16:9"]
//!
//! [animation]
//! duration_ms = 450         # Ratio transition length
//! fps = 60                  # Frame rate used by `borda animate`
//!
//! [render]
//! filter = "lanczos3"       # nearest | triangle | catmullrom | lanczos3
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only switch to a black matte
//! background = "#000000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Background, Resampling};
use crate::ratio::{DEFAULT_PRESETS, DEFAULT_RATIO, parse_presets, parse_ratio};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "borda.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `borda.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BordaConfig {
    /// Ratio selected at startup and restored on reset, as `W:H`.
    pub default_ratio: String,
    /// Share of the frame the photo may occupy, 1-100.
    pub fill_percent: u32,
    /// Matte color as `#rrggbb`.
    pub background: String,
    /// Ratios offered for selection, in display order.
    pub presets: Vec<String>,
    /// Ratio transition settings.
    pub animation: AnimationConfig,
    /// Rasterization settings.
    pub render: RenderConfig,
}

impl Default for BordaConfig {
    fn default() -> Self {
        Self {
            default_ratio: DEFAULT_RATIO.to_string(),
            fill_percent: 95,
            background: "#ffffff".to_string(),
            presets: DEFAULT_PRESETS.iter().map(|p| p.to_string()).collect(),
            animation: AnimationConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl BordaConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_ratio(&self.default_ratio)
            .map_err(|e| ConfigError::Validation(format!("default_ratio: {e}")))?;
        if !(1..=100).contains(&self.fill_percent) {
            return Err(ConfigError::Validation(
                "fill_percent must be 1-100".into(),
            ));
        }
        self.background
            .parse::<Background>()
            .map_err(|e| ConfigError::Validation(format!("background: {e}")))?;
        if self.presets.is_empty() {
            return Err(ConfigError::Validation("presets must not be empty".into()));
        }
        parse_presets(&self.presets)
            .map_err(|e| ConfigError::Validation(format!("presets: {e}")))?;
        if self.animation.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.duration_ms must be positive".into(),
            ));
        }
        if !(1..=240).contains(&self.animation.fps) {
            return Err(ConfigError::Validation(
                "animation.fps must be 1-240".into(),
            ));
        }
        Ok(())
    }
}

/// Ratio transition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Transition length in milliseconds.
    pub duration_ms: u64,
    /// Frames per second when rendering a transition to disk.
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 450,
            fps: 60,
        }
    }
}

/// Rasterization settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Resampling filter used when scaling the photo into its rect.
    pub filter: Resampling,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BordaConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    debug!(path = %path.display(), "config file loaded");
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BordaConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BordaConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// A missing file yields the stock defaults. Otherwise merges user values on
/// top of stock defaults, rejects unknown keys, and validates the result.
pub fn load_config(path: &Path) -> Result<BordaConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `borda.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Borda Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# borda reads ./borda.toml unless --config points elsewhere.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Ratio selected at startup and after reset, as W:H.
default_ratio = "9:16"

# Share of the frame the photo may occupy before it is scaled to fit (1-100).
# 100 = full bleed on the binding axis.
fill_percent = 95

# Matte color behind the photo, as #rrggbb.
background = "#ffffff"

# Ratios offered for selection, in display order.
presets = ["9:16", "4:5", "1:1", "16:9"]

# ---------------------------------------------------------------------------
# Ratio transitions
# ---------------------------------------------------------------------------
[animation]
# Transition length in milliseconds (ease-out cubic).
duration_ms = 450

# Frames per second when `borda animate` writes a transition to disk (1-240).
fps = 60

# ---------------------------------------------------------------------------
# Rasterization
# ---------------------------------------------------------------------------
[render]
# Resampling filter used when scaling the photo:
# "nearest", "triangle", "catmullrom", or "lanczos3".
filter = "lanczos3"
"##
}
