//! Persisted settings for layout automation.
//!
//! Settings are stored in `~/.config/par-layout/config.yaml`. Every field
//! has a default, so a missing or partial file is always valid.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Entry mode names accepted in settings and layout requests
pub const ENTRY_MODE_NAMES: [&str; 5] = ["window", "tab", "horizontal", "vertical", "pane"];

/// User-facing settings for layout automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Whether layout requests found in session output are acted upon
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Entry mode used when a request does not name one
    #[serde(default = "default_entry")]
    pub default_entry: String,

    /// Prefix each command with a space so shells configured with
    /// `HISTCONTROL=ignorespace` (or zsh `HIST_IGNORE_SPACE`) skip it
    #[serde(default)]
    pub hide_from_history: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_entry() -> String {
    "tab".to_string()
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_entry: default_entry(),
            hide_from_history: false,
        }
    }
}

impl LayoutSettings {
    /// Check field values that serde cannot validate on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entry = self.default_entry.trim().to_ascii_lowercase();
        if !ENTRY_MODE_NAMES.contains(&entry.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_entry '{}' is not one of {}",
                self.default_entry,
                ENTRY_MODE_NAMES.join(", ")
            )));
        }
        Ok(())
    }
}

/// Get the path to the settings file
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("par-layout")
        .join("config.yaml")
}

/// Load settings from the default location
pub fn load_settings() -> Result<LayoutSettings> {
    load_settings_from(&settings_path())
}

/// Load settings from a specific file
///
/// Returns defaults if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt or invalid.
pub fn load_settings_from(path: &Path) -> Result<LayoutSettings> {
    if !path.exists() {
        return Ok(LayoutSettings::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout settings from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(LayoutSettings::default());
    }

    let settings: LayoutSettings = serde_yaml_ng::from_str(&contents)
        .map_err(ConfigError::from)
        .with_context(|| format!("Failed to parse layout settings from {:?}", path))?;
    settings
        .validate()
        .with_context(|| format!("Invalid layout settings in {:?}", path))?;

    log::info!("Loaded layout settings from {:?}", path);
    Ok(settings)
}

/// Save settings to a specific file
pub fn save_settings_to(settings: &LayoutSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    let contents =
        serde_yaml_ng::to_string(settings).context("Failed to serialize layout settings")?;

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write layout settings to {:?}", path))?;

    log::info!("Saved layout settings to {:?}", path);
    Ok(())
}
