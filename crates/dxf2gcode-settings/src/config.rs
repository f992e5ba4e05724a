//! Configuration for dxf2gcode
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default location is
//! `<config_dir>/dxf2gcode/config.toml`.
//!
//! Configuration is organized into sections:
//! - Conversion parameters (extrusion rate, feed rate, print area center)
//! - Output preferences (file extension, summary)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use dxf2gcode_camtools::ConversionParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Extension appended to the input file name to form the output path
    pub extension: String,
    /// Print the bounding box summary after a run
    pub print_summary: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            extension: "gcode".to_string(),
            print_summary: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Conversion parameters
    pub conversion: ConversionParameters,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dxf2gcode").join("config.toml"))
    }

    /// Load the platform config file if it exists
    pub fn load_default() -> SettingsResult<Option<Self>> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!("Loading config from {}", path.display());
                Self::load_from_file(&path).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.conversion
            .validate()
            .map_err(|e| SettingsError::InvalidSetting {
                key: "conversion".to_string(),
                reason: e.to_string(),
            })?;

        let ext = &self.output.extension;
        if ext.is_empty() || ext.contains(['/', '\\']) || ext.starts_with('.') {
            return Err(ConfigError::ValueOutOfRange {
                key: "output.extension".to_string(),
                value: ext.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Output path for `input`: the full input name plus the configured extension
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(&self.output.extension);
        PathBuf::from(name)
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }
}
