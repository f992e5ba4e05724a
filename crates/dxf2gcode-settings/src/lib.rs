//! dxf2gcode Settings Crate
//!
//! Handles configuration defaults, file persistence, and validation.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
