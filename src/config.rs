//! Runtime settings for the demo binary.
//!
//! Settings come from three layers: built-in defaults, an optional config
//! file, and `GRIDFIELD_*` environment variables. Command line flags are
//! merged on top by the binary, so the precedence is CLI, then environment,
//! then file, then defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON file with user rows; the built-in sample directory when absent.
    pub data: Option<PathBuf>,
    /// Simulated fetch latency before the built-in rows arrive.
    pub delay: String,
    /// Event poll interval.
    pub tick_rate: String,
    /// Theme name: "auto", "dark" or "light".
    pub theme: String,
    /// Log file path; logging is disabled when absent.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: None,
            delay: "800ms".to_string(),
            tick_rate: "100ms".to_string(),
            theme: "auto".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the optional config file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("GRIDFIELD").separator("__"))
            .build()
            .context("failed to load configuration")?;
        config
            .try_deserialize()
            .context("invalid configuration values")
    }

    pub fn delay(&self) -> Result<Duration> {
        parse_duration(&self.delay).context("invalid delay")
    }

    pub fn tick_rate(&self) -> Result<Duration> {
        parse_duration(&self.tick_rate).context("invalid tick_rate")
    }

    /// Resolve the configured theme name, auto-detecting by default.
    pub fn theme(&self) -> Theme {
        match self.theme.as_str() {
            "dark" => Theme::dark(),
            "light" => Theme::light(),
            _ => Theme::auto_detect(),
        }
    }
}
