//! Layered configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults ([`DashboardConfig::default`])
//! 2. An optional TOML file
//! 3. Environment variables prefixed `CARECONNECT`, nested with `__`
//!    (e.g. `CARECONNECT__GENERATOR__WINDOW_DAYS=14`)
//!
//! CLI flags are applied on top by the binary.
//!
//! ```toml
//! [generator]
//! window_days = 14
//! seed = 7
//!
//! [generator.baselines.systolic]
//! center = 130.0
//! spread = 15.0
//!
//! [display]
//! tick_interval_ms = 1000
//! theme = "dark"
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::{SampleData, VitalBaselines, DEFAULT_WINDOW_DAYS};
use crate::error::{DashboardError, Result};

/// Vitals generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Days before today covered by the series.
    pub window_days: u16,
    /// Fixed seed for reproducible series; entropy when absent.
    pub seed: Option<u64>,
    pub baselines: VitalBaselines,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            seed: None,
            baselines: VitalBaselines::default(),
        }
    }
}

/// Theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Period of the "last updated" clock.
    pub tick_interval_ms: u64,
    pub theme: ThemeChoice,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            theme: ThemeChoice::Auto,
        }
    }
}

impl DisplayConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Values given on the command line. Each one set replaces whatever the
/// file and environment produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub window_days: Option<u16>,
    pub seed: Option<u64>,
    pub tick_interval_ms: Option<u64>,
    pub theme: Option<ThemeChoice>,
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub generator: GeneratorConfig,
    pub display: DisplayConfig,
    pub data: SampleData,
}

impl DashboardConfig {
    /// Load from an optional file plus the environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("CARECONNECT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let loaded: DashboardConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Apply command-line values on top and validate the result.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(window) = overrides.window_days {
            self.generator.window_days = window;
        }
        if let Some(seed) = overrides.seed {
            self.generator.seed = Some(seed);
        }
        if let Some(tick_ms) = overrides.tick_interval_ms {
            self.display.tick_interval_ms = tick_ms;
        }
        if let Some(theme) = overrides.theme {
            self.display.theme = theme;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.display.tick_interval_ms == 0 {
            return Err(DashboardError::ZeroTickInterval);
        }
        self.generator.baselines.validate()?;
        self.data.validate()
    }
}
