use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config as cfg;
use serde::{Deserialize, Serialize};

use crate::{FloatPolicy, TimeUnit};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default = "LoggingConfig::default_ansi")]
    pub ansi: bool,
}

impl LoggingConfig {
    fn default_ansi() -> bool {
        true
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            ansi: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub float_policy: FloatPolicy,
    #[serde(default)]
    pub time_unit: TimeUnit,
    /// Anchor for calendar output. Schedules stay in abstract ticks when
    /// unset.
    #[serde(default)]
    pub project_start: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Layered load: built-in defaults, then an optional TOML file, then
    /// `PERTGRAPH_`-prefixed environment variables (e.g.
    /// `PERTGRAPH_SCHEDULE__FLOAT_POLICY=legacy`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = cfg::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(cfg::File::from(path)),
            None => builder.add_source(cfg::File::with_name("pertgraph").required(false)),
        };
        builder = builder.add_source(cfg::Environment::with_prefix("PERTGRAPH").separator("__"));

        let settings: Settings = builder
            .build()
            .context("Failed to assemble configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            matches!(
                self.logging.level.as_str(),
                "trace" | "debug" | "info" | "warn" | "error"
            ),
            "logging.level must be one of trace|debug|info|warn|error"
        );
        Ok(())
    }
}
