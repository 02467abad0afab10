//! Analysis settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIN_DAYS_ENV: &str = "ATTENDANCE_MIN_DAYS_EXCLUSIVE";

/// Settings for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A streak is reported only when its length is strictly greater than this.
    #[serde(default = "default_min_days_exclusive")]
    pub min_days_exclusive: u32,
}

fn default_min_days_exclusive() -> u32 {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_days_exclusive: default_min_days_exclusive(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_min_days_exclusive(min_days_exclusive: u32) -> Self {
        Self { min_days_exclusive }
    }

    /// Loads settings in order of increasing precedence: defaults, the TOML
    /// file at `path` when given, then `ATTENDANCE_MIN_DAYS_EXCLUSIVE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is not valid TOML or the
    /// environment value is not a non-negative integer, and [`Error::Io`] if
    /// the file cannot be read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(MIN_DAYS_ENV) {
            config.apply_min_days_override(&value)?;
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid config file: {e}")))
    }

    fn apply_min_days_override(&mut self, value: &str) -> Result<()> {
        self.min_days_exclusive = value.trim().parse().map_err(|_| {
            Error::Config(format!(
                "{MIN_DAYS_ENV} must be a non-negative integer, got '{value}'"
            ))
        })?;
        Ok(())
    }
}
