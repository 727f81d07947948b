//! `[logging]` section of the config file
//!
//! Every key is optional. The section deserializes straight into
//! [`LoggingConfig`] with missing keys taken from its `Default`.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    /// Lenient: anything unrecognised rolls daily
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("hourly") {
            Self::Hourly
        } else if s.eq_ignore_ascii_case("never") {
            Self::Never
        } else {
            Self::Daily
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl<'de> Deserialize<'de> for LogRotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Self::parse(&s))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Floor for Launchpad's own events; `RUST_LOG` replaces the whole filter
    #[serde(deserialize_with = "level_filter")]
    pub level: LevelFilter,

    /// Also write JSON lines under `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,

    /// The appender adds the date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "launchpad".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Level as written in the config file
    pub fn level_name(&self) -> String {
        self.level.to_string().to_ascii_lowercase()
    }
}

/// A misspelt level is a config error rather than a silent default
fn level_filter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LevelFilter, D::Error> {
    let raw = String::deserialize(deserializer)?;
    LevelFilter::from_str(raw.trim()).map_err(serde::de::Error::custom)
}
