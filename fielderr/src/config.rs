//! Reporting configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Settings file passed to [`ReportSettings::load`] (format from its extension)
//! 3. Environment variables: `FIELDERR_*` prefix

use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::{instrument, Level};

use crate::errors::{SettingsError, SettingsResult};

const ENV_PREFIX: &str = "FIELDERR";

/// How composed errors are written to the log by [`crate::report::emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Level of the emitted events
    pub level: Level,
    /// One event per leaf; when false only the first leaf is logged
    pub per_leaf: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            level: Level::ERROR,
            per_leaf: true,
        }
    }
}

/// Raw settings for intermediate parsing; `level` is validated afterwards.
#[derive(Debug, Clone, Deserialize)]
struct RawSettings {
    level: String,
    per_leaf: bool,
}

impl TryFrom<RawSettings> for ReportSettings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> SettingsResult<Self> {
        let level = Level::from_str(raw.level.trim()).map_err(|_| SettingsError::InvalidValue {
            key: "level".to_string(),
            value: raw.level.clone(),
        })?;
        Ok(Self {
            level,
            per_leaf: raw.per_leaf,
        })
    }
}

impl ReportSettings {
    /// Load settings: defaults, then `path` if given, then `FIELDERR_*` variables.
    ///
    /// A given `path` must exist.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("level", defaults.level.as_str())?
            .set_default("per_leaf", defaults.per_leaf)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        Self::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_defaults_when_created_then_logs_every_leaf_at_error() {
        let settings = ReportSettings::default();
        assert_eq!(settings.level, Level::ERROR);
        assert!(settings.per_leaf);
    }

    #[rstest]
    #[case("error", Level::ERROR)]
    #[case("WARN", Level::WARN)]
    #[case(" info ", Level::INFO)]
    #[case("debug", Level::DEBUG)]
    #[case("trace", Level::TRACE)]
    fn given_raw_level_when_converting_then_parses(#[case] raw: &str, #[case] expected: Level) {
        let raw = RawSettings {
            level: raw.to_string(),
            per_leaf: false,
        };
        let settings = ReportSettings::try_from(raw).unwrap();
        assert_eq!(settings.level, expected);
        assert!(!settings.per_leaf);
    }

    #[test]
    fn given_unknown_level_when_converting_then_errors() {
        let raw = RawSettings {
            level: "loud".to_string(),
            per_leaf: true,
        };
        let err = ReportSettings::try_from(raw).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "level"));
        assert_eq!(err.to_string(), "invalid value for level: loud");
    }
}
