use thiserror::Error;

/// Failures while loading [`ReportSettings`](crate::config::ReportSettings).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type SettingsResult<T> = Result<T, SettingsError>;
