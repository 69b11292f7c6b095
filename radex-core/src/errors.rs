use crate::timeseries::Time;
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum RadexError {
    #[error("{0}")]
    Error(String),
    #[error("Invalid time grid: {0}")]
    InvalidTimeGrid(String),
    #[error("Could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Reference integration failed between t={t_start} and t={t_end}: {reason}")]
    Integration {
        t_start: Time,
        t_end: Time,
        reason: String,
    },
}

/// Convenience type for `Result<T, RadexError>`.
pub type RadexResult<T> = Result<T, RadexError>;
