//! Error types.
//!
//! - `DataError` is what the library returns.
//! - `AppError` is what the `uel` binary prints before exiting; it carries the
//!   process exit code alongside a human-readable message.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::PeriodId;

/// Exit code for usage, configuration, and I/O failures.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a dataset that fails to parse or validate at load time.
pub const EXIT_INVALID_DATASET: u8 = 3;
/// Exit code for dataset-consistency violations found while reading it.
pub const EXIT_INCONSISTENT: u8 = 4;

/// Failures raised by the data-access layer and the locale context.
#[derive(Debug, Error)]
pub enum DataError {
    /// A survey pointer in the metadata has no matching survey record.
    #[error("{role} survey data not found for period: {period}")]
    SurveyNotFound { role: &'static str, period: PeriodId },

    /// A month key outside `"01"`..=`"12"`.
    #[error("Invalid month number: {0}")]
    InvalidMonth(String),

    /// A period string that is not `YYYY-MM`.
    #[error("Invalid period format: {0}. Expected YYYY-MM")]
    InvalidPeriod(String),

    /// A well-formed period that is not part of the survey registry.
    #[error("Period {0} is not a registered survey period")]
    UnknownPeriod(PeriodId),

    /// Structural validation failed after parsing.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted locale preference could not be written.
    #[error("Failed to persist locale preference: {0}")]
    Preference(String),
}

impl DataError {
    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            DataError::SurveyNotFound { .. }
            | DataError::InvalidMonth(_)
            | DataError::UnknownPeriod(_) => EXIT_INCONSISTENT,
            DataError::InvalidDataset(_) | DataError::Parse { .. } => EXIT_INVALID_DATASET,
            DataError::InvalidPeriod(_) | DataError::Io { .. } | DataError::Preference(_) => EXIT_USAGE,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_errors_map_to_exit_codes() {
        let period: PeriodId = "2025-12".parse().unwrap();
        let err: AppError = DataError::SurveyNotFound { role: "Current", period }.into();
        assert_eq!(err.exit_code(), EXIT_INCONSISTENT);
        assert_eq!(err.to_string(), "Current survey data not found for period: 2025-12");

        let err: AppError = DataError::InvalidDataset("duplicate id".to_string()).into();
        assert_eq!(err.exit_code(), EXIT_INVALID_DATASET);
    }
}
