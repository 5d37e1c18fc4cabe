//! Error types for simulation runs.

use thiserror::Error;

/// Errors encountered while running the aging engine.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<cf_profile::ProfileError> for SimError {
    fn from(e: cf_profile::ProfileError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<cf_model::ModelError> for SimError {
    fn from(e: cf_model::ModelError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl From<cf_core::CoreError> for SimError {
    fn from(e: cf_core::CoreError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
