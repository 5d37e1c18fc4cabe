//! CLI error boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid scenario: {what}")]
    InvalidScenario { what: &'static str },

    #[error(transparent)]
    Profile(#[from] cf_profile::ProfileError),

    #[error(transparent)]
    Model(#[from] cf_model::ModelError),

    #[error(transparent)]
    Sim(#[from] cf_sim::SimError),
}

pub type CliResult<T> = Result<T, CliError>;
