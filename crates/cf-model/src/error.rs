//! Error types for the aging-rate model.

use thiserror::Error;

/// Raised where a temperature enters the model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Non-physical temperature: {kelvin} K (must be above absolute zero)")]
    NonPhysicalTemperature { kelvin: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;
