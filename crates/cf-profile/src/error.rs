//! Error types for profile construction and validation.

use thiserror::Error;

/// Rejections raised before any integration begins.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile has {len} samples; at least 2 are required")]
    TooFewSamples { len: usize },

    #[error("Profile time must be strictly increasing after the first sample (violated at index {index})")]
    NonMonotonicTime { index: usize },

    #[error(
        "Profile series lengths differ: time={time_len}, current={current_len}, soc={soc_len}"
    )]
    LengthMismatch {
        time_len: usize,
        current_len: usize,
        soc_len: usize,
    },

    #[error("Non-finite {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("SOC out of range at index {index}: {soc_pct} (expected 0..=100)")]
    SocOutOfRange { index: usize, soc_pct: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ProfileResult<T> = Result<T, ProfileError>;
