//! cf-profile: duty-cycle profiles and stress accumulation.
//!
//! A duty cycle is an ordered series of (time, current, SOC) samples; the
//! stress accumulator turns one pass through a profile into running
//! elapsed-time and charge-throughput sequences that the integration
//! engine integrates against.

pub mod builder;
pub mod error;
pub mod profile;
pub mod stress;

pub use builder::{Phase, ProfileBuilder};
pub use error::{ProfileError, ProfileResult};
pub use profile::DutyCycleProfile;
pub use stress::{StressSeries, StressState};
