//! cf-model: semi-empirical aging-rate model.
//!
//! Instantaneous rate coefficients for calendar aging and the three
//! cycling-aging mechanisms, parameterized by one immutable physical
//! parameter set. The coefficients are pure arithmetic; the integration
//! engine in cf-sim decides what they multiply.

pub mod error;
pub mod ocv;
pub mod params;
pub mod rates;

pub use error::{ModelError, ModelResult};
pub use params::AgingParameters;
pub use rates::{ensure_physical_temperature, RateMechanism, RateModel, RateTable, TableAxis};
