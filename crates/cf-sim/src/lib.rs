//! cf-sim: cycle-aging integration engine.
//!
//! Applies a duty-cycle profile repeatedly at fixed temperature,
//! integrating the aging-rate model against accumulated time and charge
//! throughput, and reports a capacity-retention trajectory. Runs at
//! different temperatures are independent and execute in parallel.

pub mod error;
pub mod integrator;
pub mod loss;
pub mod simulator;
pub mod sweep;

pub use error::{SimError, SimResult};
pub use integrator::{AgingLossIntegrator, CycleLossModel, SQRT_SINGULARITY_FLOOR};
pub use loss::LossContribution;
pub use simulator::{
    calendar_projection, CycleRun, CycleSimulator, RunOutcome, SimOptions, SimPhase,
    TrajectoryPoint,
};
pub use sweep::{run_sweep, TemperatureRun};
