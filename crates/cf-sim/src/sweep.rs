//! Multi-temperature sweep: independent fixed-temperature runs, joined at
//! the end.

use rayon::prelude::*;
use tracing::{info, warn};

use cf_core::units::k;
use cf_core::Real;
use cf_model::RateModel;
use cf_profile::DutyCycleProfile;

use crate::error::SimResult;
use crate::simulator::{CycleRun, CycleSimulator, SimOptions};

/// Outcome of one temperature's run within a sweep.
#[derive(Debug)]
pub struct TemperatureRun {
    pub temperature_k: Real,
    pub result: SimResult<CycleRun>,
}

/// Run the same profile and options at each temperature in parallel.
///
/// Every run owns its stress state and trajectory; a failure in one
/// temperature's run never aborts its siblings. Results come back in the
/// order the temperatures were given.
pub fn run_sweep(
    rates: RateModel,
    profile: &DutyCycleProfile,
    options: &SimOptions,
    temperatures_k: &[Real],
) -> Vec<TemperatureRun> {
    temperatures_k
        .par_iter()
        .map(|&t_k| {
            let mut sim = CycleSimulator::new(rates, profile.clone(), options.clone());
            let result = sim.run(k(t_k));
            match &result {
                Ok(run) => info!(
                    temperature_k = t_k,
                    cycles = run.trajectory.len(),
                    final_loss = run.final_loss(),
                    "sweep run finished"
                ),
                Err(e) => warn!(temperature_k = t_k, error = %e, "sweep run failed"),
            }
            TemperatureRun {
                temperature_k: t_k,
                result,
            }
        })
        .collect()
}
