//! Cycle simulator: repeated duty-cycle application with stress
//! carry-forward.

use serde::{Deserialize, Serialize};
use tracing::debug;

use cf_core::units::Temperature;
use cf_core::Real;
use cf_model::{ensure_physical_temperature, RateModel};
use cf_profile::{DutyCycleProfile, StressState};

use crate::error::{SimError, SimResult};
use crate::integrator::{AgingLossIntegrator, CycleLossModel};
use crate::loss::LossContribution;

/// Lifecycle of one simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPhase {
    Initialized,
    Running,
    StoppedByThreshold,
    Completed,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum RunOutcome {
    /// All requested repetitions executed.
    Completed,
    /// Cumulative loss reached the configured threshold at `cycle`;
    /// the trajectory is truncated there. Not an error.
    StoppedByThreshold { cycle: usize },
}

/// Options for a cycle-aging run.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of duty-cycle repetitions to apply.
    pub max_cycles: usize,
    /// Stop once cumulative total loss reaches this fraction (0.2 stops at
    /// 80% retention); `None` runs all repetitions.
    pub stop_loss_threshold: Option<Real>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            max_cycles: 300,
            stop_loss_threshold: None,
        }
    }
}

/// One recorded repetition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Repetition index, 0-based.
    pub cycle: usize,
    /// This repetition's per-mechanism losses.
    pub contribution: LossContribution,
    /// Cumulative total loss fraction after this repetition.
    pub cumulative_loss: Real,
}

impl TrajectoryPoint {
    /// Capacity retention after this repetition, percent.
    pub fn retention_pct(&self) -> Real {
        100.0 * (1.0 - self.cumulative_loss)
    }
}

/// Completed run: capacity trajectory plus terminal stress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRun {
    pub temperature_k: Real,
    pub trajectory: Vec<TrajectoryPoint>,
    pub final_state: StressState,
    pub outcome: RunOutcome,
}

impl CycleRun {
    /// Cumulative loss after the last recorded repetition.
    pub fn final_loss(&self) -> Real {
        self.trajectory.last().map_or(0.0, |p| p.cumulative_loss)
    }

    /// Per-mechanism cumulative losses after the last recorded repetition.
    pub fn final_breakdown(&self) -> LossContribution {
        self.trajectory
            .iter()
            .fold(LossContribution::default(), |acc, p| {
                acc.accumulate(&p.contribution)
            })
    }
}

/// State machine applying a duty cycle repeatedly at fixed temperature.
///
/// Cumulative loss is never clamped; pathological inputs may drive it past
/// 1.0 and the caller interprets the trajectory.
pub struct CycleSimulator<M: CycleLossModel> {
    loss_model: M,
    profile: DutyCycleProfile,
    options: SimOptions,
    phase: SimPhase,
}

impl CycleSimulator<AgingLossIntegrator> {
    /// Simulator over the semi-empirical rate model.
    pub fn new(rates: RateModel, profile: DutyCycleProfile, options: SimOptions) -> Self {
        Self::with_loss_model(AgingLossIntegrator::new(rates), profile, options)
    }
}

impl<M: CycleLossModel> CycleSimulator<M> {
    /// Simulator over a custom per-cycle loss model.
    pub fn with_loss_model(loss_model: M, profile: DutyCycleProfile, options: SimOptions) -> Self {
        Self {
            loss_model,
            profile,
            options,
            phase: SimPhase::Initialized,
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Run from a fresh cell (zero stress).
    pub fn run(&mut self, temperature: Temperature) -> SimResult<CycleRun> {
        self.run_from(temperature, StressState::default())
    }

    /// Run carrying in an existing stress state.
    ///
    /// Each repetition re-applies the profile offset by the previous
    /// terminal elapsed time and threads the stress state forward by
    /// value; after any completed repetition the running total and the
    /// carried state form a consistent checkpoint.
    pub fn run_from(
        &mut self,
        temperature: Temperature,
        initial: StressState,
    ) -> SimResult<CycleRun> {
        ensure_physical_temperature(temperature)?;
        if self.options.max_cycles == 0 {
            return Err(SimError::InvalidArg {
                what: "max_cycles must be positive",
            });
        }

        self.phase = SimPhase::Running;

        let mut state = initial;
        let mut cumulative = 0.0;
        let mut trajectory = Vec::with_capacity(self.options.max_cycles);

        for cycle in 0..self.options.max_cycles {
            let (contribution, next_state) =
                self.loss_model
                    .cycle_loss(&self.profile, temperature, state)?;
            cumulative += contribution.total();
            state = next_state;
            trajectory.push(TrajectoryPoint {
                cycle,
                contribution,
                cumulative_loss: cumulative,
            });

            if let Some(threshold) = self.options.stop_loss_threshold {
                if cumulative >= threshold {
                    debug!(
                        cycle,
                        cumulative_loss = cumulative,
                        threshold,
                        "loss threshold reached"
                    );
                    self.phase = SimPhase::StoppedByThreshold;
                    return Ok(CycleRun {
                        temperature_k: temperature.value,
                        trajectory,
                        final_state: state,
                        outcome: RunOutcome::StoppedByThreshold { cycle },
                    });
                }
            }
        }

        self.phase = SimPhase::Completed;
        Ok(CycleRun {
            temperature_k: temperature.value,
            trajectory,
            final_state: state,
            outcome: RunOutcome::Completed,
        })
    }
}

/// Closed-form calendar-only fade for rest storage:
/// `k_cal(T, SOC) · sqrt(t)`.
pub fn calendar_projection(
    rates: &RateModel,
    temperature: Temperature,
    soc_pct: Real,
    time_h: Real,
) -> SimResult<Real> {
    ensure_physical_temperature(temperature)?;
    if time_h < 0.0 {
        return Err(SimError::InvalidArg {
            what: "projection time must be non-negative",
        });
    }
    Ok(rates.calendar(temperature, soc_pct) * time_h.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::units::{celsius, k};
    use cf_model::AgingParameters;
    use cf_profile::ProfileBuilder;

    fn crdr() -> DutyCycleProfile {
        ProfileBuilder::new(0.1, 20.0)
            .charge(1.0, 3.0, 90.0)
            .rest(0.5)
            .discharge(1.0, 3.0, 20.0)
            .rest(0.5)
            .build()
            .unwrap()
    }

    fn rates() -> RateModel {
        RateModel::new(AgingParameters::default())
    }

    #[test]
    fn phase_progresses_to_completed() {
        let mut sim = CycleSimulator::new(
            rates(),
            crdr(),
            SimOptions {
                max_cycles: 3,
                stop_loss_threshold: None,
            },
        );
        assert_eq!(sim.phase(), SimPhase::Initialized);
        let run = sim.run(celsius(25.0)).unwrap();
        assert_eq!(sim.phase(), SimPhase::Completed);
        assert_eq!(run.outcome, RunOutcome::Completed);
        assert_eq!(run.trajectory.len(), 3);
    }

    #[test]
    fn trajectory_is_cumulative_and_monotonic() {
        let mut sim = CycleSimulator::new(
            rates(),
            crdr(),
            SimOptions {
                max_cycles: 10,
                stop_loss_threshold: None,
            },
        );
        let run = sim.run(celsius(25.0)).unwrap();
        for pair in run.trajectory.windows(2) {
            assert!(pair[1].cumulative_loss > pair[0].cumulative_loss);
            assert_eq!(pair[1].cycle, pair[0].cycle + 1);
        }
        let breakdown = run.final_breakdown();
        assert!((breakdown.total() - run.final_loss()).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_physical_temperature_without_running() {
        let mut sim = CycleSimulator::new(rates(), crdr(), SimOptions::default());
        assert!(sim.run(k(0.0)).is_err());
    }

    #[test]
    fn rejects_zero_max_cycles() {
        let mut sim = CycleSimulator::new(
            rates(),
            crdr(),
            SimOptions {
                max_cycles: 0,
                stop_loss_threshold: None,
            },
        );
        assert!(matches!(
            sim.run(celsius(25.0)),
            Err(SimError::InvalidArg { .. })
        ));
    }

    #[test]
    fn calendar_projection_matches_rate_times_sqrt_time() {
        let r = rates();
        let t = celsius(25.0);
        let loss = calendar_projection(&r, t, 50.0, 400.0).unwrap();
        assert!((loss - r.calendar(t, 50.0) * 20.0).abs() < 1e-15);
        assert!(calendar_projection(&r, t, 50.0, -1.0).is_err());
        assert_eq!(calendar_projection(&r, t, 50.0, 0.0).unwrap(), 0.0);
    }
}
