//! Phase-based profile builder.
//!
//! Glues constant-current charge/rest/discharge phases into a single
//! continuous, strictly-time-increasing duty cycle, the shape a
//! charge/rest/discharge/rest test log would have.

use cf_core::Real;

use crate::error::{ProfileError, ProfileResult};
use crate::profile::DutyCycleProfile;

/// One constant-current phase of a duty cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Phase duration, hours.
    pub duration_h: Real,
    /// Signed current held over the phase, A (positive = charging).
    pub current_a: Real,
    /// SOC at the end of the phase, percent; ramped linearly from the end
    /// of the previous phase.
    pub soc_end_pct: Real,
}

/// Builder assembling phases into one validated profile.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    dt_h: Real,
    soc_start_pct: Real,
    phases: Vec<Phase>,
}

impl ProfileBuilder {
    /// Start a builder sampling every `dt_h` hours from `soc_start_pct`.
    pub fn new(dt_h: Real, soc_start_pct: Real) -> Self {
        Self {
            dt_h,
            soc_start_pct,
            phases: Vec::new(),
        }
    }

    /// Append a charging phase; the current magnitude is applied positive.
    pub fn charge(mut self, duration_h: Real, current_a: Real, soc_end_pct: Real) -> Self {
        self.phases.push(Phase {
            duration_h,
            current_a: current_a.abs(),
            soc_end_pct,
        });
        self
    }

    /// Append a discharging phase; the current magnitude is applied negative.
    pub fn discharge(mut self, duration_h: Real, current_a: Real, soc_end_pct: Real) -> Self {
        self.phases.push(Phase {
            duration_h,
            current_a: -current_a.abs(),
            soc_end_pct,
        });
        self
    }

    /// Append a rest phase: zero current, SOC held at the previous phase's
    /// endpoint.
    pub fn rest(mut self, duration_h: Real) -> Self {
        let soc_end_pct = self
            .phases
            .last()
            .map_or(self.soc_start_pct, |p| p.soc_end_pct);
        self.phases.push(Phase {
            duration_h,
            current_a: 0.0,
            soc_end_pct,
        });
        self
    }

    /// Append an arbitrary phase.
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    /// Glue the phases into one strictly-time-increasing profile.
    ///
    /// Each phase is sampled at roughly the builder's step (the last step
    /// of a phase is shortened so phase boundaries land exactly); SOC ramps
    /// linearly within each phase.
    pub fn build(self) -> ProfileResult<DutyCycleProfile> {
        if !(self.dt_h.is_finite() && self.dt_h > 0.0) {
            return Err(ProfileError::InvalidArg {
                what: "sampling step must be positive and finite",
            });
        }
        if self.phases.is_empty() {
            return Err(ProfileError::InvalidArg {
                what: "at least one phase is required",
            });
        }
        for phase in &self.phases {
            if !(phase.duration_h.is_finite() && phase.duration_h > 0.0) {
                return Err(ProfileError::InvalidArg {
                    what: "phase duration must be positive and finite",
                });
            }
        }

        let mut time_h = vec![0.0];
        let mut current_a = vec![self.phases[0].current_a];
        let mut soc_pct = vec![self.soc_start_pct];

        let mut t = 0.0;
        let mut soc_from = self.soc_start_pct;
        for phase in &self.phases {
            let steps = (phase.duration_h / self.dt_h).ceil().max(1.0) as usize;
            let dt = phase.duration_h / steps as Real;
            for i in 1..=steps {
                let frac = i as Real / steps as Real;
                t += dt;
                time_h.push(t);
                current_a.push(phase.current_a);
                soc_pct.push(soc_from + frac * (phase.soc_end_pct - soc_from));
            }
            soc_from = phase.soc_end_pct;
        }

        DutyCycleProfile::from_hours(time_h, current_a, soc_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Charge / rest / discharge / rest, the shape used throughout the
    /// integration tests.
    fn crdr() -> ProfileResult<DutyCycleProfile> {
        ProfileBuilder::new(0.1, 20.0)
            .charge(1.0, 3.0, 90.0)
            .rest(0.5)
            .discharge(1.0, 3.0, 20.0)
            .rest(0.5)
            .build()
    }

    #[test]
    fn crdr_glues_into_one_monotonic_profile() {
        let p = crdr().unwrap();
        assert!((p.duration_h() - 3.0).abs() < 1e-12);
        for i in 1..p.len() {
            assert!(p.time_h()[i] > p.time_h()[i - 1]);
        }
        // Ends back at the starting SOC after a full cycle
        assert!((p.soc_pct()[p.len() - 1] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn currents_carry_phase_signs() {
        let p = crdr().unwrap();
        let currents = p.current_a();
        assert!(currents.iter().any(|&c| c > 0.0));
        assert!(currents.iter().any(|&c| c < 0.0));
        assert!(currents.iter().any(|&c| c == 0.0));
    }

    #[test]
    fn soc_ramps_linearly_within_a_phase() {
        let p = ProfileBuilder::new(0.25, 0.0)
            .charge(1.0, 3.0, 100.0)
            .build()
            .unwrap();
        assert_eq!(p.soc_pct(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn rejects_non_positive_step_and_empty_phase_list() {
        assert!(ProfileBuilder::new(0.0, 50.0).rest(1.0).build().is_err());
        assert!(ProfileBuilder::new(0.1, 50.0).build().is_err());
        assert!(ProfileBuilder::new(0.1, 50.0).rest(0.0).build().is_err());
    }
}
