//! Cumulative stress variables: elapsed time and charge throughput.

use cf_core::Real;

use crate::profile::DutyCycleProfile;

/// Terminal stress values carried between duty-cycle repetitions.
///
/// Threaded by value: each simulation run owns its state, and runs at
/// different temperatures never alias.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressState {
    /// Elapsed time since begin of life, hours.
    pub time_h: Real,
    /// Total charge throughput, Ah.
    pub phi_total_ah: Real,
    /// Charging-only throughput, Ah.
    pub phi_ch_ah: Real,
}

/// Per-sample stress sequences for one pass through a profile.
///
/// The value at index `i` is the stress *at* sample `i`, not over the
/// interval; every sequence is monotonically non-decreasing and starts at
/// the seeded offsets (the leading interval has zero length).
#[derive(Debug, Clone, PartialEq)]
pub struct StressSeries {
    pub time_h: Vec<Real>,
    pub phi_total_ah: Vec<Real>,
    pub phi_ch_ah: Vec<Real>,
}

impl StressSeries {
    /// Accumulate stress across one pass of `profile`, seeded at `initial`.
    pub fn accumulate(profile: &DutyCycleProfile, initial: StressState) -> Self {
        let time = profile.time_h();
        let current = profile.current_a();
        let n = profile.len();

        let mut time_h = Vec::with_capacity(n);
        let mut phi_total_ah = Vec::with_capacity(n);
        let mut phi_ch_ah = Vec::with_capacity(n);

        let mut phi_total = initial.phi_total_ah;
        let mut phi_ch = initial.phi_ch_ah;

        for i in 0..n {
            let dt_h = if i == 0 { 0.0 } else { time[i] - time[i - 1] };
            phi_total += (current[i] * dt_h).abs();
            if current[i] > 0.0 {
                phi_ch += current[i] * dt_h;
            }
            time_h.push(initial.time_h + time[i]);
            phi_total_ah.push(phi_total);
            phi_ch_ah.push(phi_ch);
        }

        Self {
            time_h,
            phi_total_ah,
            phi_ch_ah,
        }
    }

    /// Stress values at the final sample, for carry-forward into the next
    /// repetition.
    pub fn terminal(&self) -> StressState {
        let last = self.time_h.len() - 1;
        StressState {
            time_h: self.time_h[last],
            phi_total_ah: self.phi_total_ah[last],
            phi_ch_ah: self.phi_ch_ah[last],
        }
    }
}
