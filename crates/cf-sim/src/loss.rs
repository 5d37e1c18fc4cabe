//! Per-repetition loss contributions.

use serde::{Deserialize, Serialize};

use cf_core::Real;

/// Capacity loss from one duty-cycle repetition, split by mechanism.
///
/// All components are fractional losses relative to nominal capacity,
/// immutable once produced; callers sum across repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LossContribution {
    /// Calendar aging over the repetition's elapsed time.
    pub calendar: Real,
    /// High-temperature cycling aging over total throughput.
    pub cyc_high_temp: Real,
    /// Low-temperature cycling aging over charging throughput.
    pub cyc_low_temp: Real,
    /// Low-temperature high-SOC cycling aging over charging throughput.
    pub cyc_low_temp_high_soc: Real,
}

impl LossContribution {
    /// Combined loss across all four mechanisms.
    pub fn total(&self) -> Real {
        self.calendar + self.cyc_high_temp + self.cyc_low_temp + self.cyc_low_temp_high_soc
    }

    /// Component-wise sum.
    pub fn accumulate(&self, other: &LossContribution) -> LossContribution {
        LossContribution {
            calendar: self.calendar + other.calendar,
            cyc_high_temp: self.cyc_high_temp + other.cyc_high_temp,
            cyc_low_temp: self.cyc_low_temp + other.cyc_low_temp,
            cyc_low_temp_high_soc: self.cyc_low_temp_high_soc + other.cyc_low_temp_high_soc,
        }
    }
}
