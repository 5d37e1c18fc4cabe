//! Aging-rate coefficients.
//!
//! Four mechanisms: calendar aging (vs. elapsed time), high-temperature
//! cycling (vs. total throughput), low-temperature cycling (vs. charging
//! throughput), and low-temperature high-SOC cycling (vs. charging
//! throughput, no square-root dependence).

use cf_core::constants::{FARADAY_C_PER_MOL, R_GAS_J_PER_MOL_K};
use cf_core::units::{amps, k, Current, Temperature};
use cf_core::Real;

use crate::error::{ModelError, ModelResult};
use crate::ocv::{anode_potential, anode_stoichiometry};
use crate::params::AgingParameters;

/// The four aging mechanisms tracked by the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateMechanism {
    Calendar,
    CycHighTemp,
    CycLowTemp,
    CycLowTempHighSoc,
}

/// Reject temperatures at or below absolute zero before a run begins.
///
/// The rate functions themselves are pure arithmetic; this is the single
/// gate where a temperature enters the engine.
pub fn ensure_physical_temperature(temperature: Temperature) -> ModelResult<()> {
    if temperature.value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::NonPhysicalTemperature {
            kelvin: temperature.value,
        })
    }
}

/// Rate-coefficient evaluator bound to one parameter set.
#[derive(Debug, Clone, Copy)]
pub struct RateModel {
    params: AgingParameters,
}

impl RateModel {
    pub fn new(params: AgingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AgingParameters {
        &self.params
    }

    /// Calendar-aging rate coefficient, h^-0.5.
    ///
    /// Arrhenius temperature term times the anode-potential SOC term
    /// `exp(α·F·(U_ref − U_a(SOC))/(R·T_ref)) + k0`.
    pub fn calendar(&self, temperature: Temperature, soc_pct: Real) -> Real {
        let p = &self.params;
        let t_k = temperature.value;
        let arrhenius =
            (-p.ea_cal_j_per_mol / R_GAS_J_PER_MOL_K * (1.0 / t_k - 1.0 / p.t_ref_k)).exp();
        let ua = anode_potential(anode_stoichiometry(p, soc_pct));
        let soc_term = (p.alpha * FARADAY_C_PER_MOL * (p.ua_ref_v - ua)
            / (R_GAS_J_PER_MOL_K * p.t_ref_k))
            .exp();
        p.k_cal_ref * arrhenius * (soc_term + p.k0)
    }

    /// High-temperature cycling rate coefficient, Ah^-0.5.
    pub fn cyc_high_temp(&self, temperature: Temperature) -> Real {
        let p = &self.params;
        let t_k = temperature.value;
        p.k_cyc_high_t_ref
            * (-p.ea_cyc_high_t_j_per_mol / R_GAS_J_PER_MOL_K * (1.0 / t_k - 1.0 / p.t_ref_k))
                .exp()
    }

    /// Low-temperature cycling rate coefficient, Ah^-0.5.
    ///
    /// The Arrhenius exponent carries the opposite sign to the other
    /// mechanisms: this rate grows as temperature drops. The current term
    /// penalizes charging above the reference current.
    pub fn cyc_low_temp(&self, temperature: Temperature, current: Current) -> Real {
        let p = &self.params;
        let t_k = temperature.value;
        let arrhenius =
            (p.ea_cyc_low_t_j_per_mol / R_GAS_J_PER_MOL_K * (1.0 / t_k - 1.0 / p.t_ref_k)).exp();
        let current_term = (p.beta_low_t * (current.value - p.i_ch_ref_a) / p.capacity_ah).exp();
        p.k_cyc_low_t_ref * arrhenius * current_term
    }

    /// Low-temperature high-SOC cycling rate coefficient, Ah^-1.
    ///
    /// Engages only at SOC at or above `soc_ref_pct`; the gate is a strict
    /// step with no smoothing at the boundary.
    pub fn cyc_low_temp_high_soc(
        &self,
        temperature: Temperature,
        current: Current,
        soc_pct: Real,
    ) -> Real {
        let p = &self.params;
        if soc_pct < p.soc_ref_pct {
            return 0.0;
        }
        let t_k = temperature.value;
        let arrhenius = (p.ea_cyc_low_t_high_soc_j_per_mol / R_GAS_J_PER_MOL_K
            * (1.0 / t_k - 1.0 / p.t_ref_k))
            .exp();
        let current_term =
            (p.beta_low_t_high_soc * (current.value - p.i_ch_ref_a) / p.capacity_ah).exp();
        p.k_cyc_low_t_high_soc_ref * arrhenius * current_term
    }

    /// Tabulate `mechanism` over a temperature × axis grid for reporting.
    ///
    /// `fixed_soc_pct` fills in when the axis varies current, and
    /// `fixed_current_a` when the axis varies SOC; the mechanism ignores
    /// whichever inputs it does not depend on.
    pub fn tabulate(
        &self,
        mechanism: RateMechanism,
        temperatures_k: &[Real],
        axis: TableAxis,
        axis_values: &[Real],
        fixed_soc_pct: Real,
        fixed_current_a: Real,
    ) -> ModelResult<RateTable> {
        for &t_k in temperatures_k {
            ensure_physical_temperature(k(t_k))?;
        }

        let mut values = Vec::with_capacity(temperatures_k.len() * axis_values.len());
        for &t_k in temperatures_k {
            let t = k(t_k);
            for &a in axis_values {
                let (soc_pct, current_a) = match axis {
                    TableAxis::SocPercent => (a, fixed_current_a),
                    TableAxis::CurrentAmps => (fixed_soc_pct, a),
                };
                let value = match mechanism {
                    RateMechanism::Calendar => self.calendar(t, soc_pct),
                    RateMechanism::CycHighTemp => self.cyc_high_temp(t),
                    RateMechanism::CycLowTemp => self.cyc_low_temp(t, amps(current_a)),
                    RateMechanism::CycLowTempHighSoc => {
                        self.cyc_low_temp_high_soc(t, amps(current_a), soc_pct)
                    }
                };
                values.push(value);
            }
        }

        Ok(RateTable {
            temperatures_k: temperatures_k.to_vec(),
            axis_values: axis_values.to_vec(),
            values,
        })
    }
}

/// Which input the second grid axis varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableAxis {
    SocPercent,
    CurrentAmps,
}

/// Row-major tabulation of one rate coefficient over temperature × axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub temperatures_k: Vec<Real>,
    pub axis_values: Vec<Real>,
    /// `values[t_index * axis_values.len() + a_index]`
    pub values: Vec<Real>,
}

impl RateTable {
    pub fn get(&self, t_index: usize, a_index: usize) -> Real {
        self.values[t_index * self.axis_values.len() + a_index]
    }
}
