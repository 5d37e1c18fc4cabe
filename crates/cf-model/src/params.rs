//! Physical parameter set for the aging model.

use cf_core::Real;

/// Immutable physical constants of the semi-empirical aging model.
///
/// `Default` carries the published parameter set for the reference cell.
/// Loaded once, never mutated, shared read-only by all computations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AgingParameters {
    /// Calendar-aging reference rate constant, h^-0.5.
    pub k_cal_ref: Real,
    /// High-temperature cycling reference rate constant, Ah^-0.5.
    pub k_cyc_high_t_ref: Real,
    /// Low-temperature cycling reference rate constant, Ah^-0.5.
    pub k_cyc_low_t_ref: Real,
    /// Low-temperature high-SOC cycling reference rate constant, Ah^-1.
    pub k_cyc_low_t_high_soc_ref: Real,
    /// Calendar-aging activation energy, J/mol.
    pub ea_cal_j_per_mol: Real,
    /// High-temperature cycling activation energy, J/mol.
    pub ea_cyc_high_t_j_per_mol: Real,
    /// Low-temperature cycling activation energy, J/mol.
    pub ea_cyc_low_t_j_per_mol: Real,
    /// Low-temperature high-SOC cycling activation energy, J/mol.
    pub ea_cyc_low_t_high_soc_j_per_mol: Real,
    /// Charge-transfer symmetry factor in the calendar SOC term.
    pub alpha: Real,
    /// Current-offset exponent for low-temperature cycling, h.
    pub beta_low_t: Real,
    /// Current-offset exponent for low-temperature high-SOC cycling, h.
    pub beta_low_t_high_soc: Real,
    /// SOC at and above which the high-SOC mechanism engages, percent.
    pub soc_ref_pct: Real,
    /// Reference temperature, K.
    pub t_ref_k: Real,
    /// Reference charging current, A.
    pub i_ch_ref_a: Real,
    /// Reference anode potential, V.
    pub ua_ref_v: Real,
    /// Additive offset in the calendar SOC term.
    pub k0: Real,
    /// Nominal cell capacity, Ah.
    pub capacity_ah: Real,
    /// Anode intercalation fraction at 0% SOC.
    pub x_a_0: Real,
    /// Anode intercalation fraction at 100% SOC.
    pub x_a_100: Real,
}

impl Default for AgingParameters {
    fn default() -> Self {
        Self {
            k_cal_ref: 3.69e-4,
            k_cyc_high_t_ref: 1.46e-4,
            k_cyc_low_t_ref: 4.01e-4,
            k_cyc_low_t_high_soc_ref: 2.03e-6,
            ea_cal_j_per_mol: 2.06e4,
            ea_cyc_high_t_j_per_mol: 3.27e4,
            ea_cyc_low_t_j_per_mol: 5.55e4,
            ea_cyc_low_t_high_soc_j_per_mol: 2.33e5,
            alpha: 0.384,
            beta_low_t: 2.64,
            beta_low_t_high_soc: 7.84,
            soc_ref_pct: 82.0,
            t_ref_k: 298.15,
            i_ch_ref_a: 3.0,
            ua_ref_v: 0.123,
            k0: 0.142,
            capacity_ah: 3.0,
            x_a_0: 8.5e-3,
            x_a_100: 7.8e-1,
        }
    }
}
