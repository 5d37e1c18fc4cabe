//! Scenario file schema and validation.
//!
//! A scenario describes one sweep as data: temperatures, repetition
//! count, duty-cycle phases, and optional model parameter overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cf_model::AgingParameters;
use cf_profile::{DutyCycleProfile, ProfileBuilder};
use cf_sim::SimOptions;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Fixed cell temperatures to sweep, °C.
    pub temperatures_c: Vec<f64>,
    /// Number of duty-cycle repetitions per temperature.
    pub max_cycles: usize,
    /// Optional stop threshold on cumulative loss fraction (0.2 stops at
    /// 80% retention).
    #[serde(default)]
    pub stop_loss_threshold: Option<f64>,
    /// Sampling step for the synthesized profile, hours.
    pub sample_step_h: f64,
    /// SOC at the start of the duty cycle, percent.
    pub soc_start_pct: f64,
    /// Duty-cycle phases, applied in order.
    pub phases: Vec<PhaseSpec>,
    /// Model parameters; omitted fields keep the published defaults.
    #[serde(default)]
    pub parameters: AgingParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseSpec {
    Charge {
        duration_h: f64,
        current_a: f64,
        soc_end_pct: f64,
    },
    Discharge {
        duration_h: f64,
        current_a: f64,
        soc_end_pct: f64,
    },
    Rest {
        duration_h: f64,
    },
}

impl Scenario {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path)?;
        let scenario: Scenario = serde_yaml::from_str(&text)?;
        Ok(scenario)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.temperatures_c.is_empty() {
            return Err(CliError::InvalidScenario {
                what: "at least one temperature is required",
            });
        }
        if self.max_cycles == 0 {
            return Err(CliError::InvalidScenario {
                what: "max_cycles must be positive",
            });
        }
        if self.phases.is_empty() {
            return Err(CliError::InvalidScenario {
                what: "at least one phase is required",
            });
        }
        if !(self.sample_step_h.is_finite() && self.sample_step_h > 0.0) {
            return Err(CliError::InvalidScenario {
                what: "sample_step_h must be positive and finite",
            });
        }
        if let Some(threshold) = self.stop_loss_threshold {
            if !(threshold.is_finite() && threshold > 0.0) {
                return Err(CliError::InvalidScenario {
                    what: "stop_loss_threshold must be positive and finite",
                });
            }
        }
        Ok(())
    }

    /// Glue the scenario's phases into one duty-cycle profile.
    pub fn build_profile(&self) -> CliResult<DutyCycleProfile> {
        let mut builder = ProfileBuilder::new(self.sample_step_h, self.soc_start_pct);
        for phase in &self.phases {
            builder = match *phase {
                PhaseSpec::Charge {
                    duration_h,
                    current_a,
                    soc_end_pct,
                } => builder.charge(duration_h, current_a, soc_end_pct),
                PhaseSpec::Discharge {
                    duration_h,
                    current_a,
                    soc_end_pct,
                } => builder.discharge(duration_h, current_a, soc_end_pct),
                PhaseSpec::Rest { duration_h } => builder.rest(duration_h),
            };
        }
        Ok(builder.build()?)
    }

    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            max_cycles: self.max_cycles,
            stop_loss_threshold: self.stop_loss_threshold,
        }
    }

    /// Sweep temperatures converted to kelvin.
    pub fn temperatures_k(&self) -> Vec<f64> {
        self.temperatures_c
            .iter()
            .map(|&c| cf_core::units::celsius(c).value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRDR_YAML: &str = r#"
temperatures_c: [0.0, 25.0]
max_cycles: 300
stop_loss_threshold: 0.2
sample_step_h: 0.1
soc_start_pct: 20.0
phases:
  - kind: charge
    duration_h: 1.0
    current_a: 3.0
    soc_end_pct: 90.0
  - kind: rest
    duration_h: 0.5
  - kind: discharge
    duration_h: 1.0
    current_a: 3.0
    soc_end_pct: 20.0
  - kind: rest
    duration_h: 0.5
"#;

    #[test]
    fn crdr_scenario_parses_and_builds() {
        let scenario: Scenario = serde_yaml::from_str(CRDR_YAML).unwrap();
        scenario.validate().unwrap();

        let profile = scenario.build_profile().unwrap();
        assert!((profile.duration_h() - 3.0).abs() < 1e-9);

        let temps = scenario.temperatures_k();
        assert!((temps[0] - 273.15).abs() < 1e-9);
        assert!((temps[1] - 298.15).abs() < 1e-9);

        // Defaults survive when no overrides are given
        assert_eq!(scenario.parameters, AgingParameters::default());
    }

    #[test]
    fn partial_parameter_overrides_keep_remaining_defaults() {
        let yaml = r#"
temperatures_c: [25.0]
max_cycles: 10
sample_step_h: 0.5
soc_start_pct: 50.0
phases:
  - kind: rest
    duration_h: 1.0
parameters:
  capacity_ah: 4.8
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.parameters.capacity_ah, 4.8);
        assert_eq!(
            scenario.parameters.k_cal_ref,
            AgingParameters::default().k_cal_ref
        );
        assert!(scenario.stop_loss_threshold.is_none());
    }

    #[test]
    fn validation_rejects_degenerate_scenarios() {
        let mut scenario: Scenario = serde_yaml::from_str(CRDR_YAML).unwrap();
        scenario.temperatures_c.clear();
        assert!(scenario.validate().is_err());

        let mut scenario: Scenario = serde_yaml::from_str(CRDR_YAML).unwrap();
        scenario.max_cycles = 0;
        assert!(scenario.validate().is_err());

        let mut scenario: Scenario = serde_yaml::from_str(CRDR_YAML).unwrap();
        scenario.stop_loss_threshold = Some(-0.1);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = format!("{CRDR_YAML}\nnot_a_field: 1\n");
        assert!(serde_yaml::from_str::<Scenario>(&yaml).is_err());
    }
}
