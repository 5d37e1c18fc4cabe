//! Duty-cycle profile: validated (time, current, SOC) sample series.

use cf_core::Real;

use crate::error::{ProfileError, ProfileResult};

const SECONDS_PER_HOUR: Real = 3600.0;

/// One pass of a driving/duty cycle.
///
/// Time is stored in hours from the start of the pass so that throughput
/// integrates directly to ampere-hours. Current is signed (positive =
/// charging, A); SOC is percent of nominal capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DutyCycleProfile {
    time_h: Vec<Real>,
    current_a: Vec<Real>,
    soc_pct: Vec<Real>,
}

impl DutyCycleProfile {
    /// Build a profile from parallel series with time in elapsed seconds,
    /// the form producers of test logs hand over.
    pub fn from_seconds(
        time_s: Vec<Real>,
        current_a: Vec<Real>,
        soc_pct: Vec<Real>,
    ) -> ProfileResult<Self> {
        let time_h = time_s.into_iter().map(|t| t / SECONDS_PER_HOUR).collect();
        Self::from_hours(time_h, current_a, soc_pct)
    }

    /// Build a profile from parallel series with time already in hours.
    pub fn from_hours(
        time_h: Vec<Real>,
        current_a: Vec<Real>,
        soc_pct: Vec<Real>,
    ) -> ProfileResult<Self> {
        let profile = Self {
            time_h,
            current_a,
            soc_pct,
        };
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> ProfileResult<()> {
        let time_len = self.time_h.len();
        let current_len = self.current_a.len();
        let soc_len = self.soc_pct.len();
        if time_len != current_len || time_len != soc_len {
            return Err(ProfileError::LengthMismatch {
                time_len,
                current_len,
                soc_len,
            });
        }
        if time_len < 2 {
            return Err(ProfileError::TooFewSamples { len: time_len });
        }

        for i in 0..time_len {
            if !self.time_h[i].is_finite() {
                return Err(ProfileError::NonFinite {
                    what: "time",
                    index: i,
                });
            }
            if !self.current_a[i].is_finite() {
                return Err(ProfileError::NonFinite {
                    what: "current",
                    index: i,
                });
            }
            if !self.soc_pct[i].is_finite() {
                return Err(ProfileError::NonFinite {
                    what: "SOC",
                    index: i,
                });
            }
            if !(0.0..=100.0).contains(&self.soc_pct[i]) {
                return Err(ProfileError::SocOutOfRange {
                    index: i,
                    soc_pct: self.soc_pct[i],
                });
            }
        }

        if self.time_h[0] < 0.0 {
            return Err(ProfileError::InvalidArg {
                what: "profile time must start at or after 0",
            });
        }
        // A zero-length interval is permitted only before the first sample;
        // thereafter time must strictly increase.
        for i in 1..time_len {
            if self.time_h[i] <= self.time_h[i - 1] {
                return Err(ProfileError::NonMonotonicTime { index: i });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.time_h.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_h.is_empty()
    }

    /// Sample times, hours from the start of the pass.
    pub fn time_h(&self) -> &[Real] {
        &self.time_h
    }

    /// Signed sample currents, A (positive = charging).
    pub fn current_a(&self) -> &[Real] {
        &self.current_a
    }

    /// Sample SOC, percent.
    pub fn soc_pct(&self) -> &[Real] {
        &self.soc_pct
    }

    /// Duration of one pass, hours.
    pub fn duration_h(&self) -> Real {
        self.time_h[self.time_h.len() - 1] - self.time_h[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_seconds_converts_to_hours() {
        let p = DutyCycleProfile::from_seconds(
            vec![0.0, 1800.0, 3600.0],
            vec![0.0, 1.0, 0.0],
            vec![50.0, 55.0, 55.0],
        )
        .unwrap();
        assert_eq!(p.time_h(), &[0.0, 0.5, 1.0]);
        assert!((p.duration_h() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_too_few_samples() {
        let err =
            DutyCycleProfile::from_hours(vec![0.0], vec![0.0], vec![50.0]).unwrap_err();
        assert!(matches!(err, ProfileError::TooFewSamples { len: 1 }));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = DutyCycleProfile::from_hours(
            vec![0.0, 1.0],
            vec![0.0, 1.0, 2.0],
            vec![50.0, 50.0],
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::LengthMismatch { .. }));
    }

    #[test]
    fn rejects_non_monotonic_time() {
        let err = DutyCycleProfile::from_hours(
            vec![0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![50.0, 55.0, 55.0],
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::NonMonotonicTime { index: 2 }));
    }

    #[test]
    fn rejects_out_of_range_soc() {
        let err = DutyCycleProfile::from_hours(
            vec![0.0, 1.0],
            vec![0.0, 0.0],
            vec![50.0, 105.0],
        )
        .unwrap_err();
        assert!(matches!(err, ProfileError::SocOutOfRange { index: 1, .. }));
    }

    #[test]
    fn rejects_non_finite_current() {
        let err = DutyCycleProfile::from_hours(
            vec![0.0, 1.0],
            vec![0.0, f64::NAN],
            vec![50.0, 50.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::NonFinite {
                what: "current",
                index: 1
            }
        ));
    }
}
