use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Trapezoidal rule over sampled `y(x)`.
///
/// `y` and `x` must have equal length; fewer than two samples integrate
/// to zero. The abscissa need not be uniform.
pub fn trapezoid(y: &[Real], x: &[Real]) -> Real {
    debug_assert_eq!(y.len(), x.len());
    let mut acc = 0.0;
    for i in 1..x.len() {
        acc += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn trapezoid_linear_is_exact() {
        // y = 2x over [0, 4]: integral = 16, exact for piecewise-linear y
        let x = [0.0, 1.0, 2.5, 4.0];
        let y: Vec<Real> = x.iter().map(|v| 2.0 * v).collect();
        assert!((trapezoid(&y, &x) - 16.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_degenerate_inputs() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[3.0], &[1.0]), 0.0);
    }

    proptest! {
        #[test]
        fn trapezoid_constant_matches_width(c in -10.0f64..10.0, steps in 2usize..50) {
            let x: Vec<Real> = (0..steps).map(|i| i as Real * 0.37).collect();
            let y = vec![c; steps];
            let expected = c * (x[steps - 1] - x[0]);
            prop_assert!((trapezoid(&y, &x) - expected).abs() < 1e-9);
        }
    }
}
