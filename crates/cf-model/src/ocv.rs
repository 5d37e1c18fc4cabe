//! Anode open-circuit-potential fit.
//!
//! The calendar SOC term needs the graphite anode half-cell potential at a
//! given SOC: SOC maps linearly onto an intercalation fraction, which feeds
//! a fixed five-term tanh/exp curve fit.

use cf_core::Real;

use crate::params::AgingParameters;

/// Anode intercalation fraction for a given SOC (percent), linear between
/// the fitted 0% and 100% endpoints.
pub fn anode_stoichiometry(params: &AgingParameters, soc_pct: Real) -> Real {
    params.x_a_0 + (soc_pct / 100.0) * (params.x_a_100 - params.x_a_0)
}

/// Graphite anode open-circuit potential (V) at intercalation fraction
/// `x_a`. The coefficients are part of the curve fit, not tunable
/// parameters.
pub fn anode_potential(x_a: Real) -> Real {
    0.6379
        + 0.5416 * (-305.5309 * x_a).exp()
        + 0.044 * (-(x_a - 0.1958) / 0.1088).tanh()
        - 0.1978 * ((x_a - 1.0571) / 0.0854).tanh()
        - 0.6875 * ((x_a + 0.0117) / 0.0529).tanh()
        - 0.0175 * ((x_a - 0.5692) / 0.0875).tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stoichiometry_hits_fitted_endpoints() {
        let p = AgingParameters::default();
        assert!((anode_stoichiometry(&p, 0.0) - p.x_a_0).abs() < 1e-15);
        assert!((anode_stoichiometry(&p, 100.0) - p.x_a_100).abs() < 1e-15);
        assert!((anode_stoichiometry(&p, 50.0) - 0.5 * (p.x_a_0 + p.x_a_100)).abs() < 1e-12);
    }

    #[test]
    fn potential_decreases_with_lithiation() {
        // Graphite OCP falls as the anode fills; spot-check across the
        // usable range rather than asserting a global derivative.
        let p = AgingParameters::default();
        let lo = anode_potential(anode_stoichiometry(&p, 10.0));
        let mid = anode_potential(anode_stoichiometry(&p, 50.0));
        let hi = anode_potential(anode_stoichiometry(&p, 95.0));
        assert!(lo > mid);
        assert!(mid > hi);
    }

    #[test]
    fn potential_is_finite_over_full_soc_range() {
        let p = AgingParameters::default();
        for soc in 0..=100 {
            let u = anode_potential(anode_stoichiometry(&p, soc as Real));
            assert!(u.is_finite(), "non-finite potential at SOC={soc}");
        }
    }
}
