// cf-core/src/units.rs

use uom::si::f64::{
    ElectricCharge as UomElectricCharge, ElectricCurrent as UomElectricCurrent, Ratio as UomRatio,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Charge = UomElectricCharge;
pub type Current = UomElectricCurrent;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn amps(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn amp_hours(v: f64) -> Charge {
    use uom::si::electric_charge::ampere_hour;
    Charge::new::<ampere_hour>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    /// Universal gas constant, J/(mol·K).
    pub const R_GAS_J_PER_MOL_K: f64 = 8.314;

    /// Faraday constant, C/mol.
    pub const FARADAY_C_PER_MOL: f64 = 96_485.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(298.15);
        let _i = amps(3.0);
        let _q = amp_hours(3.0);
        let _dt = hours(1.0);
        let _ds = s(0.1);
        let _r = unitless(0.5);
    }

    #[test]
    fn celsius_converts_to_kelvin() {
        assert!((celsius(25.0).value - 298.15).abs() < 1e-9);
        assert!((celsius(0.0).value - 273.15).abs() < 1e-9);
    }

    #[test]
    fn time_value_is_seconds() {
        assert!((hours(1.0).value - 3600.0).abs() < 1e-9);
    }
}
