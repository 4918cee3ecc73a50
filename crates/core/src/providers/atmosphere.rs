//! Atmospheric composition
//!
//! The water-productivity adjustment responds to ambient CO2
//! concentration relative to a fixed reference.

use chrono::NaiveDate;

/// Reference atmospheric CO2 concentration, ppm (AquaCrop convention:
/// Mauna Loa annual mean for the year 2000)
pub const REFERENCE_CO2: f64 = 369.41;

/// Source of ambient CO2 concentration
pub trait CarbonDioxide {
    /// Concentration on a given date, ppm
    fn concentration(&self, date: NaiveDate) -> f64;
}

/// Constant CO2 concentration
#[derive(Debug, Clone, Copy)]
pub struct FixedCo2(pub f64);

impl CarbonDioxide for FixedCo2 {
    fn concentration(&self, _date: NaiveDate) -> f64 {
        self.0
    }
}
