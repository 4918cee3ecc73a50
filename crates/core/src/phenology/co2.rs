//! Water productivity adjustment for elevated CO2
//!
//! A piecewise adjustment of crop water productivity as ambient CO2
//! rises above the reference concentration, weighted between
//! steady-state and FACE response coefficients by the crop's sink
//! strength, and damped for high-productivity (C4) crops. The factor is
//! frozen per season on the first day of the growing season.

use crate::core_types::CropTraits;
use crate::providers::REFERENCE_CO2;
use crate::simulation::state::SeasonState;

/// CO2 weighting factor between steady-state and FACE responses
fn co2_weighting(conc: f64) -> f64 {
    if conc <= REFERENCE_CO2 {
        0.0
    } else if conc >= 550.0 {
        1.0
    } else {
        1.0 - (550.0 - conc) / (550.0 - REFERENCE_CO2)
    }
}

/// Water productivity adjustment factor for one cell
///
/// Equals 1.0 exactly at the reference concentration and is
/// non-decreasing in concentration above it for a fixed crop class.
#[must_use]
pub fn adjustment_factor(conc: f64, wp: f64, bsted: f64, bface: f64, fsink: f64) -> f64 {
    let fw = co2_weighting(conc);
    let response = (1.0 - fw) * bsted + fw * (bsted * fsink + bface * (1.0 - fsink));
    let fco2 = (conc / REFERENCE_CO2) / (1.0 + (conc - REFERENCE_CO2) * response);

    // High water productivity (C4) crops are less responsive to CO2
    let ftype = ((40.0 - wp) / (40.0 - 20.0)).clamp(0.0, 1.0);
    1.0 + ftype * (fco2 - 1.0)
}

/// Refresh per-cell fCO2 and the frozen concentration snapshot
///
/// Only cells whose growing season started this step take the new value;
/// everywhere else the previous season's factor persists.
pub fn update_water_productivity(state: &mut SeasonState, traits: &CropTraits, conc: f64) {
    let shape = state.fco2.shape();
    for index in 0..shape.len() {
        if !state.season_day_one.get(index) {
            continue;
        }
        let factor = adjustment_factor(
            conc,
            traits.wp.get(index),
            traits.bsted.get(index),
            traits.bface.get(index),
            traits.fsink.get(index),
        );
        state.fco2.set(index, factor);
        state.current_conc.set(index, conc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // C3 crop with low water productivity responds fully
    const WP: f64 = 17.0;
    const BSTED: f64 = 0.000138;
    const BFACE: f64 = 0.001165;
    const FSINK: f64 = 0.5;

    #[test]
    fn test_unity_at_reference_concentration() {
        let f = adjustment_factor(REFERENCE_CO2, WP, BSTED, BFACE, FSINK);
        assert_relative_eq!(f, 1.0);
    }

    #[test]
    fn test_monotone_above_reference() {
        let mut prev = adjustment_factor(REFERENCE_CO2, WP, BSTED, BFACE, FSINK);
        for conc in [400.0, 450.0, 500.0, 550.0, 650.0, 800.0] {
            let f = adjustment_factor(conc, WP, BSTED, BFACE, FSINK);
            assert!(
                f >= prev,
                "fCO2 decreased from {} to {} at {} ppm",
                prev,
                f,
                conc
            );
            prev = f;
        }
    }

    #[test]
    fn test_c4_crops_respond_less() {
        let c3 = adjustment_factor(550.0, 17.0, BSTED, BFACE, FSINK);
        let c4 = adjustment_factor(550.0, 33.7, BSTED, BFACE, FSINK);
        assert!(c3 > c4);
        assert!(c4 > 1.0);
    }

    #[test]
    fn test_very_high_productivity_clamps_to_unity() {
        // ftype clamps to 0 at WP >= 40: no response at all
        let f = adjustment_factor(700.0, 45.0, BSTED, BFACE, FSINK);
        assert_relative_eq!(f, 1.0);
    }

    #[test]
    fn test_weighting_saturates_at_550() {
        assert_relative_eq!(co2_weighting(REFERENCE_CO2), 0.0);
        assert_relative_eq!(co2_weighting(550.0), 1.0);
        assert_relative_eq!(co2_weighting(900.0), 1.0);
        let mid = co2_weighting(460.0);
        assert!(mid > 0.0 && mid < 1.0);
    }
}
