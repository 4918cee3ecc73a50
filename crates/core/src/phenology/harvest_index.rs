//! Harvest index growth curve parameters
//!
//! The harvest index builds logistically from `HIini` toward `HI0` over
//! the yield-formation period. The growth coefficient HIGC is found by
//! incremental search (AquaCrop convention), and a linear tail segment
//! takes over once the logistic slope can no longer reach `HI0` within
//! the remaining time.

use crate::core_types::CropTraits;
use crate::phenology::Phenology;

/// Logistic harvest index after `t` days of yield formation
fn logistic_hi(hi_ini: f64, hi0: f64, higc: f64, t: f64) -> f64 {
    (hi_ini * hi0) / (hi_ini + (hi0 - hi_ini) * (-higc * t).exp())
}

/// Harvest index growth coefficient for a yield-formation duration
///
/// Increments HIGC in 0.001 steps until the logistic reaches 98% of
/// `HI0` by the end of yield formation, stepping back once when the
/// curve overshoots `HI0` itself. `HI0 == HIini` degenerates to the
/// smallest coefficient without any division hazard.
#[must_use]
pub fn higc(yld_form_cd: i32, hi0: f64, hi_ini: f64) -> f64 {
    let t_hi = f64::from(yld_form_cd);
    if t_hi <= 0.0 || hi_ini <= 0.0 || hi0 <= 0.0 {
        return 0.001;
    }

    let mut higc = 0.001;
    let mut hi_est = 0.0;
    while hi_est <= 0.98 * hi0 {
        higc += 0.001;
        hi_est = logistic_hi(hi_ini, hi0, higc, t_hi);
    }
    if hi_est >= hi0 {
        higc -= 0.001;
    }
    higc
}

/// Linear-segment switch point and slope for the harvest index curve
///
/// Walks the logistic day by day; the switch happens on the last day the
/// straight line from the current point can still reach `HI0` by the end
/// of yield formation. Returns `(t_lin_switch, d_hi_linear)`.
#[must_use]
pub fn hi_linear(yld_form_cd: i32, hi_ini: f64, hi0: f64, higc: f64) -> (i32, f64) {
    let t_max = f64::from(yld_form_cd);
    if t_max <= 0.0 || hi_ini <= 0.0 || hi0 <= 0.0 {
        return (0, 0.0);
    }

    let mut ti = 0.0;
    let mut hi_est = 0.0;
    let mut hi_prev = hi_ini;
    while hi_est <= hi0 && ti < t_max {
        ti += 1.0;
        let hi_new = logistic_hi(hi_ini, hi0, higc, ti);
        hi_est = hi_new + (t_max - ti) * (hi_new - hi_prev);
        hi_prev = hi_new;
    }

    let t_switch = ti - 1.0;
    let hi_at_switch = if t_switch > 0.0 {
        logistic_hi(hi_ini, hi0, higc, t_switch)
    } else {
        0.0
    };
    let remaining = t_max - t_switch;
    let d_hi_linear = if remaining > 0.0 {
        (hi0 - hi_at_switch) / remaining
    } else {
        0.0
    };
    (t_switch as i32, d_hi_linear)
}

/// Derive HIGC for every cell from the calendar-day yield formation
pub fn compute_higc(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.higc.shape().len() {
        let value = higc(
            pheno.yld_form_cd.get(index),
            traits.hi0.get(index),
            traits.hi_ini.get(index),
        );
        pheno.higc.set(index, value);
    }
}

/// Derive the linear-segment parameters for every cell
pub fn compute_hi_linear(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.t_lin_switch.shape().len() {
        let (t_switch, d_linear) = hi_linear(
            pheno.yld_form_cd.get(index),
            traits.hi_ini.get(index),
            traits.hi0.get(index),
            pheno.higc.get(index),
        );
        pheno.t_lin_switch.set(index, t_switch);
        pheno.d_hi_linear.set(index, d_linear);
    }
}
