//! Canopy development derivations
//!
//! Closed-form inversions of the AquaCrop exponential canopy growth
//! curve: initial cover from plant density, time to 10% and maximum
//! cover, end of vegetative development, end of yield formation, and the
//! CGC/CDC re-derivations used when stage timing converts to thermal
//! time.

use crate::core_types::traits::crop_type;
use crate::core_types::CropTraits;
use crate::phenology::Phenology;

/// Initial canopy cover from plant population and seedling size
///
/// `plant_pop` is plants/ha, `seed_size` cm2 per plant; the product
/// scaled by 1e-8 is the covered soil fraction, rounded to 4 decimals.
#[must_use]
pub fn initial_canopy_cover(plant_pop: f64, seed_size: f64) -> f64 {
    (10_000.0 * plant_pop * seed_size * 1e-8).round() / 10_000.0
}

/// Time from sowing to 10% canopy cover, in the units of `emergence`
#[must_use]
pub fn time_to_canopy_10pct(emergence: f64, cc0: f64, cgc: f64) -> f64 {
    if cc0 <= 0.0 || cgc <= 0.0 {
        return emergence;
    }
    (emergence + (0.1 / cc0).ln() / cgc).round()
}

/// Time from sowing to maximum canopy cover, in the units of `emergence`
#[must_use]
pub fn time_to_max_canopy(emergence: f64, ccx: f64, cc0: f64, cgc: f64) -> f64 {
    if cc0 <= 0.0 || cgc <= 0.0 || ccx <= 0.0 {
        return emergence;
    }
    (emergence + ((0.25 * ccx * ccx / cc0) / (ccx - 0.98 * ccx)).ln() / cgc).round()
}

/// Canopy growth coefficient re-derived for thermal-time stage values
///
/// Inverts the growth curve between emergence and maximum canopy, both
/// expressed in cumulative GDD.
#[must_use]
pub fn cgc_for_thermal_time(ccx: f64, cc0: f64, max_canopy: f64, emergence: f64) -> f64 {
    let span = max_canopy - emergence;
    if ccx <= 0.0 || cc0 <= 0.0 || span <= 0.0 {
        return 0.0;
    }
    (((0.98 * ccx - ccx) * cc0) / (-0.25 * ccx * ccx)).ln() / -span
}

/// Canopy decline coefficient re-derived for thermal-time stage values
///
/// `canopy_cover` is the cell's current canopy cover, a pinned external
/// input; `senescence_to_maturity` is the GDD gap between senescence and
/// maturity (already floored by the caller).
#[must_use]
pub fn cdc_for_thermal_time(ccx: f64, canopy_cover: f64, senescence_to_maturity: f64) -> f64 {
    if ccx <= 0.0 || senescence_to_maturity <= 0.0 {
        return 0.0;
    }
    (ccx / senescence_to_maturity) * (1.0 + (1.0 - canopy_cover / ccx) / 0.05).ln()
}

/// Derive CC0 for every cell
pub fn compute_initial_canopy_cover(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.cc0.shape().len() {
        let cc0 = initial_canopy_cover(traits.plant_pop.get(index), traits.seed_size.get(index));
        pheno.cc0.set(index, cc0);
    }
}

/// Time from sowing to the end of vegetative growth
///
/// Determinant crops stop canopy development halfway through flowering;
/// indeterminant crops develop until senescence.
pub fn compute_canopy_dev_end(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.canopy_dev_end.shape().len() {
        let value = if traits.determinant.get(index) {
            (pheno.hi_start.get(index) + pheno.flowering.get(index) / 2.0).round()
        } else {
            pheno.senescence.get(index)
        };
        pheno.canopy_dev_end.set(index, value);
    }
}

/// Time from sowing to 10% canopy cover for every cell
pub fn compute_canopy_10pct(pheno: &mut Phenology) {
    for index in 0..pheno.canopy_10pct.shape().len() {
        let value = time_to_canopy_10pct(
            pheno.emergence.get(index),
            pheno.cc0.get(index),
            pheno.cgc.get(index),
        );
        pheno.canopy_10pct.set(index, value);
    }
}

/// Time from sowing to maximum canopy cover for every cell
pub fn compute_max_canopy(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.max_canopy.shape().len() {
        let value = time_to_max_canopy(
            pheno.emergence.get(index),
            traits.ccx.get(index),
            pheno.cc0.get(index),
            pheno.cgc.get(index),
        );
        pheno.max_canopy.set(index, value);
    }
}

/// Time from sowing to the end of yield formation
pub fn compute_hi_end(pheno: &mut Phenology) {
    for index in 0..pheno.hi_end.shape().len() {
        pheno
            .hi_end
            .set(index, pheno.hi_start.get(index) + pheno.yld_form.get(index));
    }
}

/// End of flowering for fruit/grain crops
///
/// Only crop type 3 flowers; other crop types keep zero. The day-count
/// counterpart `flowering_cd` is written by the calendar build, never
/// here, so GDD stage values are never mistaken for day counts.
pub fn compute_flowering_end(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.flowering_end.shape().len() {
        if traits.crop_type.get(index) == crop_type::FRUIT_GRAIN {
            let end = pheno.hi_start.get(index) + pheno.flowering.get(index);
            pheno.flowering_end.set(index, end);
        } else {
            pheno.flowering_end.set(index, 0.0);
        }
    }
}

/// Root water extraction parameters shared with the soil-water module
pub fn compute_root_extraction_terms(pheno: &mut Phenology, traits: &CropTraits) {
    for index in 0..pheno.sx_top.shape().len() {
        let (top, bot) = super::root_extraction::extraction_terms(
            traits.sx_top_q.get(index),
            traits.sx_bot_q.get(index),
        );
        pheno.sx_top.set(index, top);
        pheno.sx_bot.set(index, bot);
    }
}
