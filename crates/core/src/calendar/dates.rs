//! Leap-year date adjustment
//!
//! Raw planting and harvest days are defined on a 365-day calendar. In a
//! leap year every day-of-year on or after 1 March (day 60 of the
//! 365-day calendar) shifts by one so the adjusted value names the same
//! calendar date. The adjusted tensors are recomputed from the raw
//! traits on every call, which makes the operation idempotent.

use crate::core_types::CropTraits;
use crate::simulation::state::SeasonState;

/// Day-of-year at which the Feb-29 shift starts (1 March, 365-day calendar)
const LEAP_SHIFT_DAY: i32 = 60;

/// Shift one raw day-of-year into the current year's calendar
#[must_use]
pub fn adjust_doy(raw: i32, leap_year: bool) -> i32 {
    if leap_year && raw >= LEAP_SHIFT_DAY {
        raw + 1
    } else {
        raw
    }
}

/// Refresh the adjusted planting/harvest tensors for the current year
///
/// Must run once per simulated day, before the growing-season tracker,
/// so date comparisons stay aligned with the advancing day-of-year.
pub fn adjust_planting_harvest(state: &mut SeasonState, traits: &CropTraits, leap_year: bool) {
    let shape = state.planting_adj.shape();
    for index in 0..shape.len() {
        state
            .planting_adj
            .set(index, adjust_doy(traits.planting_date.get(index), leap_year));
        state
            .harvest_adj
            .set(index, adjust_doy(traits.harvest_date.get(index), leap_year));
    }
}
