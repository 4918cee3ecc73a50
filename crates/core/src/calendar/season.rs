//! Growing-season tracker
//!
//! Per-cell state machine over {Dormant, Active}: a season starts the
//! day the current day-of-year reaches the adjusted planting date,
//! stays active until the adjusted harvest date passes or the crop dies
//! or matures, and handles harvest windows that wrap across the year
//! boundary. Mutates the season flags and the days-after-planting
//! counter in place. There are no error paths; out-of-range inputs
//! clamp to Dormant.

use crate::core_types::CropField;
use crate::providers::SimClock;
use crate::simulation::state::SeasonState;

/// Advance season membership for every (farm, crop, cell)
///
/// Must run after the date adjustment for the current day. `dead` and
/// `mature` are external lifecycle flags; either one ends the season
/// and blocks a restart until cleared.
pub fn update_growing_season(
    state: &mut SeasonState,
    dead: &CropField<bool>,
    mature: &CropField<bool>,
    clock: &SimClock,
) {
    let shape = state.growing_season.shape();
    let doy = clock.doy();
    for index in 0..shape.len() {
        let pd = state.planting_adj.get(index);
        let hd = state.harvest_adj.get(index);
        let finished = dead.get(index) || mature.get(index);

        // Window test with year wraparound: a harvest day before the
        // planting day belongs to the following calendar year
        let in_window = if pd <= hd {
            doy >= pd && doy <= hd
        } else {
            doy >= pd || doy <= hd
        };
        let valid = pd > 0 && hd > 0;

        if !valid || !in_window || finished {
            state.growing_season.set(index, false);
            state.season_day_one.set(index, false);
            state.dap.set(index, 0);
            continue;
        }

        if doy == pd {
            // A new season only begins if its planting day falls inside
            // the simulation period
            let planting_abs = clock.year_start_day() + i64::from(pd) - 1;
            if planting_abs > clock.end_day() {
                state.growing_season.set(index, false);
                state.season_day_one.set(index, false);
                state.dap.set(index, 0);
                continue;
            }
            state.growing_season.set(index, true);
            state.season_day_one.set(index, true);
            state.dap.set(index, 1);
        } else {
            state.growing_season.set(index, true);
            state.season_day_one.set(index, false);
            state.dap.set(index, state.dap.get(index) + 1);
        }
    }
}
