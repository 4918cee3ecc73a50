//! Calendar-type conversion
//!
//! Two directions. At initialization, a calendar-day crop calendar can
//! be translated once into thermal-time units (the SwitchGDD path): each
//! stage boundary becomes the GDD accumulated over its calendar-day span
//! from planting, and the canopy growth/decline coefficients are
//! re-derived for the new units. In thermal-time mode, the reverse
//! conversion runs at the start of every growing season: stage GDD
//! thresholds are resolved against the fresh cumulative curve to
//! calendar-day counts, written only into the cells whose season just
//! began.

use tracing::warn;

use crate::core_types::traits::crop_type;
use crate::core_types::{CropField, CropTraits, GddMethod};
use crate::error::{CropError, CropResult};
use crate::phenology::{canopy, season_window, Phenology, ThermalTimeTable};
use crate::providers::{SimClock, WeatherSeries};
use crate::simulation::state::{SeasonState, SimulationStats};

/// Nominal senescence-to-maturity gap when the GDD gap is non-positive
const DEGENERATE_GAP_GDD: f64 = 5.0;

/// Copy the calendar-day stage values into their `_cd` counterparts
///
/// Runs when the calendar is built in calendar-day mode, before any
/// optional conversion rewrites the stage fields in GDD units. In
/// thermal-time mode the `_cd` fields stay zero until the per-season
/// re-derivation writes real day counts.
pub fn snapshot_day_counts(pheno: &mut Phenology, traits: &CropTraits) {
    let shape = pheno.max_canopy.shape();
    for index in 0..shape.len() {
        pheno
            .max_canopy_cd
            .set(index, pheno.max_canopy.get(index).round() as i32);
        pheno
            .canopy_dev_end_cd
            .set(index, pheno.canopy_dev_end.get(index).round() as i32);
        pheno
            .hi_start_cd
            .set(index, pheno.hi_start.get(index).round() as i32);
        pheno
            .hi_end_cd
            .set(index, pheno.hi_end.get(index).round() as i32);
        pheno
            .yld_form_cd
            .set(index, pheno.yld_form.get(index).round() as i32);
        if traits.crop_type.get(index) == crop_type::FRUIT_GRAIN {
            pheno
                .flowering_cd
                .set(index, pheno.flowering.get(index).round() as i32);
        }
    }
}

/// One-time calendar-day to thermal-time conversion
///
/// Rewrites every stage boundary of `pheno` as the cumulative GDD
/// reached at the end of its calendar-day span from planting, then
/// re-derives CGC and CDC for the new units. `canopy_cover` is the
/// per-cell current canopy cover entering the CDC formula, a pinned
/// external input (the initial cover at initialization time).
///
/// Cells whose season window has already passed the current day keep
/// their calendar-day values; they convert when their next season
/// starts. Stage spans extending past the season window are a calendar
/// inconsistency: such cells are left unconverted and reported.
#[allow(clippy::too_many_arguments)]
pub fn switch_to_thermal(
    pheno: &mut Phenology,
    traits: &CropTraits,
    state: &SeasonState,
    clock: &SimClock,
    weather: &dyn WeatherSeries,
    method: GddMethod,
    canopy_cover: &CropField<f64>,
    stats: &mut SimulationStats,
) -> CropResult<()> {
    let (pd, hd) = season_window(&state.planting_adj, &state.harvest_adj, clock.doy());
    let table = ThermalTimeTable::build(
        &pd,
        &hd,
        &traits.tbase,
        &traits.tupp,
        method,
        clock,
        weather,
    )?;

    let shape = pheno.max_canopy.shape();
    let mut failed_cells = 0usize;
    let mut failed_stage: &'static str = "";

    for index in 0..shape.len() {
        let planting = pd.get(index);
        if planting <= 0 {
            continue;
        }

        // GDD accumulated over a stage's calendar-day span from planting
        let stage_gdd = |cd: f64| table.value_on(planting + cd.round() as i32 - 1, index);

        let spans = [
            ("Emergence", pheno.emergence.get(index)),
            ("Canopy10Pct", pheno.canopy_10pct.get(index)),
            ("MaxRooting", pheno.max_rooting.get(index)),
            ("MaxCanopy", pheno.max_canopy.get(index)),
            ("CanopyDevEnd", pheno.canopy_dev_end.get(index)),
            ("Senescence", pheno.senescence.get(index)),
            ("Maturity", pheno.maturity.get(index)),
            ("HIstart", pheno.hi_start.get(index)),
            ("HIend", pheno.hi_end.get(index)),
            ("YldForm", pheno.yld_form.get(index)),
        ];
        let mut converted = [0.0; 10];
        let mut cell_ok = true;
        for (slot, (stage, span)) in converted.iter_mut().zip(spans.iter()) {
            match stage_gdd(*span) {
                Some(value) => *slot = value,
                None => {
                    cell_ok = false;
                    failed_stage = stage;
                    break;
                }
            }
        }
        if !cell_ok {
            failed_cells += 1;
            continue;
        }

        let flowering_end_gdd = if traits.crop_type.get(index) == crop_type::FRUIT_GRAIN {
            match stage_gdd(pheno.flowering_end.get(index)) {
                Some(value) => Some(value),
                None => {
                    failed_cells += 1;
                    failed_stage = "FloweringEnd";
                    continue;
                }
            }
        } else {
            None
        };

        pheno.emergence.set(index, converted[0]);
        pheno.canopy_10pct.set(index, converted[1]);
        pheno.max_rooting.set(index, converted[2]);
        pheno.max_canopy.set(index, converted[3]);
        pheno.canopy_dev_end.set(index, converted[4]);
        pheno.senescence.set(index, converted[5]);
        pheno.maturity.set(index, converted[6]);
        pheno.hi_start.set(index, converted[7]);
        pheno.hi_end.set(index, converted[8]);
        pheno.yld_form.set(index, converted[9]);
        if let Some(fe) = flowering_end_gdd {
            pheno.flowering_end.set(index, fe);
            pheno
                .flowering
                .set(index, fe - pheno.hi_start.get(index));
        }

        // Re-derive the canopy coefficients in GDD units
        let ccx = traits.ccx.get(index);
        let cc0 = pheno.cc0.get(index);
        pheno.cgc.set(
            index,
            canopy::cgc_for_thermal_time(
                ccx,
                cc0,
                pheno.max_canopy.get(index),
                pheno.emergence.get(index),
            ),
        );

        let mut gap = pheno.maturity.get(index) - pheno.senescence.get(index);
        if gap <= 0.0 {
            stats.degenerate_durations += 1;
            warn!(
                index,
                "non-positive senescence-to-maturity gap, substituting {} GDD",
                DEGENERATE_GAP_GDD
            );
            gap = DEGENERATE_GAP_GDD;
        }
        pheno.cdc.set(
            index,
            canopy::cdc_for_thermal_time(ccx, canopy_cover.get(index), gap),
        );
    }

    if failed_cells > 0 {
        stats.calendar_inconsistencies += failed_cells as u64;
        return Err(CropError::CalendarInconsistency {
            stage: failed_stage,
            cells: failed_cells,
        });
    }
    Ok(())
}

/// Re-derive calendar-day stage counts from thermal-time thresholds
///
/// With `only_new_seasons` set, writes are restricted to cells whose
/// growing season started this step; every other cell keeps the counts
/// from its previous season. A threshold that no day in the window
/// exceeds leaves the cell untouched and is reported after the
/// remaining cells have been applied.
#[allow(clippy::too_many_arguments)]
pub fn rederive_day_counts(
    pheno: &mut Phenology,
    traits: &CropTraits,
    state: &SeasonState,
    clock: &SimClock,
    weather: &dyn WeatherSeries,
    method: GddMethod,
    only_new_seasons: bool,
    stats: &mut SimulationStats,
) -> CropResult<()> {
    let (pd, hd) = season_window(&state.planting_adj, &state.harvest_adj, clock.doy());
    let table = ThermalTimeTable::build(
        &pd,
        &hd,
        &traits.tbase,
        &traits.tupp,
        method,
        clock,
        weather,
    )?;

    let shape = pheno.max_canopy.shape();
    let mut failed_cells = 0usize;
    let mut failed_stage: &'static str = "";

    for index in 0..shape.len() {
        let planting = pd.get(index);
        if planting <= 0 {
            continue;
        }
        if only_new_seasons && !state.season_day_one.get(index) {
            continue;
        }

        let day_count = |threshold: f64| {
            table
                .first_day_exceeding(index, threshold)
                .map(|day| day - planting + 1)
        };

        let thresholds = [
            ("MaxCanopy", pheno.max_canopy.get(index)),
            ("CanopyDevEnd", pheno.canopy_dev_end.get(index)),
            ("HIstart", pheno.hi_start.get(index)),
            ("HIend", pheno.hi_end.get(index)),
        ];
        let mut counts = [0i32; 4];
        let mut cell_ok = true;
        for (slot, (stage, threshold)) in counts.iter_mut().zip(thresholds.iter()) {
            match day_count(*threshold) {
                Some(count) => *slot = count,
                None => {
                    cell_ok = false;
                    failed_stage = stage;
                    break;
                }
            }
        }
        if !cell_ok {
            failed_cells += 1;
            continue;
        }

        let flowering_count = if traits.crop_type.get(index) == crop_type::FRUIT_GRAIN {
            match day_count(pheno.flowering_end.get(index)) {
                Some(count) => Some(count),
                None => {
                    failed_cells += 1;
                    failed_stage = "FloweringEnd";
                    continue;
                }
            }
        } else {
            None
        };

        pheno.max_canopy_cd.set(index, counts[0]);
        pheno.canopy_dev_end_cd.set(index, counts[1]);
        pheno.hi_start_cd.set(index, counts[2]);
        pheno.hi_end_cd.set(index, counts[3]);
        pheno.yld_form_cd.set(index, counts[3] - counts[2]);
        if let Some(fe_count) = flowering_count {
            pheno
                .flowering_cd
                .set(index, fe_count - pheno.hi_start_cd.get(index));
        }
    }

    if failed_cells > 0 {
        stats.calendar_inconsistencies += failed_cells as u64;
        return Err(CropError::CalendarInconsistency {
            stage: failed_stage,
            cells: failed_cells,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::FieldShape;
    use crate::providers::{load_crop_traits, ParameterTable, SyntheticWeather, TraitCatalog};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn build_fixture() -> (CropTraits, Phenology, SeasonState, SimClock, SyntheticWeather) {
        let shape = FieldShape::new(1, 1, 1);
        let table = ParameterTable::reference_maize();
        let catalog = TraitCatalog::new(shape, vec![&table]);
        let traits = load_crop_traits(&catalog).unwrap();
        let mut pheno = Phenology::from_traits(shape, &traits);
        let state = SeasonState::new(shape, &traits);

        canopy::compute_initial_canopy_cover(&mut pheno, &traits);
        canopy::compute_canopy_dev_end(&mut pheno, &traits);
        canopy::compute_canopy_10pct(&mut pheno);
        canopy::compute_max_canopy(&mut pheno, &traits);
        canopy::compute_hi_end(&mut pheno);
        canopy::compute_flowering_end(&mut pheno, &traits);
        snapshot_day_counts(&mut pheno, &traits);

        let start = NaiveDate::from_yo_opt(2023, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let clock = SimClock::new(start, end);
        // Constant tmean = Tbase + 10: exactly 10 GDD per in-season day
        let weather = SyntheticWeather::constant(1, 18.0, 18.0);
        (traits, pheno, state, clock, weather)
    }

    #[test]
    fn test_switch_converts_stage_spans_to_gdd() {
        let (traits, mut pheno, state, clock, weather) = build_fixture();
        let cc0 = pheno.cc0.clone();
        let mut stats = SimulationStats::default();

        switch_to_thermal(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            &cc0,
            &mut stats,
        )
        .unwrap();

        // 6-day emergence span at 10 GDD/day
        assert_relative_eq!(pheno.emergence.get(0), 60.0);
        // Maturity spans the whole 132-day cycle
        assert_relative_eq!(pheno.maturity.get(0), 1320.0);
        assert_eq!(stats.calendar_inconsistencies, 0);

        // Day counterparts keep the calendar-day values
        assert_eq!(pheno.hi_start_cd.get(0), 66);
        assert_eq!(pheno.yld_form_cd.get(0), 61);
    }

    #[test]
    fn test_switch_rederives_canopy_coefficients() {
        let (traits, mut pheno, state, clock, weather) = build_fixture();
        let cc0 = pheno.cc0.clone();
        let day_cgc = pheno.cgc.get(0);
        let mut stats = SimulationStats::default();

        switch_to_thermal(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            &cc0,
            &mut stats,
        )
        .unwrap();

        // 10 GDD per day: thermal-time coefficients are about a tenth of
        // their calendar-day counterparts
        let thermal_cgc = pheno.cgc.get(0);
        assert!(thermal_cgc > 0.0 && thermal_cgc < day_cgc);
        assert!(pheno.cdc.get(0) > 0.0);
    }

    #[test]
    fn test_degenerate_maturity_gap_floors_cdc() {
        let shape = FieldShape::new(1, 1, 1);
        let mut table = ParameterTable::reference_maize();
        // Maturity before senescence: the converted GDD gap is negative
        table.insert(1, "Maturity", 100.0);
        let catalog = TraitCatalog::new(shape, vec![&table]);
        let traits = load_crop_traits(&catalog).unwrap();
        let mut pheno = Phenology::from_traits(shape, &traits);
        let state = SeasonState::new(shape, &traits);

        canopy::compute_initial_canopy_cover(&mut pheno, &traits);
        canopy::compute_canopy_dev_end(&mut pheno, &traits);
        canopy::compute_canopy_10pct(&mut pheno);
        canopy::compute_max_canopy(&mut pheno, &traits);
        canopy::compute_hi_end(&mut pheno);
        canopy::compute_flowering_end(&mut pheno, &traits);
        snapshot_day_counts(&mut pheno, &traits);

        let clock = SimClock::new(
            NaiveDate::from_yo_opt(2023, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        let weather = SyntheticWeather::constant(1, 18.0, 18.0);
        let cc0 = pheno.cc0.clone();
        let mut stats = SimulationStats::default();

        switch_to_thermal(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            &cc0,
            &mut stats,
        )
        .unwrap();

        assert_eq!(stats.degenerate_durations, 1);
        // CDC was derived from the substituted 5-GDD gap
        let expected = canopy::cdc_for_thermal_time(
            traits.ccx.get(0),
            pheno.cc0.get(0),
            DEGENERATE_GAP_GDD,
        );
        assert_relative_eq!(pheno.cdc.get(0), expected);
        assert!(pheno.cdc.get(0) > 0.0);
    }

    #[test]
    fn test_round_trip_day_to_gdd_and_back() {
        let (traits, mut pheno, state, clock, weather) = build_fixture();
        let cc0 = pheno.cc0.clone();
        let mut stats = SimulationStats::default();
        let original_hi_start_cd = pheno.hi_start_cd.get(0);

        switch_to_thermal(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            &cc0,
            &mut stats,
        )
        .unwrap();

        rederive_day_counts(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            false,
            &mut stats,
        )
        .unwrap();

        // Constant temperature: the reconversion recovers the original
        // day count within one day
        let diff = (pheno.hi_start_cd.get(0) - original_hi_start_cd).abs();
        assert!(diff <= 1, "round trip drifted by {} days", diff);
        let yld_diff = (pheno.yld_form_cd.get(0) - 61).abs();
        assert!(yld_diff <= 1);
    }

    #[test]
    fn test_unreachable_threshold_is_reported() {
        let (traits, mut pheno, state, clock, weather) = build_fixture();
        let mut stats = SimulationStats::default();

        // Force a threshold far beyond what the window can accumulate
        pheno.max_canopy.fill(1_000_000.0);
        let err = rederive_day_counts(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            false,
            &mut stats,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CropError::CalendarInconsistency {
                stage: "MaxCanopy",
                cells: 1
            }
        ));
        assert_eq!(stats.calendar_inconsistencies, 1);
        // The failed cell kept its previous value
        assert_eq!(pheno.max_canopy_cd.get(0), 54);
    }

    #[test]
    fn test_update_writes_only_new_season_cells() {
        let shape = FieldShape::new(1, 1, 2);
        let table = ParameterTable::reference_maize();
        let catalog = TraitCatalog::new(shape, vec![&table]);
        let traits = load_crop_traits(&catalog).unwrap();
        let mut pheno = Phenology::from_traits(shape, &traits);
        let mut state = SeasonState::new(shape, &traits);

        canopy::compute_initial_canopy_cover(&mut pheno, &traits);
        canopy::compute_canopy_dev_end(&mut pheno, &traits);
        canopy::compute_canopy_10pct(&mut pheno);
        canopy::compute_max_canopy(&mut pheno, &traits);
        canopy::compute_hi_end(&mut pheno);
        canopy::compute_flowering_end(&mut pheno, &traits);

        // Thermal thresholds reachable at 10 GDD/day
        pheno.max_canopy.fill(300.0);
        pheno.canopy_dev_end.fill(500.0);
        pheno.hi_start.fill(660.0);
        pheno.hi_end.fill(1200.0);
        pheno.flowering_end.fill(790.0);

        // Only cell 1 starts a season this step
        state.season_day_one.set(1, true);

        let clock = SimClock::new(
            NaiveDate::from_yo_opt(2023, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        let weather = SyntheticWeather::constant(2, 18.0, 18.0);
        let mut stats = SimulationStats::default();

        rederive_day_counts(
            &mut pheno,
            &traits,
            &state,
            &clock,
            &weather,
            GddMethod::ClipBoth,
            true,
            &mut stats,
        )
        .unwrap();

        // Cell 0 untouched, cell 1 rewritten
        assert_eq!(pheno.max_canopy_cd.get(0), 0);
        assert!(pheno.max_canopy_cd.get(1) > 0);
        // 660 GDD threshold crossed after 67 in-season days
        assert_eq!(pheno.hi_start_cd.get(1), 67);
        assert_eq!(pheno.yld_form_cd.get(1), pheno.hi_end_cd.get(1) - 67);
    }
}
