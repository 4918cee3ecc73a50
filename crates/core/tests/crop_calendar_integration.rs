//! Multi-year crop calendar integration scenarios

use aquacrop_core::{
    CropConfig, CropSimulation, FieldShape, FixedCo2, ParameterTable, SimClock, StaticLifecycle,
    SyntheticWeather, TraitCatalog, REFERENCE_CO2,
};
use chrono::NaiveDate;

fn thermal_maize_table() -> ParameterTable {
    // Reference maize with stage thresholds expressed directly in GDD
    let mut table = ParameterTable::reference_maize();
    table.insert(1, "Emergence", 60.0);
    table.insert(1, "MaxRooting", 1080.0);
    table.insert(1, "Senescence", 1070.0);
    table.insert(1, "Maturity", 1320.0);
    table.insert(1, "HIstart", 660.0);
    table.insert(1, "Flowering", 130.0);
    table.insert(1, "YldForm", 610.0);
    table
}

#[test]
fn two_year_thermal_run_starts_a_season_each_year() {
    let shape = FieldShape::new(1, 1, 3);
    let table = thermal_maize_table();
    let catalog = TraitCatalog::new(shape, vec![&table]);
    let weather = SyntheticWeather::new(3, 12.0, 26.0, 8.0);
    let lifecycle = StaticLifecycle::new(shape);
    let atmosphere = FixedCo2(REFERENCE_CO2);
    let config = CropConfig::default();

    let mut clock = SimClock::new(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    );
    let mut sim = CropSimulation::initialise(&config, shape, &catalog, &clock, &weather).unwrap();
    assert!(sim.mode().is_thermal());

    let mut season_starts = 0;
    let mut max_dap = 0;
    loop {
        sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
        if sim.state().season_day_one.get(0) {
            season_starts += 1;
            // Every cell starts together under uniform traits
            assert_eq!(sim.state().season_day_one.count(), shape.len());
            // The per-season re-derivation produced usable day counts
            assert!(sim.phenology().hi_start_cd.get(0) > 0);
            assert!(sim.phenology().hi_end_cd.get(0) > sim.phenology().hi_start_cd.get(0));
        }
        max_dap = max_dap.max(sim.state().dap.get(0));
        if clock.finished() {
            break;
        }
        clock.advance();
    }

    assert_eq!(season_starts, 2);
    // Planting doy 100 to harvest doy 250 is a 151-day season
    assert_eq!(max_dap, 151);
    assert_eq!(sim.stats().calendar_inconsistencies, 0);
}

#[test]
fn leap_year_shifts_the_planting_day() {
    let shape = FieldShape::new(1, 1, 1);
    let table = ParameterTable::reference_maize();
    let catalog = TraitCatalog::new(shape, vec![&table]);
    let weather = SyntheticWeather::constant(1, 18.0, 18.0);
    let lifecycle = StaticLifecycle::new(shape);
    let atmosphere = FixedCo2(REFERENCE_CO2);
    let config = CropConfig {
        calendar_type: 1,
        ..CropConfig::default()
    };

    let mut clock = SimClock::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    );
    let mut sim = CropSimulation::initialise(&config, shape, &catalog, &clock, &weather).unwrap();

    let mut start_doy = None;
    loop {
        sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
        if sim.state().season_day_one.get(0) {
            start_doy = Some(clock.doy());
        }
        if !clock.advance() {
            break;
        }
    }

    // Raw planting day 100 names the same calendar date, one doy later
    // in a leap year
    assert_eq!(start_doy, Some(101));
    assert_eq!(
        sim.state().planting_adj.get(0),
        sim.traits().planting_date.get(0) + 1
    );
}

#[test]
fn crop_death_ends_the_season_until_cleared() {
    let shape = FieldShape::new(1, 1, 1);
    let table = ParameterTable::reference_maize();
    let catalog = TraitCatalog::new(shape, vec![&table]);
    let weather = SyntheticWeather::constant(1, 18.0, 18.0);
    let mut lifecycle = StaticLifecycle::new(shape);
    let atmosphere = FixedCo2(REFERENCE_CO2);
    let config = CropConfig {
        calendar_type: 1,
        ..CropConfig::default()
    };

    let mut clock = SimClock::new(
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    );
    let mut sim = CropSimulation::initialise(&config, shape, &catalog, &clock, &weather).unwrap();

    // Into the season
    for _ in 0..119 {
        sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
        clock.advance();
    }
    sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
    assert!(sim.state().growing_season.get(0));

    // Crop dies mid-season
    lifecycle.dead_mut().set(0, true);
    clock.advance();
    sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
    assert!(!sim.state().growing_season.get(0));
    assert_eq!(sim.state().dap.get(0), 0);

    // The flag still set keeps the cell dormant for the rest of the window
    clock.advance();
    sim.step(&clock, &weather, &lifecycle, &atmosphere).unwrap();
    assert!(!sim.state().growing_season.get(0));
}
