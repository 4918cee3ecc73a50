//! Top-level crop simulation
//!
//! Owns the trait, phenology and season tensors and drives them through
//! initialization and the daily step in a fixed order: date adjustment,
//! season tracking, CO2 productivity update, then the per-season
//! calendar re-derivation in thermal-time mode.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::{
    adjust_planting_harvest, rederive_day_counts, snapshot_day_counts, switch_to_thermal,
    update_growing_season,
};
use crate::core_types::{CalendarMode, CropTraits, FieldShape, GddMethod};
use crate::error::CropResult;
use crate::phenology::{canopy, co2, harvest_index, Phenology};
use crate::providers::{
    load_crop_traits, CarbonDioxide, LifecycleSignals, SimClock, TraitCatalog, WeatherSeries,
};
use crate::simulation::state::{SeasonState, SimulationStats};

/// Crop calendar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// 1 for calendar days, 2 for thermal time
    pub calendar_type: u8,
    /// Convert a calendar-day configuration to thermal time at startup
    pub switch_gdd: bool,
    /// Temperature clipping policy (1, 2 or 3) for daily GDD
    pub gdd_method: u8,
    /// Crops simulated, in (farm, crop, cell) axis order
    pub crop_ids: Vec<u32>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            calendar_type: 2,
            switch_gdd: false,
            gdd_method: 3,
            crop_ids: vec![1],
        }
    }
}

/// Crop calendar and parameter state over the full (farm, crop, cell)
/// domain
#[derive(Debug)]
pub struct CropSimulation {
    shape: FieldShape,
    mode: CalendarMode,
    traits: CropTraits,
    pheno: Phenology,
    state: SeasonState,
    stats: SimulationStats,
}

impl CropSimulation {
    /// Resolve traits, derive the initial parameter set and build the
    /// crop calendar in the configured representation
    pub fn initialise(
        config: &CropConfig,
        shape: FieldShape,
        catalog: &TraitCatalog<'_>,
        clock: &SimClock,
        weather: &dyn WeatherSeries,
    ) -> CropResult<Self> {
        let traits = load_crop_traits(catalog)?;
        let mut state = SeasonState::new(shape, &traits);
        let mut pheno = Phenology::from_traits(shape, &traits);
        let mut stats = SimulationStats::default();
        let method = GddMethod::from_config(config.gdd_method);

        canopy::compute_initial_canopy_cover(&mut pheno, &traits);
        canopy::compute_root_extraction_terms(&mut pheno, &traits);
        adjust_planting_harvest(&mut state, &traits, clock.is_leap_year());

        canopy::compute_canopy_dev_end(&mut pheno, &traits);
        canopy::compute_canopy_10pct(&mut pheno);
        canopy::compute_max_canopy(&mut pheno, &traits);
        canopy::compute_hi_end(&mut pheno);
        canopy::compute_flowering_end(&mut pheno, &traits);

        let mode = if config.calendar_type == 1 {
            snapshot_day_counts(&mut pheno, &traits);
            if config.switch_gdd {
                let cover = pheno.cc0.clone();
                switch_to_thermal(
                    &mut pheno, &traits, &state, clock, weather, method, &cover, &mut stats,
                )?;
                CalendarMode::ThermalTime { method }
            } else {
                CalendarMode::CalendarDays
            }
        } else {
            rederive_day_counts(
                &mut pheno, &traits, &state, clock, weather, method, false, &mut stats,
            )?;
            CalendarMode::ThermalTime { method }
        };

        harvest_index::compute_higc(&mut pheno, &traits);
        harvest_index::compute_hi_linear(&mut pheno, &traits);

        info!(
            farms = shape.farms,
            crops = shape.crops,
            cells = shape.cells,
            ?mode,
            "crop calendar initialised"
        );

        Ok(Self {
            shape,
            mode,
            traits,
            pheno,
            state,
            stats,
        })
    }

    /// Advance one simulated day
    ///
    /// `clock` must already point at the day being computed. Calendar
    /// re-derivation failures leave the unaffected cells updated; the
    /// error names the stage and cell count.
    pub fn step(
        &mut self,
        clock: &SimClock,
        weather: &dyn WeatherSeries,
        lifecycle: &dyn LifecycleSignals,
        atmosphere: &dyn CarbonDioxide,
    ) -> CropResult<()> {
        adjust_planting_harvest(&mut self.state, &self.traits, clock.is_leap_year());
        update_growing_season(
            &mut self.state,
            lifecycle.crop_dead(),
            lifecycle.crop_mature(),
            clock,
        );
        co2::update_water_productivity(
            &mut self.state,
            &self.traits,
            atmosphere.concentration(clock.current_date()),
        );

        if let CalendarMode::ThermalTime { method } = self.mode {
            if !self.state.season_day_one.any() {
                return Ok(());
            }
            debug!(
                doy = clock.doy(),
                starting = self.state.season_day_one.count(),
                "re-deriving stage day counts for new seasons"
            );
            let outcome = rederive_day_counts(
                &mut self.pheno,
                &self.traits,
                &self.state,
                clock,
                weather,
                method,
                true,
                &mut self.stats,
            );
            // Cells that did re-derive need their harvest index curve
            // re-fitted even when other cells failed
            harvest_index::compute_higc(&mut self.pheno, &self.traits);
            harvest_index::compute_hi_linear(&mut self.pheno, &self.traits);
            outcome?;
        }
        Ok(())
    }

    /// Domain extent
    #[must_use]
    pub const fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Active stage-timing representation
    #[must_use]
    pub const fn mode(&self) -> CalendarMode {
        self.mode
    }

    /// Resolved crop traits
    #[must_use]
    pub const fn traits(&self) -> &CropTraits {
        &self.traits
    }

    /// Derived phenology tensors
    #[must_use]
    pub const fn phenology(&self) -> &Phenology {
        &self.pheno
    }

    /// Mutable season state
    #[must_use]
    pub const fn state(&self) -> &SeasonState {
        &self.state
    }

    /// Anomaly counters
    #[must_use]
    pub const fn stats(&self) -> SimulationStats {
        self.stats
    }
}
