//! Per-step mutable season state
//!
//! Allocated once at initialization and mutated in place every timestep;
//! tensors are never reallocated.

use serde::{Deserialize, Serialize};

use crate::core_types::{CropField, CropTraits, FieldShape};

/// Growing-season tracking state for every (farm, crop, cell)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonState {
    /// Planting day of year adjusted to the current year's calendar
    pub planting_adj: CropField<i32>,
    /// Harvest day of year adjusted to the current year's calendar
    pub harvest_adj: CropField<i32>,
    /// Whether the current day lies inside an active growing season
    pub growing_season: CropField<bool>,
    /// Whether today is the first day of a new growing season
    pub season_day_one: CropField<bool>,
    /// Days after planting; zero while dormant
    pub dap: CropField<i32>,
    /// Water productivity CO2 adjustment, frozen per season
    pub fco2: CropField<f64>,
    /// CO2 concentration snapshot taken at season start, ppm
    pub current_conc: CropField<f64>,
}

impl SeasonState {
    /// Allocate state tensors; adjusted dates start as raw copies
    #[must_use]
    pub fn new(shape: FieldShape, traits: &CropTraits) -> Self {
        Self {
            planting_adj: traits.planting_date.clone(),
            harvest_adj: traits.harvest_date.clone(),
            growing_season: CropField::falses(shape),
            season_day_one: CropField::falses(shape),
            dap: CropField::<i32>::zeros(shape),
            fco2: CropField::zeros(shape),
            current_conc: CropField::zeros(shape),
        }
    }
}

/// Running anomaly counters
///
/// Degenerate durations are corrected in place and counted rather than
/// raised; calendar inconsistencies abort the affected cells and are
/// counted here as well.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Stage-duration gaps replaced by their floor constant
    pub degenerate_durations: u64,
    /// Cells whose stage lookup found no day exceeding the threshold
    pub calendar_inconsistencies: u64,
}
