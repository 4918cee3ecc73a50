//! Crop Calendar and Parameter Derivation Core
//!
//! A vectorized crop phenology engine over a dense (farm, crop, cell)
//! domain, following the AquaCrop model conventions. Derives canopy and
//! harvest-index parameters from configured crop traits, tracks growing
//! seasons day by day, and supports phenological calendars expressed in
//! either calendar days or accumulated thermal time (growing degree
//! days), including conversion between the two.
//!
//! ## Time representations
//!
//! Stage boundaries live in one of two units, chosen at initialization:
//! - Calendar days: fixed day counts from planting
//! - Thermal time: cumulative-GDD thresholds, translated back into day
//!   counts at the start of every growing season from that season's
//!   temperature record

// Core types and shared tensors
pub mod core_types;

pub mod error;

// External inputs: clock, weather, traits, lifecycle flags, CO2
pub mod providers;

// Derived agronomic parameters
pub mod phenology;

// Crop calendar: date adjustment, conversion, season tracking
pub mod calendar;

// Top-level orchestration
pub mod simulation;

// Re-export core types
pub use core_types::{CalendarMode, CropField, CropTraits, FieldShape, GddMethod};
pub use error::{CropError, CropResult};

// Re-export providers
pub use providers::{
    load_crop_traits, CarbonDioxide, FixedCo2, LifecycleSignals, ParameterTable, RecordedWeather,
    SimClock, StaticLifecycle, SyntheticWeather, TraitCatalog, TraitOverrides, TraitSource,
    WeatherSeries, REFERENCE_CO2,
};

// Re-export the simulation driver
pub use phenology::{Phenology, ThermalTimeTable};
pub use simulation::{CropConfig, CropSimulation, SeasonState, SimulationStats};
