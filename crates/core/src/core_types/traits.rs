//! Raw crop trait tensors
//!
//! The full set of crop parameters consumed by the calendar and
//! parameter-derivation engines. Fields are enumerated statically, one
//! tensor per trait; the struct is loaded once at initialization and
//! never mutated afterwards. Working copies of the stage timings live in
//! [`crate::phenology::Phenology`] because the calendar-type conversion
//! rewrites them in thermal-time units.

use crate::core_types::field::CropField;

/// Crop type taxonomy (external enumeration; semantics defined by the
/// AquaCrop documentation, not by this core)
pub mod crop_type {
    /// Leafy vegetable
    pub const LEAFY: i32 = 1;
    /// Root or tuber crop
    pub const ROOT_TUBER: i32 = 2;
    /// Fruit or grain producing crop
    pub const FRUIT_GRAIN: i32 = 3;
}

/// Immutable per-cell crop trait tensors
#[derive(Debug, Clone)]
pub struct CropTraits {
    /// Crop type (1 = leafy, 2 = root/tuber, 3 = fruit/grain)
    pub crop_type: CropField<i32>,
    /// Whether crop growth is determinant
    pub determinant: CropField<bool>,
    /// Planting day of year (1-based, 365-day calendar)
    pub planting_date: CropField<i32>,
    /// Harvest day of year (1-based, 365-day calendar)
    pub harvest_date: CropField<i32>,

    // Stage lengths from planting, calendar days
    /// Time to emergence
    pub emergence: CropField<f64>,
    /// Time to maximum rooting depth
    pub max_rooting: CropField<f64>,
    /// Time to canopy senescence
    pub senescence: CropField<f64>,
    /// Time to maturity
    pub maturity: CropField<f64>,
    /// Time to start of yield formation
    pub hi_start: CropField<f64>,
    /// Duration of flowering
    pub flowering: CropField<f64>,
    /// Duration of yield formation
    pub yld_form: CropField<f64>,

    // Temperature thresholds, degrees C
    /// Base temperature below which no thermal time accrues
    pub tbase: CropField<f64>,
    /// Upper temperature cap for thermal time
    pub tupp: CropField<f64>,
    /// Maximum-temperature stress threshold, upper bound
    pub tmax_up: CropField<f64>,
    /// Maximum-temperature stress threshold, lower bound
    pub tmax_lo: CropField<f64>,
    /// Minimum-temperature stress threshold, upper bound
    pub tmin_up: CropField<f64>,
    /// Minimum-temperature stress threshold, lower bound
    pub tmin_lo: CropField<f64>,

    // Canopy development
    /// Plant population, plants per hectare
    pub plant_pop: CropField<f64>,
    /// Soil surface area covered by an individual seedling, cm2
    pub seed_size: CropField<f64>,
    /// Maximum canopy cover, fraction
    pub ccx: CropField<f64>,
    /// Canopy growth coefficient, per day (or per GDD after conversion)
    pub cgc: CropField<f64>,
    /// Canopy decline coefficient, per day (or per GDD after conversion)
    pub cdc: CropField<f64>,

    // Harvest index
    /// Reference harvest index, fraction
    pub hi0: CropField<f64>,
    /// Initial harvest index at the start of yield formation, fraction
    pub hi_ini: CropField<f64>,
    /// Possible increase of harvest index above the reference, percent
    pub dhi0: CropField<f64>,

    // Root water extraction quantiles
    /// Maximum extraction at the top of the root zone, m3/m3/day
    pub sx_top_q: CropField<f64>,
    /// Maximum extraction at the bottom of the root zone, m3/m3/day
    pub sx_bot_q: CropField<f64>,

    // CO2 response
    /// Water productivity, g/m2
    pub wp: CropField<f64>,
    /// Crop sink strength coefficient
    pub fsink: CropField<f64>,
    /// CO2 response coefficient, steady state
    pub bsted: CropField<f64>,
    /// CO2 response coefficient, FACE experiments
    pub bface: CropField<f64>,
}
