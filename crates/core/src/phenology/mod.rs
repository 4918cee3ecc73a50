//! Derived agronomic parameters
//!
//! Pure, vectorized derivations over the (farm, crop, cell) domain:
//! canopy development milestones, harvest index growth curve, root
//! extraction shape, thermal time and the CO2 productivity adjustment.
//! The [`Phenology`] struct holds the working stage tensors; its stage
//! values start as calendar-day copies of the crop traits and are
//! rewritten in GDD units when the calendar converts to thermal time.

pub mod canopy;
pub mod co2;
pub mod harvest_index;
pub mod root_extraction;
pub mod thermal;

pub use thermal::{daily_gdd, daily_mean, season_window, ThermalTimeTable};

use crate::core_types::{CropField, CropTraits, FieldShape};

/// Working stage tensors and derived curve parameters
///
/// Stage boundary fields carry calendar days under
/// [`crate::core_types::CalendarMode::CalendarDays`] and cumulative GDD
/// under thermal time. The `_cd` fields always carry calendar-day
/// counts; in thermal-time mode they are re-derived at the start of each
/// growing season and are only valid for cells whose season has started
/// at least once.
#[derive(Debug, Clone)]
pub struct Phenology {
    /// Initial canopy cover at 90% emergence, fraction
    pub cc0: CropField<f64>,

    // Stage boundaries in active calendar units
    /// Time from sowing to emergence
    pub emergence: CropField<f64>,
    /// Time from sowing to maximum rooting depth
    pub max_rooting: CropField<f64>,
    /// Time from sowing to canopy senescence
    pub senescence: CropField<f64>,
    /// Time from sowing to maturity
    pub maturity: CropField<f64>,
    /// Time from sowing to the start of yield formation
    pub hi_start: CropField<f64>,
    /// Duration of flowering
    pub flowering: CropField<f64>,
    /// Duration of yield formation
    pub yld_form: CropField<f64>,
    /// Canopy growth coefficient in active calendar units
    pub cgc: CropField<f64>,
    /// Canopy decline coefficient in active calendar units
    pub cdc: CropField<f64>,

    // Derived milestones in active calendar units
    /// End of vegetative canopy development
    pub canopy_dev_end: CropField<f64>,
    /// Time to 10% canopy cover
    pub canopy_10pct: CropField<f64>,
    /// Time to maximum canopy cover
    pub max_canopy: CropField<f64>,
    /// End of yield formation
    pub hi_end: CropField<f64>,
    /// End of flowering (fruit/grain crops)
    pub flowering_end: CropField<f64>,

    // Calendar-day counterparts
    /// Time to maximum canopy cover, days
    pub max_canopy_cd: CropField<i32>,
    /// End of vegetative development, days
    pub canopy_dev_end_cd: CropField<i32>,
    /// Start of yield formation, days
    pub hi_start_cd: CropField<i32>,
    /// End of yield formation, days
    pub hi_end_cd: CropField<i32>,
    /// Duration of yield formation, days
    pub yld_form_cd: CropField<i32>,
    /// Duration of flowering, days (fruit/grain crops)
    pub flowering_cd: CropField<i32>,

    // Root water extraction
    /// Maximum extraction at the top of the root zone
    pub sx_top: CropField<f64>,
    /// Maximum extraction at the bottom of the root zone
    pub sx_bot: CropField<f64>,

    // Harvest index growth curve
    /// Harvest index growth coefficient
    pub higc: CropField<f64>,
    /// Day of yield formation where the linear segment takes over
    pub t_lin_switch: CropField<i32>,
    /// Slope of the linear harvest index segment, per day
    pub d_hi_linear: CropField<f64>,
}

impl Phenology {
    /// Allocate all tensors and seed the working stage fields from the
    /// raw calendar-day traits
    #[must_use]
    pub fn from_traits(shape: FieldShape, traits: &CropTraits) -> Self {
        Self {
            cc0: CropField::zeros(shape),
            emergence: traits.emergence.clone(),
            max_rooting: traits.max_rooting.clone(),
            senescence: traits.senescence.clone(),
            maturity: traits.maturity.clone(),
            hi_start: traits.hi_start.clone(),
            flowering: traits.flowering.clone(),
            yld_form: traits.yld_form.clone(),
            cgc: traits.cgc.clone(),
            cdc: traits.cdc.clone(),
            canopy_dev_end: CropField::zeros(shape),
            canopy_10pct: CropField::zeros(shape),
            max_canopy: CropField::zeros(shape),
            hi_end: CropField::zeros(shape),
            flowering_end: CropField::zeros(shape),
            max_canopy_cd: CropField::<i32>::zeros(shape),
            canopy_dev_end_cd: CropField::<i32>::zeros(shape),
            hi_start_cd: CropField::<i32>::zeros(shape),
            hi_end_cd: CropField::<i32>::zeros(shape),
            yld_form_cd: CropField::<i32>::zeros(shape),
            flowering_cd: CropField::<i32>::zeros(shape),
            sx_top: CropField::zeros(shape),
            sx_bot: CropField::zeros(shape),
            higc: CropField::zeros(shape),
            t_lin_switch: CropField::<i32>::zeros(shape),
            d_hi_linear: CropField::zeros(shape),
        }
    }
}
