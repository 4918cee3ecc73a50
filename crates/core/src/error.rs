//! Error taxonomy for the crop simulation core

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by initialization and per-step updates
///
/// Initialization errors (`TraitResolution`, `ShapeMismatch`) are fatal and
/// abort the run. `CalendarInconsistency` aborts the current step for the
/// affected cells; the remaining cells keep their freshly written values.
#[derive(Error, Debug)]
pub enum CropError {
    /// A required crop trait could not be resolved from any provider tier
    #[error("crop trait '{name}' could not be resolved from any source")]
    TraitResolution {
        /// Trait name as listed in the parameter catalog
        name: String,
    },
    /// A supplied trait vector is neither a scalar nor one value per crop
    #[error("trait '{name}' has {len} values; expected 1 or {crops} (one per crop)")]
    ShapeMismatch {
        /// Trait name as listed in the parameter catalog
        name: String,
        /// Number of values supplied
        len: usize,
        /// Number of crops in the simulation
        crops: usize,
    },
    /// A thermal-time stage lookup found no day inside the season window
    /// whose cumulative GDD exceeds the required threshold
    #[error("stage '{stage}' is never reached within the season window for {cells} cell(s)")]
    CalendarInconsistency {
        /// Stage boundary that could not be resolved
        stage: &'static str,
        /// Number of (farm, crop, cell) entries affected
        cells: usize,
    },
    /// The weather provider has no temperature record for a requested date
    #[error("no temperature record available for {date}")]
    WeatherUnavailable {
        /// Date of the missing record
        date: NaiveDate,
    },
}

/// Convenience type for `Result<T, CropError>`
pub type CropResult<T> = Result<T, CropError>;
