//! Crop calendar: leap-year date adjustment, calendar-type conversion
//! and the growing-season tracker.

pub mod convert;
pub mod dates;
pub mod season;

pub use convert::{rederive_day_counts, snapshot_day_counts, switch_to_thermal};
pub use dates::{adjust_doy, adjust_planting_harvest};
pub use season::update_growing_season;
