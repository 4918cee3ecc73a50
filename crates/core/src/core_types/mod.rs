//! Core types and utilities

pub mod calendar;
pub mod field;
pub mod traits;

pub use calendar::{CalendarMode, GddMethod};
pub use field::{CropField, FieldShape};
pub use traits::CropTraits;
