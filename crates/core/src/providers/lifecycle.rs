//! Crop lifecycle signals
//!
//! Crop death and maturity are decided by processes outside this core
//! (water stress, biomass accumulation). The tracker only reads the
//! flags.

use crate::core_types::{CropField, FieldShape};

/// Source of external crop death/maturity flags
pub trait LifecycleSignals {
    /// Cells whose crop has died this season
    fn crop_dead(&self) -> &CropField<bool>;

    /// Cells whose crop has reached physiological maturity
    fn crop_mature(&self) -> &CropField<bool>;
}

/// Flag holder mutated directly by the driver
#[derive(Debug, Clone)]
pub struct StaticLifecycle {
    dead: CropField<bool>,
    mature: CropField<bool>,
}

impl StaticLifecycle {
    /// Create with all flags cleared
    #[must_use]
    pub fn new(shape: FieldShape) -> Self {
        Self {
            dead: CropField::falses(shape),
            mature: CropField::falses(shape),
        }
    }

    /// Mutable access to the death flags
    pub fn dead_mut(&mut self) -> &mut CropField<bool> {
        &mut self.dead
    }

    /// Mutable access to the maturity flags
    pub fn mature_mut(&mut self) -> &mut CropField<bool> {
        &mut self.mature
    }
}

impl LifecycleSignals for StaticLifecycle {
    fn crop_dead(&self) -> &CropField<bool> {
        &self.dead
    }

    fn crop_mature(&self) -> &CropField<bool> {
        &self.mature
    }
}
