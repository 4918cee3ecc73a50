//! Simulation orchestration: configuration, mutable season state and
//! the top-level daily driver.

pub mod model;
pub mod state;

pub use model::{CropConfig, CropSimulation};
pub use state::{SeasonState, SimulationStats};
