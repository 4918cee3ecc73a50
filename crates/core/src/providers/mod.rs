//! External collaborators of the simulation core
//!
//! Traits for the data the core consumes but does not own: crop
//! parameters, the simulation clock, daily temperature series, lifecycle
//! flags and atmospheric CO2. Each comes with a simple in-memory
//! implementation for drivers and tests.

pub mod atmosphere;
pub mod clock;
pub mod lifecycle;
pub mod traits;
pub mod weather;

pub use atmosphere::{CarbonDioxide, FixedCo2, REFERENCE_CO2};
pub use clock::SimClock;
pub use lifecycle::{LifecycleSignals, StaticLifecycle};
pub use traits::{load_crop_traits, ParameterTable, TraitCatalog, TraitOverrides, TraitSource};
pub use weather::{RecordedWeather, SyntheticWeather, WeatherSeries};
