//! Daily temperature providers
//!
//! The thermal-time engine consumes daily minimum and maximum temperature
//! series addressable by date. Providers return one value per grid cell;
//! the core broadcasts those across farms and crops itself.

use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;

use crate::error::{CropError, CropResult};

/// Source of daily min/max temperature series
pub trait WeatherSeries {
    /// Daily minimum temperature per grid cell, degrees C
    fn tmin(&self, date: NaiveDate) -> CropResult<Vec<f64>>;

    /// Daily maximum temperature per grid cell, degrees C
    fn tmax(&self, date: NaiveDate) -> CropResult<Vec<f64>>;
}

/// Synthetic weather with a sinusoidal annual temperature cycle
///
/// Useful for demos and tests; every grid cell sees the same series.
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    cells: usize,
    mean_tmin: f64,
    mean_tmax: f64,
    /// Peak-to-mean amplitude of the annual cycle, degrees C
    amplitude: f64,
}

impl SyntheticWeather {
    /// Create a seasonal series oscillating around the given means
    #[must_use]
    pub const fn new(cells: usize, mean_tmin: f64, mean_tmax: f64, amplitude: f64) -> Self {
        Self {
            cells,
            mean_tmin,
            mean_tmax,
            amplitude,
        }
    }

    /// Create a constant series (no annual cycle)
    #[must_use]
    pub const fn constant(cells: usize, tmin: f64, tmax: f64) -> Self {
        Self::new(cells, tmin, tmax, 0.0)
    }

    fn seasonal_offset(&self, date: NaiveDate) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        // Northern-hemisphere cycle peaking around mid July (day 196)
        let doy = f64::from(date.ordinal());
        self.amplitude * (std::f64::consts::TAU * (doy - 105.0) / 365.0).sin()
    }
}

impl WeatherSeries for SyntheticWeather {
    fn tmin(&self, date: NaiveDate) -> CropResult<Vec<f64>> {
        Ok(vec![self.mean_tmin + self.seasonal_offset(date); self.cells])
    }

    fn tmax(&self, date: NaiveDate) -> CropResult<Vec<f64>> {
        Ok(vec![self.mean_tmax + self.seasonal_offset(date); self.cells])
    }
}

/// Weather series backed by pre-loaded daily records
///
/// Missing dates surface as [`CropError::WeatherUnavailable`] rather than
/// a silent default.
#[derive(Debug, Clone, Default)]
pub struct RecordedWeather {
    records: FxHashMap<NaiveDate, (Vec<f64>, Vec<f64>)>,
}

impl RecordedWeather {
    /// Create an empty record set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert per-cell min/max temperatures for one date
    pub fn insert(&mut self, date: NaiveDate, tmin: Vec<f64>, tmax: Vec<f64>) {
        self.records.insert(date, (tmin, tmax));
    }
}

impl WeatherSeries for RecordedWeather {
    fn tmin(&self, date: NaiveDate) -> CropResult<Vec<f64>> {
        self.records
            .get(&date)
            .map(|(tmin, _)| tmin.clone())
            .ok_or(CropError::WeatherUnavailable { date })
    }

    fn tmax(&self, date: NaiveDate) -> CropResult<Vec<f64>> {
        self.records
            .get(&date)
            .map(|(_, tmax)| tmax.clone())
            .ok_or(CropError::WeatherUnavailable { date })
    }
}
