//! Thermal-time (growing degree day) engine
//!
//! Converts daily min/max temperature into growing degree days under one
//! of three clipping policies and accumulates them over the active
//! growing-season window of every (farm, crop, cell). The cumulative
//! curve doubles as a lookup table for the calendar converter: stage
//! thresholds expressed in GDD are resolved to the first day whose
//! cumulative total exceeds them.

use chrono::Days;

use crate::core_types::{CropField, FieldShape, GddMethod};
use crate::error::CropResult;
use crate::providers::{SimClock, WeatherSeries};

/// Daily mean temperature under a clipping policy, degrees C
#[must_use]
pub fn daily_mean(tmin: f64, tmax: f64, tbase: f64, tupp: f64, method: GddMethod) -> f64 {
    match method {
        GddMethod::ClipMean => {
            let tmean = (tmax + tmin) / 2.0;
            tmean.clamp(tbase, tupp)
        }
        GddMethod::ClipBoth => {
            let tmax = tmax.clamp(tbase, tupp);
            let tmin = tmin.clamp(tbase, tupp);
            (tmax + tmin) / 2.0
        }
        GddMethod::ClipAsymmetric => {
            let tmax = tmax.clamp(tbase, tupp);
            let tmin = tmin.min(tupp);
            let tmean = (tmax + tmin) / 2.0;
            tmean.max(tbase)
        }
    }
}

/// Daily growing degree days
#[must_use]
pub fn daily_gdd(tmin: f64, tmax: f64, tbase: f64, tupp: f64, method: GddMethod) -> f64 {
    (daily_mean(tmin, tmax, tbase, tupp, method) - tbase).max(0.0)
}

/// Season window in day-of-year terms relative to the planting-year origin
///
/// Harvest days that precede planting belong to the following calendar
/// year and are shifted by +365. Windows whose planting day already
/// passed the current day cannot be accumulated from today onward, so
/// both bounds collapse to zero (no window).
#[must_use]
pub fn season_window(
    planting_adj: &CropField<i32>,
    harvest_adj: &CropField<i32>,
    current_doy: i32,
) -> (CropField<i32>, CropField<i32>) {
    let shape = planting_adj.shape();
    let mut pd = planting_adj.clone();
    let mut hd = harvest_adj.clone();
    for index in 0..shape.len() {
        let p = pd.get(index);
        let mut h = hd.get(index);
        if h < p {
            h += 365;
        }
        if current_doy > p {
            pd.set(index, 0);
            hd.set(index, 0);
        } else {
            hd.set(index, h);
        }
    }
    (pd, hd)
}

/// Cumulative GDD per cell over the season window
///
/// Row 0 corresponds to the day-of-year the table was built on; one row
/// per elapsed day up to the latest harvest day in the window.
#[derive(Debug, Clone)]
pub struct ThermalTimeTable {
    shape: FieldShape,
    start_day: i32,
    days: usize,
    cum: Vec<f64>,
}

impl ThermalTimeTable {
    /// Accumulate GDD from the current simulated day to the latest
    /// harvest day of the window
    ///
    /// Daily GDD is masked to zero outside each cell's `pd..=hd` window.
    /// Temperature series are fetched per day from the weather provider;
    /// a missing record aborts the build.
    pub fn build(
        planting: &CropField<i32>,
        harvest: &CropField<i32>,
        tbase: &CropField<f64>,
        tupp: &CropField<f64>,
        method: GddMethod,
        clock: &SimClock,
        weather: &dyn WeatherSeries,
    ) -> CropResult<Self> {
        let shape = planting.shape();
        let start_day = clock.doy();
        let max_harvest = harvest.as_slice().iter().copied().max().unwrap_or(0);
        let days = if max_harvest >= start_day {
            (max_harvest - start_day + 1) as usize
        } else {
            0
        };

        let mut cum = vec![0.0; days * shape.len()];
        for offset in 0..days {
            let date = clock
                .current_date()
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or_else(|| clock.current_date());
            let tmin = weather.tmin(date)?;
            let tmax = weather.tmax(date)?;
            let day = start_day + offset as i32;
            for index in 0..shape.len() {
                let cell = shape.cell_of(index);
                let pd = planting.get(index);
                let hd = harvest.get(index);
                let in_window = pd > 0 && day >= pd && day <= hd;
                let gdd = if in_window {
                    daily_gdd(
                        tmin[cell],
                        tmax[cell],
                        tbase.get(index),
                        tupp.get(index),
                        method,
                    )
                } else {
                    0.0
                };
                let prev = if offset == 0 {
                    0.0
                } else {
                    cum[(offset - 1) * shape.len() + index]
                };
                cum[offset * shape.len() + index] = prev + gdd;
            }
        }

        Ok(Self {
            shape,
            start_day,
            days,
            cum,
        })
    }

    /// Day-of-year of the first table row
    #[must_use]
    pub const fn start_day(&self) -> i32 {
        self.start_day
    }

    /// Number of day rows in the table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.days
    }

    /// Whether the table holds no rows
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// Cumulative GDD for a cell on a day-of-year index
    ///
    /// Returns `None` when the day lies outside the tabulated window.
    #[must_use]
    pub fn value_on(&self, day: i32, index: usize) -> Option<f64> {
        let row = day - self.start_day;
        if row < 0 || row as usize >= self.days {
            return None;
        }
        Some(self.cum[row as usize * self.shape.len() + index])
    }

    /// First day-of-year whose cumulative GDD strictly exceeds `threshold`
    ///
    /// Returns `None` when no day in the window qualifies; the caller must
    /// surface that as a calendar inconsistency instead of substituting a
    /// sentinel.
    #[must_use]
    pub fn first_day_exceeding(&self, index: usize, threshold: f64) -> Option<i32> {
        for row in 0..self.days {
            if self.cum[row * self.shape.len() + index] > threshold {
                return Some(self.start_day + row as i32);
            }
        }
        None
    }
}
