//! Simulation clock
//!
//! Exposes the simulated date, day-of-year, 1-based timestep index and
//! leap-year status, plus absolute day numbers used to resolve
//! year-boundary wraparound. The driver owns the clock and advances it one
//! day at a time.

use chrono::{Datelike, Days, NaiveDate};

/// Day-resolution simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    start: NaiveDate,
    end: NaiveDate,
    current: NaiveDate,
    timestep: i64,
}

impl SimClock {
    /// Create a clock covering `start..=end`, positioned on `start`
    ///
    /// # Panics
    ///
    /// Panics if `end` precedes `start`
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        assert!(end >= start, "simulation end precedes start");
        Self {
            start,
            end,
            current: start,
            timestep: 1,
        }
    }

    /// Current simulated date
    #[must_use]
    pub const fn current_date(&self) -> NaiveDate {
        self.current
    }

    /// Last simulated date
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Day of year of the current date (1-based, 1..=366)
    #[must_use]
    pub fn doy(&self) -> i32 {
        self.current.ordinal() as i32
    }

    /// 1-based timestep index
    #[must_use]
    pub const fn timestep(&self) -> i64 {
        self.timestep
    }

    /// Whether the current simulation year is a leap year
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.current.leap_year()
    }

    /// Number of days in the current simulation year
    #[must_use]
    pub fn days_in_year(&self) -> i32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Monotonic absolute day number of the current date
    #[must_use]
    pub fn absolute_day(&self) -> i64 {
        i64::from(self.current.num_days_from_ce())
    }

    /// Absolute day number of 1 January of the current year
    #[must_use]
    pub fn year_start_day(&self) -> i64 {
        let jan1 = NaiveDate::from_ymd_opt(self.current.year(), 1, 1)
            .unwrap_or(self.current);
        i64::from(jan1.num_days_from_ce())
    }

    /// Absolute day number of the simulation end date
    #[must_use]
    pub fn end_day(&self) -> i64 {
        i64::from(self.end.num_days_from_ce())
    }

    /// Whether the clock has passed the simulation end
    #[must_use]
    pub fn finished(&self) -> bool {
        self.current > self.end
    }

    /// Advance one day; returns false once the end date has been passed
    pub fn advance(&mut self) -> bool {
        if let Some(next) = self.current.checked_add_days(Days::new(1)) {
            self.current = next;
            self.timestep += 1;
        }
        !self.finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_doy_and_timestep() {
        let mut clock = SimClock::new(date(2023, 1, 1), date(2023, 12, 31));
        assert_eq!(clock.doy(), 1);
        assert_eq!(clock.timestep(), 1);
        assert!(clock.advance());
        assert_eq!(clock.doy(), 2);
        assert_eq!(clock.timestep(), 2);
    }

    #[test]
    fn test_leap_year_detection() {
        let clock = SimClock::new(date(2024, 6, 1), date(2024, 12, 31));
        assert!(clock.is_leap_year());
        assert_eq!(clock.days_in_year(), 366);

        let clock = SimClock::new(date(2023, 6, 1), date(2023, 12, 31));
        assert!(!clock.is_leap_year());
        assert_eq!(clock.days_in_year(), 365);
    }

    #[test]
    fn test_absolute_days_cross_year_boundary() {
        let mut clock = SimClock::new(date(2023, 12, 31), date(2024, 1, 2));
        let before = clock.absolute_day();
        assert!(clock.advance());
        assert_eq!(clock.absolute_day(), before + 1);
        assert_eq!(clock.doy(), 1);
        assert_eq!(clock.year_start_day(), clock.absolute_day());
    }

    #[test]
    fn test_finishes_after_end() {
        let mut clock = SimClock::new(date(2023, 1, 1), date(2023, 1, 2));
        assert!(clock.advance());
        assert!(!clock.advance());
        assert!(clock.finished());
    }
}
