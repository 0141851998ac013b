//! Date range and day iteration.

use chrono::{NaiveDate, TimeDelta};

use crate::DateRangeError;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns an iterator over every date in the range, in order.
    #[must_use]
    pub const fn days(&self) -> DayIterator {
        DayIterator {
            current: Some(self.start),
            end: self.end,
        }
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DayIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Iterator over all days in a date range.
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.current.filter(|day| *day <= self.end)?;
        // None once the calendar runs out, which also ends iteration.
        self.current = day.checked_add_signed(TimeDelta::days(1));
        Some(day)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current {
            Some(current) if current <= self.end => {
                let days = (self.end - current).num_days() as usize + 1;
                (days, Some(days))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DayIterator {}

impl std::iter::FusedIterator for DayIterator {}
