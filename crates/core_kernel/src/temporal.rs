//! Coverage period handling
//!
//! Policies are effective over a calendar-date window. The submission guard
//! in the claims domain checks that an incident date falls inside the
//! policy's coverage period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

/// A calendar-date window during which a policy provides coverage
///
/// Both ends are inclusive. An open-ended period (no end date) represents a
/// policy without a fixed expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// First covered date (inclusive)
    pub start: NaiveDate,
    /// Last covered date (inclusive), None means open-ended
    pub end: Option<NaiveDate>,
}

impl CoveragePeriod {
    /// Creates a new coverage period
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if start > end {
                return Err(TemporalError::InvalidPeriod { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an open-ended period starting from the given date
    pub fn from(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Creates a bounded period
    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        Self::new(start, Some(end))
    }

    /// Returns true if this period covers the given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |e| date <= e)
    }

    /// Returns true if this period overlaps with another
    pub fn overlaps(&self, other: &CoveragePeriod) -> bool {
        let self_end = self.end.unwrap_or(NaiveDate::MAX);
        let other_end = other.end.unwrap_or(NaiveDate::MAX);

        self.start <= other_end && other.start <= self_end
    }

    /// Returns true if this period is open-ended
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Closes the period at the given date
    pub fn close_at(&mut self, date: NaiveDate) -> Result<(), TemporalError> {
        if date < self.start {
            return Err(TemporalError::InvalidPeriod {
                start: self.start,
                end: date,
            });
        }
        self.end = Some(date);
        Ok(())
    }
}
