use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::UnavailableDateIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DateRangeError {
    #[error("End date cannot be before start date")]
    InvalidOrder,
    #[error("Please select valid dates")]
    NoValidDays,
    #[error("Selected date range contains unavailable dates. Please choose different dates.")]
    ContainsUnavailableDay,
}

/// How a range problem is presented: a hard error or a "pick other days" warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl DateRangeError {
    pub fn severity(&self) -> Severity {
        match self {
            DateRangeError::InvalidOrder | DateRangeError::NoValidDays => Severity::Error,
            DateRangeError::ContainsUnavailableDay => Severity::Warning,
        }
    }
}

/// Validates a complete selection and returns its inclusive day count.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    unavailable: &UnavailableDateIndex,
) -> Result<u32, DateRangeError> {
    if end < start {
        return Err(DateRangeError::InvalidOrder);
    }

    let days = end.signed_duration_since(start).num_days() + 1;
    if days <= 0 {
        return Err(DateRangeError::NoValidDays);
    }

    if unavailable.any_in_range(start, end) {
        return Err(DateRangeError::ContainsUnavailableDay);
    }

    u32::try_from(days).map_err(|_| DateRangeError::NoValidDays)
}

/// Picker-level guard: past days and blocked days can't be clicked at all.
pub fn is_day_disabled(day: NaiveDate, today: NaiveDate, unavailable: &UnavailableDateIndex) -> bool {
    day < today || unavailable.contains(day)
}

/// The customer's date choice. `from` without `to` means a pick is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Applies one calendar click.
    pub fn select_day(&mut self, day: NaiveDate) {
        match (self.from, self.to) {
            (Some(from), None) if day >= from => self.to = Some(day),
            _ => {
                self.from = Some(day);
                self.to = None;
            }
        }
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }

    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `day` should render highlighted in the picker.
    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= day && day <= to,
            (Some(from), None) => from == day,
            _ => false,
        }
    }
}
