use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DATE_FORMAT;

/// A closed booking block; both ends are inclusive.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct UnavailableDateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl UnavailableDateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Every day from `from` through `to`. Empty when the range is reversed.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_between(self.from, self.to)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDatesResponse {
    #[serde(default)]
    pub unavailable_dates: Vec<UnavailableDateRange>,
}

pub fn day_token(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

pub(crate) fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Per-day lookup over the hall's unavailable ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableDateIndex {
    days: HashSet<String>,
}

impl UnavailableDateIndex {
    pub fn from_ranges(ranges: &[UnavailableDateRange]) -> Self {
        let days = ranges
            .iter()
            .flat_map(UnavailableDateRange::days)
            .map(day_token)
            .collect();

        Self { days }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day_token(day))
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.days.contains(token)
    }

    /// True if any day of `[start, end]` is blocked.
    pub fn any_in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        if self.days.is_empty() {
            return false;
        }
        days_between(start, end).any(|day| self.contains(day))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<&UnavailableDatesResponse> for UnavailableDateIndex {
    fn from(response: &UnavailableDatesResponse) -> Self {
        Self::from_ranges(&response.unavailable_dates)
    }
}
