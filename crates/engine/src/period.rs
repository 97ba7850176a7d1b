//! Reporting period resolution.
//!
//! A [`ReportPeriod`] is a closed calendar-month interval. It is derived on
//! demand and never persisted.

use chrono::{Datelike, NaiveDate};

use crate::{EngineError, ResultEngine};

/// A closed `[start, end]` date interval covering one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Resolves a reporting period from optional month/year inputs.
    ///
    /// When either input is missing, both fall back to `today`'s month and
    /// year. A month outside `1..=12` is rejected with
    /// [`EngineError::InvalidPeriod`].
    pub fn resolve(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> ResultEngine<Self> {
        let (month, year) = match (month, year) {
            (Some(month), Some(year)) => (month, year),
            _ => (today.month(), today.year()),
        };

        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| EngineError::InvalidPeriod(format!("year {year} out of range")))?;

        // Last day of the month: the day before the first day of the
        // following month. Never a hardcoded day count, so leap years come
        // out right.
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .ok_or_else(|| EngineError::InvalidPeriod(format!("year {year} out of range")))?;

        Ok(Self { start, end })
    }

    /// Whether a date falls inside the period, boundaries included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
