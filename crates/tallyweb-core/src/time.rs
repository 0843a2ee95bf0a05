//! Calendar periods and date intervals used for bucketing transactions
//!
//! Two interval shapes coexist on purpose:
//! - [`Interval`] is half-open `[start, end)` and backs every month bucket.
//! - [`DateRange`] is inclusive `[start, end]` and backs the date-range
//!   listing exposed to clients.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Half-open date interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    start: NaiveDate,
    end: NaiveDate,
}

impl Interval {
    /// Interval from explicit bounds; fails when `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Interval covering one calendar month
    pub fn for_month(month: u32, year: i32) -> CoreResult<Self> {
        Period::new(month, year).map(|p| p.interval())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `start <= date < end`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Last date inside the interval, if any
    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.is_empty() {
            None
        } else {
            self.end.pred_opt()
        }
    }
}

/// Inclusive date range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `start <= date <= end`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A calendar month identified by (month, year)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    month: u32,
    year: i32,
    interval: Interval,
}

impl Period {
    /// Validate a month/year pair
    ///
    /// Never clamps: a month outside 1..=12 or a non-positive year is an error.
    pub fn new(month: u32, year: i32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::invalid_period(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if year <= 0 {
            return Err(CoreError::invalid_period(format!(
                "year must be positive, got {}",
                year
            )));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1);
        // First day of the following month; December rolls into next year.
        let end = if month == 12 {
            year.checked_add(1)
                .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self {
                month,
                year,
                interval: Interval { start, end },
            }),
            _ => Err(CoreError::invalid_period(format!(
                "year {} is outside the supported calendar",
                year
            ))),
        }
    }

    /// The period a date falls in
    pub fn containing(date: NaiveDate) -> CoreResult<Self> {
        Self::new(date.month(), date.year())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// `[first of month, first of next month)`
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The following month
    pub fn succ(&self) -> CoreResult<Self> {
        if self.month == 12 {
            Self::new(1, self.year + 1)
        } else {
            Self::new(self.month + 1, self.year)
        }
    }

    /// The preceding month
    pub fn pred(&self) -> CoreResult<Self> {
        if self.month == 1 {
            Self::new(12, self.year - 1)
        } else {
            Self::new(self.month - 1, self.year)
        }
    }

    /// January through December of `year`
    pub fn months_of_year(year: i32) -> CoreResult<Vec<Self>> {
        (1..=12).map(|month| Self::new(month, year)).collect()
    }

    /// The `count` months ending at `anchor`, oldest first
    pub fn trailing(anchor: Period, count: u32) -> CoreResult<Vec<Self>> {
        let mut periods = Vec::with_capacity(count as usize);
        let mut current = anchor;
        for i in 0..count {
            periods.push(current);
            if i + 1 < count {
                current = current.pred()?;
            }
        }
        periods.reverse();
        Ok(periods)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
