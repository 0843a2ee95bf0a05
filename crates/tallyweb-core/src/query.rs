//! Report queries over the transaction store
//!
//! [`Ledger`] turns raw request parameters into a store fetch followed by a
//! pure aggregation. Parameters arrive as optional strings so that "absent"
//! and "malformed" can be told apart and reported precisely.

use chrono::NaiveDate;
use tallyweb_config::ReportsConfig;

use crate::aggregate;
use crate::error::{CoreError, CoreResult};
use crate::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::reports::{CategoryRollup, LedgerOverview, MonthlyPoint, PeriodReport, PeriodTotals};
use crate::store::StoreRef;
use crate::time::{DateRange, Interval, Period};
use crate::types::TransactionKind;

/// Treat empty query values like absent ones
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a month/year pair into a validated period
pub fn parse_period(month: Option<&str>, year: Option<&str>) -> CoreResult<Period> {
    let month = present(month).ok_or_else(|| CoreError::invalid_period("month is required"))?;
    let year = present(year).ok_or_else(|| CoreError::invalid_period("year is required"))?;

    let month: u32 = month
        .parse()
        .map_err(|_| CoreError::invalid_period(format!("month '{}' is not a number", month)))?;
    let year: i32 = year
        .parse()
        .map_err(|_| CoreError::invalid_period(format!("year '{}' is not a number", year)))?;

    Period::new(month, year)
}

/// Parse a year on its own
pub fn parse_year(year: Option<&str>) -> CoreResult<i32> {
    let year = present(year).ok_or_else(|| CoreError::invalid_period("year is required"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| CoreError::invalid_period(format!("year '{}' is not a number", year)))?;
    if year <= 0 {
        return Err(CoreError::invalid_period(format!(
            "year must be positive, got {}",
            year
        )));
    }
    Ok(year)
}

/// Parse a required date parameter
pub fn parse_date_param(name: &str, value: Option<&str>) -> CoreResult<NaiveDate> {
    let value = present(value).ok_or_else(|| CoreError::missing(name))?;
    tallyweb_utils::parse_date(value).ok_or_else(|| CoreError::InvalidFormat {
        name: name.to_string(),
        message: format!("'{}' is not a date (expected YYYY-MM-DD)", value),
    })
}

/// Parse an optional kind filter
pub fn parse_kind(value: Option<&str>) -> CoreResult<Option<TransactionKind>> {
    match present(value) {
        None | Some("all") => Ok(None),
        Some(kind) => kind
            .parse::<TransactionKind>()
            .map(Some)
            .map_err(|message| CoreError::InvalidFormat {
                name: "kind".to_string(),
                message,
            }),
    }
}

/// Query surface over a transaction store
pub struct Ledger {
    store: StoreRef,
    reports: ReportsConfig,
}

impl Ledger {
    pub fn new(store: StoreRef, reports: ReportsConfig) -> Self {
        Self { store, reports }
    }

    /// Records inside a half-open interval, fetched by inclusive date scan
    async fn fetch(&self, interval: &Interval) -> CoreResult<Vec<Transaction>> {
        match interval.last_day() {
            Some(last) => self.store.between(interval.start(), last).await,
            None => Ok(Vec::new()),
        }
    }

    // ==================== Records ====================

    /// All records, newest first, optionally restricted to one kind
    pub async fn list(&self, kind: Option<&str>) -> CoreResult<Vec<Transaction>> {
        let kind = parse_kind(kind)?;
        let records = self.store.all().await?;
        let mut records = match kind {
            Some(kind) => aggregate::filter_by_kind(&records, kind),
            None => records,
        };
        records.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> CoreResult<Transaction> {
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewTransaction) -> CoreResult<Transaction> {
        self.store.create(new).await
    }

    pub async fn update(&self, id: &str, update: TransactionUpdate) -> CoreResult<Transaction> {
        self.store.update(id, update).await
    }

    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        self.store.delete(id).await
    }

    // ==================== Reports ====================

    /// Income, expense, balance and records for one month
    pub async fn period_summary(
        &self,
        month: Option<&str>,
        year: Option<&str>,
    ) -> CoreResult<PeriodReport> {
        let period = parse_period(month, year)?;
        let interval = period.interval();
        let records = self.fetch(&interval).await?;
        let summary = aggregate::summarize(&records, &interval);

        log::debug!(
            "Summary {}: {} matched, balance {}",
            period,
            summary.matched.len(),
            summary.balance
        );

        Ok(PeriodReport {
            month: period.month(),
            year: period.year(),
            income: summary.income,
            expense: summary.expense,
            balance: summary.balance,
            transactions: summary.matched,
        })
    }

    /// Expense totals per category for one month
    pub async fn category_totals(
        &self,
        month: Option<&str>,
        year: Option<&str>,
    ) -> CoreResult<CategoryRollup> {
        let period = parse_period(month, year)?;
        let interval = period.interval();
        let records = self.fetch(&interval).await?;
        Ok(aggregate::category_rollup(
            &records,
            &interval,
            TransactionKind::Expense,
        ))
    }

    /// Records with exactly this category
    pub async fn by_category(&self, category: Option<&str>) -> CoreResult<Vec<Transaction>> {
        // An empty category is a real group, so only absence is an error.
        let category = category.ok_or_else(|| CoreError::missing("category"))?;
        let records = self.store.all().await?;
        Ok(aggregate::filter_by_category(&records, category))
    }

    /// Records dated within `[start, end]`, oldest first
    pub async fn by_date_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> CoreResult<Vec<Transaction>> {
        let start = parse_date_param("start", start)?;
        let end = parse_date_param("end", end)?;
        let range = DateRange::new(start, end)?;

        let records = self.store.between(range.start(), range.end()).await?;
        log::debug!("Date range {}: {} records", range, records.len());
        Ok(aggregate::filter_by_date_range(&records, &range))
    }

    /// Twelve monthly totals for a year, January first
    pub async fn monthly_series(&self, year: Option<&str>) -> CoreResult<Vec<PeriodTotals>> {
        let year = parse_year(year)?;
        let periods = Period::months_of_year(year)?;
        self.series_for(&periods).await
    }

    /// Monthly totals for the `months` months ending at the anchor month
    ///
    /// The anchor defaults to the month containing `today`; the window
    /// defaults to the configured trailing length.
    pub async fn trailing_series(
        &self,
        months: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
        today: NaiveDate,
    ) -> CoreResult<Vec<MonthlyPoint>> {
        let count = match present(months) {
            None => self.reports.trailing_months,
            Some(raw) => raw.parse::<u32>().map_err(|_| CoreError::InvalidFormat {
                name: "months".to_string(),
                message: format!("'{}' is not a whole number", raw),
            })?,
        };
        if count == 0 || count > self.reports.max_trailing_months {
            return Err(CoreError::InvalidFormat {
                name: "months".to_string(),
                message: format!(
                    "must be between 1 and {}",
                    self.reports.max_trailing_months
                ),
            });
        }

        let anchor = match (present(month), present(year)) {
            (None, None) => Period::containing(today)?,
            _ => parse_period(month, year)?,
        };
        let periods = Period::trailing(anchor, count)?;
        let totals = self.series_for(&periods).await?;

        Ok(periods
            .iter()
            .zip(totals)
            .map(|(period, totals)| MonthlyPoint {
                month: period.month(),
                year: period.year(),
                income: totals.income,
                expense: totals.expense,
            })
            .collect())
    }

    /// All-time totals
    pub async fn overview(&self) -> CoreResult<LedgerOverview> {
        let records = self.store.all().await?;
        let totals = aggregate::totals(&records);
        Ok(LedgerOverview {
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance(),
            transaction_count: records.len(),
        })
    }

    /// One fetch spanning consecutive periods, then one bucket per period
    async fn series_for(&self, periods: &[Period]) -> CoreResult<Vec<PeriodTotals>> {
        let (first, last) = match (periods.first(), periods.last()) {
            (Some(first), Some(last)) => (first.interval(), last.interval()),
            _ => return Ok(Vec::new()),
        };
        let span = Interval::new(first.start(), last.end())?;
        let records = self.fetch(&span).await?;

        Ok(aggregate::series(&records, periods.iter().map(|p| p.interval())).collect())
    }
}

// ==================== Tests ====================
