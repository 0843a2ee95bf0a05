//! Aggregation engine
//!
//! Pure functions over a snapshot of transactions. Nothing here performs I/O
//! or mutates its input, so every function is safe to call from any number
//! of request handlers at once.
//!
//! Amounts are summed as [`Decimal`](rust_decimal::Decimal), which is exact
//! base-10 fixed point, so `balance == income - expense` holds to the cent.

use crate::models::Transaction;
use crate::reports::{CategoryRollup, PeriodSummary, PeriodTotals};
use crate::time::{DateRange, Interval};
use crate::types::TransactionKind;

/// Records whose date falls in the half-open interval
pub fn select<'a>(
    records: &'a [Transaction],
    interval: &'a Interval,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    records
        .iter()
        .filter(move |tx| interval.contains(tx.occurred_at))
}

/// Income/expense totals of the given records
pub fn totals<'a, I>(records: I) -> PeriodTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records.into_iter().fold(PeriodTotals::default(), |mut acc, tx| {
        acc.record(tx);
        acc
    })
}

/// Totals and matched records for one interval
pub fn summarize(records: &[Transaction], interval: &Interval) -> PeriodSummary {
    let matched: Vec<Transaction> = select(records, interval).cloned().collect();
    let totals = totals(&matched);

    PeriodSummary {
        income: totals.income,
        expense: totals.expense,
        balance: totals.balance(),
        matched,
    }
}

/// Per-category totals of one kind within an interval
///
/// Categories are compared byte for byte; `"Food"`, `"food"` and `""` are
/// three separate groups.
pub fn category_rollup(
    records: &[Transaction],
    interval: &Interval,
    kind: TransactionKind,
) -> CategoryRollup {
    select(records, interval)
        .filter(|tx| tx.kind == kind)
        .fold(CategoryRollup::new(), |mut rollup, tx| {
            rollup.add(&tx.category, tx.amount);
            rollup
        })
}

/// Totals for each interval, in the order given
///
/// Lazy: each bucket is computed when the iterator reaches it. Buckets are
/// independent, so overlapping or unordered intervals are allowed.
pub fn series<'a, I>(records: &'a [Transaction], intervals: I) -> impl Iterator<Item = PeriodTotals> + 'a
where
    I: IntoIterator<Item = Interval>,
    I::IntoIter: 'a,
{
    intervals
        .into_iter()
        .map(move |interval| totals(records.iter().filter(|tx| interval.contains(tx.occurred_at))))
}

/// Records with exactly this category
pub fn filter_by_category(records: &[Transaction], category: &str) -> Vec<Transaction> {
    records
        .iter()
        .filter(|tx| tx.category == category)
        .cloned()
        .collect()
}

/// Records dated within the inclusive range, oldest first
///
/// Records sharing a date keep their input order.
pub fn filter_by_date_range(records: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    let mut matched: Vec<Transaction> = records
        .iter()
        .filter(|tx| range.contains(tx.occurred_at))
        .cloned()
        .collect();
    matched.sort_by_key(|tx| tx.occurred_at);
    matched
}

/// Records of one kind
pub fn filter_by_kind(records: &[Transaction], kind: TransactionKind) -> Vec<Transaction> {
    records
        .iter()
        .filter(|tx| tx.kind == kind)
        .cloned()
        .collect()
}

// ==================== Tests ====================
