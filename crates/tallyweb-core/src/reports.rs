//! Report structures for API responses

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use super::models::Transaction;
use super::types::TransactionKind;

/// Income and expense totals for one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl PeriodTotals {
    /// Add one record to the matching side
    pub fn record(&mut self, tx: &Transaction) {
        match tx.kind {
            TransactionKind::Income => self.income += tx.amount,
            TransactionKind::Expense => self.expense += tx.amount,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    /// Total for one side
    pub fn of_kind(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
        }
    }
}

/// Totals for an interval plus the records that produced them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub matched: Vec<Transaction>,
}

impl PeriodSummary {
    pub fn totals(&self) -> PeriodTotals {
        PeriodTotals {
            income: self.income,
            expense: self.expense,
        }
    }
}

/// Month summary as returned by `/api/transactions/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodReport {
    pub month: u32,
    pub year: i32,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
}

/// One labelled point of a trailing monthly trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: u32,
    pub year: i32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// All-time totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerOverview {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Per-category totals in order of first appearance
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRollup {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryRollup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, creating the group on first sight
    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&pos) => self.entries[pos].amount += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                });
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.index.get(category).map(|&pos| self.entries[pos].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

impl Serialize for CategoryRollup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.amount)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollup_keeps_first_seen_order() {
        let mut rollup = CategoryRollup::new();
        rollup.add("rent", Decimal::from(500));
        rollup.add("food", Decimal::from(20));
        rollup.add("rent", Decimal::from(5));
        rollup.add("", Decimal::from(1));

        let order: Vec<&str> = rollup.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(order, vec!["rent", "food", ""]);
        assert_eq!(rollup.get("rent"), Some(Decimal::from(505)));
        assert_eq!(rollup.get("Rent"), None);
        assert_eq!(rollup.total(), Decimal::from(526));
        assert_eq!(rollup.len(), 3);
    }

    #[test]
    fn test_rollup_serializes_as_ordered_object() {
        let mut rollup = CategoryRollup::new();
        rollup.add("zoo", Decimal::from(3));
        rollup.add("apples", Decimal::from(2));

        let json = serde_json::to_string(&rollup).unwrap();
        assert_eq!(json, r#"{"zoo":"3","apples":"2"}"#);
        assert_eq!(serde_json::to_string(&CategoryRollup::new()).unwrap(), "{}");
    }

    #[test]
    fn test_period_totals_balance() {
        let totals = PeriodTotals {
            income: "100.10".parse().unwrap(),
            expense: "40.05".parse().unwrap(),
        };
        assert_eq!(totals.balance(), "60.05".parse::<Decimal>().unwrap());
        assert_eq!(totals.of_kind(TransactionKind::Expense), totals.expense);
    }
}
