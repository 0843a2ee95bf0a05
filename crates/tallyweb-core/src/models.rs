//! Core data models for the ledger

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::{CoreError, CoreResult};
use super::types::TransactionKind;

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier, fixed at creation
    pub id: String,
    /// Income or expense
    pub kind: TransactionKind,
    /// Non-negative amount in the ledger's single currency
    pub amount: Decimal,
    /// Free-form category label (e.g., "food", "salary")
    pub category: String,
    /// Economic date of the transaction
    pub occurred_at: NaiveDate,
    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the record was created
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a stored record from user input
    ///
    /// `today` fills in `occurred_at` when the input leaves it out.
    pub fn from_new(
        new: NewTransaction,
        id: String,
        recorded_at: DateTime<Utc>,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        validate_amount(new.amount)?;
        Ok(Self {
            id,
            kind: new.kind,
            amount: new.amount,
            category: new.category,
            occurred_at: new.occurred_at.unwrap_or(today),
            description: new.description,
            recorded_at,
        })
    }

    /// Apply a partial edit in place
    ///
    /// The record is left untouched when the edit is rejected.
    pub fn apply(&mut self, update: TransactionUpdate) -> CoreResult<()> {
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(occurred_at) = update.occurred_at {
            self.occurred_at = occurred_at;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Largest accepted amount (one trillion)
///
/// Keeps every sum the engine computes far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

pub(crate) fn validate_amount(amount: Decimal) -> CoreResult<()> {
    if amount < Decimal::ZERO {
        return Err(CoreError::ValidationError {
            message: format!("amount must be non-negative, got {}", amount),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::ValidationError {
            message: format!("amount must not exceed {}, got {}", MAX_AMOUNT, amount),
        });
    }
    Ok(())
}

/// Input for creating a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub occurred_at: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial edit of a transaction; absent fields stay unchanged
///
/// `description: null` clears the note; omitting it keeps the note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
}

/// `Some(None)` for an explicit null; a missing field falls back to `None`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn new_expense(amount: Decimal) -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Expense,
            amount,
            category: "food".to_string(),
            occurred_at: NaiveDate::from_ymd_opt(2025, 3, 5),
            description: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_from_new() {
        let tx = Transaction::from_new(new_expense(dec("12.50")), "t1".to_string(), Utc::now(), today())
            .unwrap();
        assert_eq!(tx.id, "t1");
        assert!(tx.is_expense());
        assert!(!tx.is_income());
        assert_eq!(tx.amount, dec("12.50"));
        assert_eq!(tx.occurred_at, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    }

    #[test]
    fn test_from_new_defaults_date_to_today() {
        let mut new = new_expense(dec("1"));
        new.occurred_at = None;
        let tx = Transaction::from_new(new, "t1".to_string(), Utc::now(), today()).unwrap();
        assert_eq!(tx.occurred_at, today());
    }

    #[test]
    fn test_from_new_rejects_negative_amount() {
        let err = Transaction::from_new(new_expense(dec("-0.01")), "t1".to_string(), Utc::now(), today())
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { .. }));
    }

    #[test]
    fn test_max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000i64));
    }

    #[test]
    fn test_amount_upper_bound() {
        assert!(Transaction::from_new(new_expense(MAX_AMOUNT), "t1".to_string(), Utc::now(), today()).is_ok());

        for amount in [MAX_AMOUNT + dec("0.01"), Decimal::MAX] {
            let err = Transaction::from_new(new_expense(amount), "t1".to_string(), Utc::now(), today())
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError { .. }));
        }

        let mut tx = Transaction::from_new(new_expense(dec("10")), "t1".to_string(), Utc::now(), today())
            .unwrap();
        let before = tx.clone();
        let result = tx.apply(TransactionUpdate {
            amount: Some(Decimal::MAX),
            ..Default::default()
        });
        assert!(matches!(result, Err(CoreError::ValidationError { .. })));
        assert_eq!(tx, before);
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(Transaction::from_new(new_expense(Decimal::ZERO), "t1".to_string(), Utc::now(), today()).is_ok());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut tx = Transaction::from_new(new_expense(dec("10")), "t1".to_string(), Utc::now(), today())
            .unwrap();
        tx.apply(TransactionUpdate {
            category: Some("rent".to_string()),
            description: Some(Some("March".to_string())),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(tx.id, "t1");
        assert_eq!(tx.category, "rent");
        assert_eq!(tx.amount, dec("10"));
        assert_eq!(tx.description.as_deref(), Some("March"));
    }

    #[test]
    fn test_update_description_null_clears_absent_keeps() {
        let mut new = new_expense(dec("10"));
        new.description = Some("lunch".to_string());
        let mut tx = Transaction::from_new(new, "t1".to_string(), Utc::now(), today()).unwrap();

        let keep: TransactionUpdate = serde_json::from_str(r#"{"category": "rent"}"#).unwrap();
        assert_eq!(keep.description, None);
        tx.apply(keep).unwrap();
        assert_eq!(tx.description.as_deref(), Some("lunch"));

        let clear: TransactionUpdate = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(clear.description, Some(None));
        tx.apply(clear).unwrap();
        assert_eq!(tx.description, None);
    }

    #[test]
    fn test_apply_rejected_update_leaves_record_unchanged() {
        let mut tx = Transaction::from_new(new_expense(dec("10")), "t1".to_string(), Utc::now(), today())
            .unwrap();
        let before = tx.clone();
        let result = tx.apply(TransactionUpdate {
            kind: Some(TransactionKind::Income),
            amount: Some(dec("-5")),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(tx, before);
    }

    #[test]
    fn test_new_transaction_accepts_numeric_amount() {
        let new: NewTransaction = serde_json::from_str(
            r#"{"kind": "income", "amount": 1000, "category": "salary", "occurred_at": "2025-03-01"}"#,
        )
        .unwrap();
        assert_eq!(new.amount, Decimal::from(1000));
        assert_eq!(new.kind, TransactionKind::Income);
        assert!(new.description.is_none());
    }

    #[test]
    fn test_transaction_serializes_amount_as_decimal_string() {
        let tx = Transaction::from_new(new_expense(dec("0.10")), "t1".to_string(), Utc::now(), today())
            .unwrap();
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["amount"], "0.10");
        assert_eq!(value["occurred_at"], "2025-03-05");
        assert!(value.get("description").is_none());
    }
}
