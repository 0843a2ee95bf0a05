//! Transaction storage
//!
//! [`TransactionStore`] is the seam between the query layer and persistence.
//! [`MemoryStore`] keeps records in memory and, when given a snapshot path,
//! rewrites a JSON file after every change.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::models::{validate_amount, NewTransaction, Transaction, TransactionUpdate};

/// Store reference type
pub type StoreRef = Arc<dyn TransactionStore>;

/// Durable record storage with CRUD and date-range lookups
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Every record, in insertion order
    async fn all(&self) -> CoreResult<Vec<Transaction>>;

    /// One record by id
    async fn get(&self, id: &str) -> CoreResult<Transaction>;

    /// Records dated within `[start, end]`, in insertion order
    async fn between(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<Vec<Transaction>>;

    /// Validate and store a new record
    async fn create(&self, new: NewTransaction) -> CoreResult<Transaction>;

    /// Apply a partial edit and return the updated record
    async fn update(&self, id: &str, update: TransactionUpdate) -> CoreResult<Transaction>;

    /// Remove a record
    async fn delete(&self, id: &str) -> CoreResult<()>;
}

/// In-memory store with optional JSON snapshot
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Transaction>>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by a JSON snapshot file
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    pub async fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let records = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str::<Vec<Transaction>>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Snapshot {} not found, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        for tx in &records {
            validate_amount(tx.amount).map_err(|e| CoreError::StorageError {
                message: format!("{}: transaction {}: {}", path.display(), tx.id, e),
            })?;
        }

        log::info!("Loaded {} transactions from {}", records.len(), path.display());
        Ok(Self {
            records: RwLock::new(records),
            snapshot: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }

    /// Write the full record set to the snapshot file, if configured
    async fn persist(&self, records: &[Transaction]) -> CoreResult<()> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, path).await?;

        log::debug!("Wrote {} transactions to {}", records.len(), path.display());
        Ok(())
    }
}

fn not_found(id: &str) -> CoreError {
    CoreError::TransactionNotFound { id: id.to_string() }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn all(&self) -> CoreResult<Vec<Transaction>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> CoreResult<Transaction> {
        self.records
            .read()
            .await
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn between(&self, start: NaiveDate, end: NaiveDate) -> CoreResult<Vec<Transaction>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|tx| tx.occurred_at >= start && tx.occurred_at <= end)
            .cloned()
            .collect())
    }

    async fn create(&self, new: NewTransaction) -> CoreResult<Transaction> {
        let now = Utc::now();
        let tx = Transaction::from_new(new, tallyweb_utils::generate_id(), now, now.date_naive())?;

        // Writes are committed only after the snapshot succeeds.
        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        next.push(tx.clone());
        self.persist(&next).await?;
        *guard = next;

        log::info!("Created {} transaction {} ({})", tx.kind, tx.id, tx.category);
        Ok(tx)
    }

    async fn update(&self, id: &str, update: TransactionUpdate) -> CoreResult<Transaction> {
        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        let tx = next
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| not_found(id))?;
        tx.apply(update)?;
        let updated = tx.clone();

        self.persist(&next).await?;
        *guard = next;

        log::info!("Updated transaction {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        let mut guard = self.records.write().await;
        let pos = guard
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| not_found(id))?;
        let mut next = guard.clone();
        next.remove(pos);

        self.persist(&next).await?;
        *guard = next;

        log::info!("Deleted transaction {}", id);
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use rust_decimal::Decimal;

    fn new_tx(kind: TransactionKind, amount: i64, category: &str, on: (i32, u32, u32)) -> NewTransaction {
        NewTransaction {
            kind,
            amount: Decimal::from(amount),
            category: category.to_string(),
            occurred_at: NaiveDate::from_ymd_opt(on.0, on.1, on.2),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let created = store
            .create(new_tx(TransactionKind::Expense, 50, "food", (2025, 3, 5)))
            .await
            .unwrap();

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount() {
        let store = MemoryStore::new();
        let err = store
            .create(new_tx(TransactionKind::Expense, -1, "food", (2025, 3, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { .. }));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let created = store
            .create(new_tx(TransactionKind::Expense, 50, "food", (2025, 3, 5)))
            .await
            .unwrap();

        let updated = store
            .update(
                &created.id,
                TransactionUpdate {
                    amount: Some(Decimal::from(75)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, Decimal::from(75));
        assert_eq!(updated.recorded_at, created.recorded_at);

        store.delete(&created.id).await.unwrap();
        assert!(matches!(
            store.get(&created.id).await,
            Err(CoreError::TransactionNotFound { .. })
        ));
        assert!(matches!(
            store.delete(&created.id).await,
            Err(CoreError::TransactionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryStore::new();
        let err = store
            .update("missing", TransactionUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::TransactionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_between_is_inclusive() {
        let store = MemoryStore::new();
        for day in [1, 15, 31] {
            store
                .create(new_tx(TransactionKind::Income, 1, "x", (2025, 1, day)))
                .await
                .unwrap();
        }
        store
            .create(new_tx(TransactionKind::Income, 1, "x", (2025, 2, 1)))
            .await
            .unwrap();

        let found = store
            .between(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("transactions.json");

        let store = MemoryStore::open(&path).await.unwrap();
        assert!(store.all().await.unwrap().is_empty());
        let created = store
            .create(new_tx(TransactionKind::Income, 1000, "salary", (2025, 3, 1)))
            .await
            .unwrap();
        let doomed = store
            .create(new_tx(TransactionKind::Expense, 5, "coffee", (2025, 3, 2)))
            .await
            .unwrap();
        store.delete(&doomed.id).await.unwrap();
        assert!(path.exists());

        let reopened = MemoryStore::open(&path).await.unwrap();
        assert_eq!(reopened.all().await.unwrap(), vec![created]);
        assert_eq!(reopened.snapshot_path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_open_rejects_out_of_range_amount() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        let store = MemoryStore::open(&path).await.unwrap();
        store
            .create(new_tx(TransactionKind::Expense, 5, "coffee", (2025, 3, 2)))
            .await
            .unwrap();

        // Hand-edited snapshot with an amount beyond the accepted range
        let content = std::fs::read_to_string(&path).unwrap();
        let mut records: Vec<Transaction> = serde_json::from_str(&content).unwrap();
        records[0].amount = Decimal::MAX;
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let err = MemoryStore::open(&path).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError { .. }));
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MemoryStore::open(&path).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError { .. }));
    }
}
