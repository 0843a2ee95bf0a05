//! Core ledger processing: transaction storage, monthly aggregation and
//! report queries
//!
//! - [`store`]: the storage seam and the in-memory/JSON snapshot store
//! - [`time`]: month periods and date intervals
//! - [`aggregate`]: pure totals, rollups, series and filters
//! - [`query`]: the [`Ledger`] query surface used by the HTTP layer

pub mod aggregate;
pub mod error;
pub mod models;
pub mod query;
pub mod reports;
pub mod store;
pub mod time;
pub mod types;

pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{NewTransaction, Transaction, TransactionUpdate};
pub use query::Ledger;
pub use reports::{
    CategoryRollup, CategoryTotal, LedgerOverview, MonthlyPoint, PeriodReport, PeriodSummary,
    PeriodTotals,
};
pub use store::{MemoryStore, StoreRef, TransactionStore};
pub use time::{DateRange, Interval, Period};
pub use types::TransactionKind;
