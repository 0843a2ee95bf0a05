//! Route modules for the API server
//!
//! - transactions: record CRUD and list filters
//! - reports: aggregated monthly reports
//!
//! Each module has a mod.rs with its exports and an api.rs with the JSON
//! handlers.

pub mod reports;
pub mod transactions;
