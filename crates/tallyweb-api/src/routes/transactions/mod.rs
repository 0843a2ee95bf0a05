//! Transaction routes - record CRUD, category and date-range filters
//!
//! Structure:
//! - api.rs: JSON API endpoints

pub mod api;

pub use api::{
    api_transaction_create,
    api_transaction_delete,
    api_transaction_detail,
    api_transaction_update,
    api_transactions,
    api_transactions_by_date,
    api_transactions_filter,
};
