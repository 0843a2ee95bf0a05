//! Transactions API endpoints
//!
//! Endpoints:
//! - api_transactions: List records, newest first (optional `kind`)
//! - api_transaction_detail: Get one record
//! - api_transaction_create: Create a record
//! - api_transaction_update: Partially update a record
//! - api_transaction_delete: Delete a record
//! - api_transactions_filter: Records with an exact `category`
//! - api_transactions_by_date: Records dated within `start..=end`

use crate::{ApiError, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;
use tallyweb_core::{NewTransaction, Transaction, TransactionUpdate};

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}

/// List transactions (JSON API)
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let records = state.ledger.list(param(&params, "kind")).await?;
    Ok(Json(records))
}

/// Get single transaction (JSON API)
pub async fn api_transaction_detail(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(state.ledger.get(&id).await?))
}

/// Create a transaction (JSON API)
pub async fn api_transaction_create(
    state: State<AppState>,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(new) = payload?;
    let created = state.ledger.create(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a transaction (JSON API)
pub async fn api_transaction_update(
    state: State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<Transaction>, ApiError> {
    let Json(update) = payload?;
    Ok(Json(state.ledger.update(&id, update).await?))
}

/// Delete a transaction (JSON API)
pub async fn api_transaction_delete(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.ledger.delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Deleted successfully" })))
}

/// Filter by category (JSON API)
pub async fn api_transactions_filter(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let records = state.ledger.by_category(param(&params, "category")).await?;
    Ok(Json(records))
}

/// Filter by inclusive date range (JSON API)
pub async fn api_transactions_by_date(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let records = state
        .ledger
        .by_date_range(param(&params, "start"), param(&params, "end"))
        .await?;
    Ok(Json(records))
}
