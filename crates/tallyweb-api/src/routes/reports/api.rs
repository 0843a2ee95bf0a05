//! Report API endpoints

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use std::collections::HashMap;
use tallyweb_core::{CategoryRollup, LedgerOverview, MonthlyPoint, PeriodReport, PeriodTotals};

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}

/// Month summary: `?month=3&year=2025`
pub async fn api_summary(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<PeriodReport>, ApiError> {
    let report = state
        .ledger
        .period_summary(param(&params, "month"), param(&params, "year"))
        .await?;
    Ok(Json(report))
}

/// Expense totals per category for a month
pub async fn api_categories(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<CategoryRollup>, ApiError> {
    let rollup = state
        .ledger
        .category_totals(param(&params, "month"), param(&params, "year"))
        .await?;
    Ok(Json(rollup))
}

/// Twelve monthly totals for `?year=`
pub async fn api_chart(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<Vec<PeriodTotals>>, ApiError> {
    let series = state.ledger.monthly_series(param(&params, "year")).await?;
    Ok(Json(series))
}

/// Trailing monthly trend ending at `?month&year` or the current month
pub async fn api_trend(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<Vec<MonthlyPoint>>, ApiError> {
    let today = chrono::Utc::now().date_naive();
    let points = state
        .ledger
        .trailing_series(
            param(&params, "months"),
            param(&params, "month"),
            param(&params, "year"),
            today,
        )
        .await?;
    Ok(Json(points))
}

/// All-time totals
pub async fn api_overview(state: State<AppState>) -> Result<Json<LedgerOverview>, ApiError> {
    Ok(Json(state.ledger.overview().await?))
}
