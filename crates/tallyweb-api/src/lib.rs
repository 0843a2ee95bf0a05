//! JSON HTTP API for transactions and monthly reports
//!
//! Routes are organized into modules:
//! - routes::transactions: record CRUD, category and date-range filters
//! - routes::reports: month summary, category totals, yearly chart, trend

pub mod error;
pub mod routes;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tallyweb_config::Config;
use tallyweb_core::Ledger;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::reports::{api_categories, api_chart, api_overview, api_summary, api_trend};
    use routes::transactions::{
        api_transaction_create, api_transaction_delete, api_transaction_detail,
        api_transaction_update, api_transactions, api_transactions_by_date,
        api_transactions_filter,
    };

    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/transactions",
            get(api_transactions).post(api_transaction_create),
        )
        // Reports
        .route("/api/transactions/summary", get(api_summary))
        .route("/api/transactions/categories", get(api_categories))
        .route("/api/transactions/chart", get(api_chart))
        .route("/api/transactions/trend", get(api_trend))
        .route("/api/transactions/overview", get(api_overview))
        // Filters
        .route("/api/transactions/filter", get(api_transactions_filter))
        .route("/api/transactions/date", get(api_transactions_by_date))
        .route(
            "/api/transactions/:id",
            get(api_transaction_detail)
                .put(api_transaction_update)
                .delete(api_transaction_delete),
        )
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// CORS for the configured origins; an empty list allows any origin
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<header::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server and run until Ctrl+C
pub async fn start_server(config: Config, ledger: Arc<Ledger>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState { ledger, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting tallyweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/transactions (CRUD, ?kind=income|expense)");
    log::info!("  - /api/transactions/summary?month&year");
    log::info!("  - /api/transactions/categories?month&year");
    log::info!("  - /api/transactions/filter?category");
    log::info!("  - /api/transactions/date?start&end");
    log::info!("  - /api/transactions/chart?year");
    log::info!("  - /api/transactions/trend?months&month&year");
    log::info!("  - /api/transactions/overview");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
