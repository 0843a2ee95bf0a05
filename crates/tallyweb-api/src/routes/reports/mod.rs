//! Report routes - monthly summary, category totals, yearly chart and trend
//!
//! Every report is computed from a fresh store snapshot per request.

pub mod api;

pub use api::{api_categories, api_chart, api_overview, api_summary, api_trend};
