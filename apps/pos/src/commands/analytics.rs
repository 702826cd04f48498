//! # Analytics Commands
//!
//! Read-only views over the sales ledger and the session: dashboard,
//! revenue forecast, per-product demand forecast, recommendations and the
//! stock catalog.
//!
//! "Today" is a parameter so every view can be reproduced for a fixed date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DatasetState, RandomState, SessionState};
use tripus_core::analytics::{dashboard_summary, DashboardSummary};
use tripus_core::forecast::{chart_labels, forecast_revenue, product_series};
use tripus_core::recommend::generate_recommendations;
use tripus_core::{CatalogEntry, ForecastPoint, ProductForecastSeries};

/// Chart payload for the product demand forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForecastResponse {
    /// 7 historical labels then 7 "(Pred)" labels.
    pub labels: Vec<String>,
    pub series: Vec<ProductForecastSeries>,
}

pub fn get_dashboard(session: &SessionState, dataset: &DatasetState) -> DashboardSummary {
    debug!("get_dashboard command");
    session.with_session(|s| dashboard_summary(dataset.ledger(), s.transactions(), s.customers()))
}

/// Flat revenue forecast for the days after `today`.
///
/// `horizon` defaults to the configured forecast horizon. An empty ledger
/// forecasts zero for every day.
pub fn get_revenue_forecast(
    config: &ConfigState,
    dataset: &DatasetState,
    random: &RandomState,
    today: NaiveDate,
    horizon: Option<usize>,
) -> Result<Vec<ForecastPoint>, ApiError> {
    let horizon = horizon.unwrap_or(config.forecast_horizon_days);
    debug!(horizon = horizon, "get_revenue_forecast command");

    if horizon == 0 {
        return Err(ApiError::invalid_input("Forecast horizon must be at least 1 day"));
    }

    Ok(random.with_rng(|rng| forecast_revenue(dataset.ledger(), horizon, today, rng)))
}

/// 7-day history and 7-day prediction for every product, from checkout
/// transactions of this session.
pub fn get_product_forecast(
    session: &SessionState,
    random: &RandomState,
    today: NaiveDate,
) -> ProductForecastResponse {
    debug!(today = %today, "get_product_forecast command");

    let series = session.with_session(|s| {
        random.with_rng(|rng| product_series(s.products(), s.transactions(), today, rng))
    });

    ProductForecastResponse {
        labels: chart_labels(today),
        series,
    }
}

/// Recommendations for a calendar month (1-12).
pub fn get_recommendations(dataset: &DatasetState, month: u32) -> Result<Vec<String>, ApiError> {
    debug!(month = month, "get_recommendations command");

    if !(1..=12).contains(&month) {
        return Err(ApiError::invalid_input(format!("Invalid month: {}", month)));
    }
    Ok(generate_recommendations(dataset.ledger(), month))
}

pub fn get_catalog(dataset: &DatasetState) -> Vec<CatalogEntry> {
    dataset.catalog().to_vec()
}
