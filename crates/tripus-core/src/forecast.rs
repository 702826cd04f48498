//! # Forecast Engine
//!
//! Turns the sales history into demand and revenue predictions.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Forecast Engine                                 │
//! │                                                                         │
//! │  SalesRecord ledger ──► daily_revenue ──► mean ──► forecast_revenue     │
//! │                                            × (1 + u),  u ∈ [-0.1, 0.1)  │
//! │                                                                         │
//! │  Transaction log ──► historical_counts (today-6 ..= today)              │
//! │                           │                                             │
//! │            ┌──────────────┴──────────────┐                              │
//! │            │ all zero                    │ some sales                   │
//! │            ▼                             ▼                              │
//! │   baseline ∈ {1,2,3}             OLS over x = 0..6                      │
//! │   × BASELINE_PATTERN[k]          trend at x = 4..10, floored at 0       │
//! │   × noise [0.8, 1.2)             × WEEKDAY_FACTORS[weekday(date)]       │
//! │            │                     × noise [0.85, 1.15)                   │
//! │            └──────────────┬──────────────┘                              │
//! │                           ▼                                             │
//! │         round, floor at 0 ──► predicted (today+1 ..= today+7)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Historical vectors are a pure function of the log and `today`. Only the
//! predicted vectors draw from the [`RandomSource`], and each prediction stays
//! within the noise bounds of [`trend_baseline`].

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::random::RandomSource;
use crate::types::{ForecastPoint, Product, SalesRecord, Transaction};

// =============================================================================
// Constants
// =============================================================================

/// Length of the historical window (days, today inclusive).
pub const HISTORY_DAYS: usize = 7;

/// Length of the prediction window (days after today).
pub const PREDICTION_DAYS: usize = 7;

/// Monday..Sunday multipliers applied to trend predictions.
pub const WEEKDAY_FACTORS: [f64; 7] = [1.0, 1.1, 1.0, 0.9, 1.2, 1.4, 0.8];

/// Slot multipliers for products with no recent sales.
pub const BASELINE_PATTERN: [f64; 7] = [0.8, 1.2, 1.1, 1.0, 1.3, 1.5, 0.9];

/// Bounds of the multiplicative noise on trend predictions.
pub const TREND_NOISE: (f64, f64) = (0.85, 1.15);

/// Bounds of the multiplicative noise on baseline predictions.
pub const BASELINE_NOISE: (f64, f64) = (0.8, 1.2);

/// Baseline unit choices for products with no recent sales.
pub const BASELINE_UNITS: [u32; 3] = [1, 2, 3];

/// Maximum relative variation of the aggregate revenue forecast.
pub const REVENUE_VARIATION: f64 = 0.1;

/// Chart colors, cycled by product index.
pub const SERIES_PALETTE: [&str; 10] = [
    "#2563eb", "#dc2626", "#16a34a", "#ca8a04", "#9333ea", "#ea580c", "#0891b2", "#be185d",
    "#65a30d", "#7c2d12",
];

// =============================================================================
// Types
// =============================================================================

/// Historical and predicted unit demand for one product.
///
/// ## Invariants
/// - `historical.len() == HISTORY_DAYS`
/// - `predicted.len() == PREDICTION_DAYS`
/// - Values are unsigned, so never negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductForecastSeries {
    pub product: String,
    /// Units sold on today-6 ..= today.
    pub historical: Vec<u32>,
    /// Predicted units for today+1 ..= today+7.
    pub predicted: Vec<u32>,
    /// Display color from [`SERIES_PALETTE`].
    pub color: String,
}

impl ProductForecastSeries {
    /// Historical followed by predicted values (14 points).
    pub fn all_points(&self) -> Vec<u32> {
        self.historical
            .iter()
            .chain(self.predicted.iter())
            .copied()
            .collect()
    }
}

/// Least-squares fit `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fits `values[i]` against `x = i`.
    ///
    /// A degenerate fit (fewer than two points) has slope 0.
    pub fn fit(values: &[u32]) -> Self {
        let n = values.len() as f64;
        if values.is_empty() {
            return TrendLine {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (x, &y) in values.iter().enumerate() {
            let (x, y) = (x as f64, y as f64);
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_x) / n;

        TrendLine { slope, intercept }
    }

    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

// =============================================================================
// Aggregate Revenue Forecast
// =============================================================================

/// Revenue per observed day, ascending by date.
pub fn daily_revenue(ledger: &[SalesRecord]) -> BTreeMap<NaiveDate, Money> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for record in ledger {
        *by_day.entry(record.date).or_default() += record.revenue();
    }
    by_day
}

/// Mean revenue across observed days, or zero for an empty ledger.
pub fn mean_daily_revenue(ledger: &[SalesRecord]) -> Money {
    let by_day = daily_revenue(ledger);
    if by_day.is_empty() {
        return Money::zero();
    }
    let total: Money = by_day.values().sum();
    Money::from_cents((total.cents() as f64 / by_day.len() as f64).round() as i64)
}

/// Flat N-day revenue forecast starting the day after `start`.
///
/// Each point is `mean × (1 + u)` with `u` uniform in
/// `[-REVENUE_VARIATION, REVENUE_VARIATION)`, rounded to whole currency units.
/// An empty ledger yields `horizon` zero points.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tripus_core::forecast::forecast_revenue;
/// use tripus_core::random::FixedRandom;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let points = forecast_revenue(&[], 30, today, &mut FixedRandom::midpoint());
/// assert_eq!(points.len(), 30);
/// assert!(points.iter().all(|p| p.predicted_revenue.is_zero()));
/// ```
pub fn forecast_revenue(
    ledger: &[SalesRecord],
    horizon: usize,
    start: NaiveDate,
    rng: &mut dyn RandomSource,
) -> Vec<ForecastPoint> {
    let mean = mean_daily_revenue(ledger);

    (1..=horizon)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);
            let predicted_revenue = if mean.is_zero() {
                Money::zero()
            } else {
                let u = rng.uniform(-REVENUE_VARIATION, REVENUE_VARIATION);
                let major = (mean.as_major_f64() * (1.0 + u)).round().max(0.0) as i64;
                Money::from_major_minor(major, 0)
            };
            ForecastPoint {
                date,
                predicted_revenue,
            }
        })
        .collect()
}

// =============================================================================
// Per-Product Series
// =============================================================================

/// The 7 historical dates, oldest first.
pub fn history_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..HISTORY_DAYS as i64)
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// The 7 predicted dates, nearest first.
pub fn prediction_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=PREDICTION_DAYS as i64)
        .map(|ahead| today + Duration::days(ahead))
        .collect()
}

/// Chart labels for the 14-day window ("Jun 4" ... "Jun 17 (Pred)").
pub fn chart_labels(today: NaiveDate) -> Vec<String> {
    let past = history_dates(today)
        .into_iter()
        .map(|d| d.format("%b %-d").to_string());
    let future = prediction_dates(today)
        .into_iter()
        .map(|d| format!("{} (Pred)", d.format("%b %-d")));
    past.chain(future).collect()
}

/// Units sold per product per historical day.
///
/// Catalog products come first, in catalog order. Names that only appear in
/// the transaction log are appended in first-seen order.
pub fn historical_counts(
    products: &[Product],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<(String, [u32; HISTORY_DAYS])> {
    let mut series: Vec<(String, [u32; HISTORY_DAYS])> = Vec::new();
    for product in products {
        if !series.iter().any(|(name, _)| name == &product.name) {
            series.push((product.name.clone(), [0; HISTORY_DAYS]));
        }
    }

    let window_start = today - Duration::days(HISTORY_DAYS as i64 - 1);
    for transaction in transactions {
        let day = transaction.date.date_naive();
        if day < window_start || day > today {
            continue;
        }
        let slot = (day - window_start).num_days() as usize;

        for item in &transaction.items {
            let units = u32::try_from(item.quantity.max(0)).unwrap_or(u32::MAX);
            let position = match series.iter().position(|(name, _)| name == &item.name) {
                Some(position) => position,
                None => {
                    series.push((item.name.clone(), [0; HISTORY_DAYS]));
                    series.len() - 1
                }
            };
            series[position].1[slot] = series[position].1[slot].saturating_add(units);
        }
    }

    series
}

/// Deterministic trend × weekday prediction before noise and rounding.
///
/// Slot `k` evaluates the trend at `x = k + 4` (the window re-centered on its
/// middle day) and applies the weekday factor of `today + 1 + k`.
pub fn trend_baseline(history: &[u32; HISTORY_DAYS], today: NaiveDate) -> [f64; PREDICTION_DAYS] {
    let trend = TrendLine::fit(history);
    let mut out = [0.0; PREDICTION_DAYS];

    for (k, date) in prediction_dates(today).into_iter().enumerate() {
        let index = HISTORY_DAYS + k;
        let day_offset = index as f64 - 3.0;
        let weekday = date.weekday().num_days_from_monday() as usize;
        out[k] = trend.at(day_offset).max(0.0) * WEEKDAY_FACTORS[weekday];
    }

    out
}

/// Predicts the next 7 days for a single product.
pub fn predict_units(
    history: &[u32; HISTORY_DAYS],
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> [u32; PREDICTION_DAYS] {
    let mut predicted = [0u32; PREDICTION_DAYS];

    if history.iter().all(|&units| units == 0) {
        let baseline = BASELINE_UNITS[rng.index(BASELINE_UNITS.len())] as f64;
        for (k, slot) in predicted.iter_mut().enumerate() {
            let noise = rng.uniform(BASELINE_NOISE.0, BASELINE_NOISE.1);
            *slot = round_units(baseline * BASELINE_PATTERN[k] * noise);
        }
        return predicted;
    }

    let baseline = trend_baseline(history, today);
    for (slot, expected) in predicted.iter_mut().zip(baseline) {
        let noise = rng.uniform(TREND_NOISE.0, TREND_NOISE.1);
        *slot = round_units(expected * noise);
    }
    predicted
}

/// 7-day historical + 7-day predicted series for every known product.
///
/// ## Guarantees
/// - Every catalog product appears exactly once, plus any product name
///   found only in the transaction log
/// - Historical values are identical across calls with the same inputs
pub fn product_series(
    products: &[Product],
    transactions: &[Transaction],
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> Vec<ProductForecastSeries> {
    historical_counts(products, transactions, today)
        .into_iter()
        .enumerate()
        .map(|(index, (product, history))| {
            let predicted = predict_units(&history, today, rng);
            ProductForecastSeries {
                product,
                historical: history.to_vec(),
                predicted: predicted.to_vec(),
                color: SERIES_PALETTE[index % SERIES_PALETTE.len()].to_string(),
            }
        })
        .collect()
}

fn round_units(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round().min(u32::MAX as f64) as u32
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
