//! # Recommendations
//!
//! Natural-language suggestions derived from the sales ledger.
//!
//! ```text
//!   1. 📈 top revenue product        (non-empty ledger)
//!   2. 🏷️ lowest revenue product     (non-empty ledger)
//!   3. 🌞/🎉/❄️ seasonal message      (always, exactly one)
//!   4. 💳 most frequent payment      (non-empty ledger)
//! ```
//!
//! Season buckets by calendar month:
//!
//! | Months        | Season   |
//! |---------------|----------|
//! | Mar – Aug     | Summer   |
//! | Sep – Dec     | Festival |
//! | Jan – Feb     | Winter   |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analytics::{payment_breakdown, product_totals, ProductTotals};
use crate::types::SalesRecord;

/// Shopping season used for the seasonal recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Festival,
    Winter,
}

impl Season {
    /// Maps a calendar month (1 = January) to its season.
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::recommend::Season;
    ///
    /// assert_eq!(Season::from_month(6), Season::Summer);
    /// assert_eq!(Season::from_month(10), Season::Festival);
    /// assert_eq!(Season::from_month(1), Season::Winter);
    /// ```
    pub const fn from_month(month: u32) -> Self {
        match month {
            3..=8 => Season::Summer,
            9..=12 => Season::Festival,
            _ => Season::Winter,
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            Season::Summer => "🌞 Summer season: Stock more cold drinks, ice cream, and fresh fruits",
            Season::Festival => {
                "🎉 Festival season: Increase stock of sweets, dry fruits, and cooking essentials"
            }
            Season::Winter => {
                "❄️ Winter season: Stock more hot beverages, seasonal vegetables, and warm snacks"
            }
        }
    }
}

/// Builds the recommendation list for the given calendar month.
///
/// Returns 4 entries for a non-empty ledger and only the seasonal entry for
/// an empty one. Ties keep the product or method seen first in the ledger.
pub fn generate_recommendations(ledger: &[SalesRecord], month: u32) -> Vec<String> {
    let mut recommendations = Vec::with_capacity(4);
    let totals = product_totals(ledger);

    if let Some(top) = highest_revenue(&totals) {
        recommendations.push(format!(
            "📈 Stock more {} - it's your top seller with ₹{} revenue",
            top.product,
            top.revenue.grouped()
        ));
    }

    if let Some(lowest) = lowest_revenue(&totals) {
        recommendations.push(format!(
            "🏷️ Consider 10-15% discount on {} to clear slow-moving stock",
            lowest.product
        ));
    }

    recommendations.push(Season::from_month(month).message().to_string());

    let methods = payment_breakdown(ledger);
    let mut preferred = methods.first();
    for candidate in &methods {
        if preferred.map_or(true, |p| candidate.count > p.count) {
            preferred = Some(candidate);
        }
    }
    if let Some(method) = preferred {
        recommendations.push(format!(
            "💳 {} is your customers' preferred payment method ({} transactions)",
            method.method, method.count
        ));
    }

    recommendations
}

fn highest_revenue(totals: &[ProductTotals]) -> Option<&ProductTotals> {
    let mut best: Option<&ProductTotals> = None;
    for entry in totals {
        if best.map_or(true, |b| entry.revenue > b.revenue) {
            best = Some(entry);
        }
    }
    best
}

fn lowest_revenue(totals: &[ProductTotals]) -> Option<&ProductTotals> {
    let mut worst: Option<&ProductTotals> = None;
    for entry in totals {
        if worst.map_or(true, |w| entry.revenue < w.revenue) {
            worst = Some(entry);
        }
    }
    worst
}

// =============================================================================
// Unit Tests
// =============================================================================
