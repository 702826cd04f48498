//! # Dashboard Analytics
//!
//! Read-only aggregations behind the dashboard panels.
//!
//! | Panel              | Input            | Function                  |
//! |--------------------|------------------|---------------------------|
//! | Daily revenue      | sales ledger     | [`recent_daily_revenue`]  |
//! | Payment methods    | sales ledger     | [`payment_breakdown`]     |
//! | Best sellers       | sales ledger     | [`best_sellers`]          |
//! | Slow movers        | sales ledger     | [`slow_movers`]           |
//! | Top products       | transaction log  | [`top_products`]          |
//! | Loyal customers    | customer roster  | [`loyal_customers`]       |
//!
//! All groupings keep first-seen order, and sorts are stable, so ties are
//! resolved by the order in which products first appear in the input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use chrono::NaiveDate;

use crate::forecast::daily_revenue;
use crate::money::Money;
use crate::types::{Customer, LoyaltyStatus, PaymentMethod, SalesRecord, Transaction};

/// Number of days shown on the revenue chart.
pub const RECENT_DAYS: usize = 7;

/// Size of the best-seller and slow-mover lists.
pub const SELLER_LIST_SIZE: usize = 3;

/// Size of the top-products list.
pub const TOP_PRODUCTS_SIZE: usize = 5;

/// Size of the loyal-customers list.
pub const LOYAL_CUSTOMERS_SIZE: usize = 5;

// =============================================================================
// Types
// =============================================================================

/// Quantity and revenue accumulated for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductTotals {
    pub product: String,
    pub quantity: i64,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCount {
    pub method: PaymentMethod,
    pub count: i64,
}

/// Everything the dashboard tab renders, in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Money,
    pub transaction_count: i64,
    pub daily_revenue: Vec<DailyRevenue>,
    pub payment_methods: Vec<PaymentCount>,
    pub best_sellers: Vec<ProductTotals>,
    pub slow_movers: Vec<ProductTotals>,
    pub top_products: Vec<ProductTotals>,
    pub loyal_customers: Vec<Customer>,
}

// =============================================================================
// Aggregations
// =============================================================================

/// Quantity and revenue per product in first-seen order.
pub fn product_totals(ledger: &[SalesRecord]) -> Vec<ProductTotals> {
    let mut totals: Vec<ProductTotals> = Vec::new();
    for record in ledger {
        accumulate(
            &mut totals,
            &record.product,
            record.quantity as i64,
            record.revenue(),
        );
    }
    totals
}

/// Count of ledger records per payment method, in first-seen order.
pub fn payment_breakdown(ledger: &[SalesRecord]) -> Vec<PaymentCount> {
    let mut counts: Vec<PaymentCount> = Vec::new();
    for record in ledger {
        match counts.iter_mut().find(|c| c.method == record.payment_method) {
            Some(entry) => entry.count += 1,
            None => counts.push(PaymentCount {
                method: record.payment_method,
                count: 1,
            }),
        }
    }
    counts
}

/// Revenue of the most recent observed days, oldest first.
pub fn recent_daily_revenue(ledger: &[SalesRecord], days: usize) -> Vec<DailyRevenue> {
    let by_day = daily_revenue(ledger);
    let skip = by_day.len().saturating_sub(days);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect()
}

/// Top `n` products by ledger quantity.
pub fn best_sellers(ledger: &[SalesRecord], n: usize) -> Vec<ProductTotals> {
    let mut totals = product_totals(ledger);
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(n);
    totals
}

/// Bottom `n` products by ledger quantity.
pub fn slow_movers(ledger: &[SalesRecord], n: usize) -> Vec<ProductTotals> {
    let mut totals = product_totals(ledger);
    totals.sort_by(|a, b| a.quantity.cmp(&b.quantity));
    totals.truncate(n);
    totals
}

/// Top `n` products by quantity across checkout transactions.
pub fn top_products(transactions: &[Transaction], n: usize) -> Vec<ProductTotals> {
    let mut totals: Vec<ProductTotals> = Vec::new();
    for transaction in transactions {
        for item in &transaction.items {
            accumulate(&mut totals, &item.name, item.quantity, item.line_total());
        }
    }
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(n);
    totals
}

/// First `n` Regular customers in roster order.
pub fn loyal_customers(customers: &[Customer], n: usize) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| c.loyalty_status == LoyaltyStatus::Regular)
        .take(n)
        .cloned()
        .collect()
}

/// Builds the full dashboard payload.
pub fn dashboard_summary(
    ledger: &[SalesRecord],
    transactions: &[Transaction],
    customers: &[Customer],
) -> DashboardSummary {
    DashboardSummary {
        total_revenue: ledger.iter().map(SalesRecord::revenue).sum(),
        transaction_count: ledger.len() as i64,
        daily_revenue: recent_daily_revenue(ledger, RECENT_DAYS),
        payment_methods: payment_breakdown(ledger),
        best_sellers: best_sellers(ledger, SELLER_LIST_SIZE),
        slow_movers: slow_movers(ledger, SELLER_LIST_SIZE),
        top_products: top_products(transactions, TOP_PRODUCTS_SIZE),
        loyal_customers: loyal_customers(customers, LOYAL_CUSTOMERS_SIZE),
    }
}

fn accumulate(totals: &mut Vec<ProductTotals>, product: &str, quantity: i64, revenue: Money) {
    match totals.iter_mut().find(|t| t.product == product) {
        Some(entry) => {
            entry.quantity += quantity;
            entry.revenue += revenue;
        }
        None => totals.push(ProductTotals {
            product: product.to_string(),
            quantity,
            revenue,
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::types::TransactionStatus;
    use chrono::Utc;

    fn record(day: u32, product: &str, quantity: u32, method: PaymentMethod) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            product: product.to_string(),
            quantity,
            unit_price_cents: 10_000,
            payment_method: method,
            customer_id: "CUST001".to_string(),
        }
    }

    fn ledger() -> Vec<SalesRecord> {
        vec![
            record(1, "Rice (1kg)", 5, PaymentMethod::Upi),
            record(1, "Bread", 1, PaymentMethod::Cash),
            record(2, "Milk (1L)", 3, PaymentMethod::Upi),
            record(2, "Eggs (12pcs)", 2, PaymentMethod::Card),
            record(3, "Rice (1kg)", 1, PaymentMethod::Upi),
        ]
    }

    #[test]
    fn test_product_totals_first_seen_order() {
        let totals = product_totals(&ledger());
        let names: Vec<&str> = totals.iter().map(|t| t.product.as_str()).collect();
        assert_eq!(names, vec!["Rice (1kg)", "Bread", "Milk (1L)", "Eggs (12pcs)"]);
        assert_eq!(totals[0].quantity, 6);
        assert_eq!(totals[0].revenue, Money::from_major_minor(600, 0));
    }

    #[test]
    fn test_best_sellers_and_slow_movers() {
        let best: Vec<String> = best_sellers(&ledger(), 3)
            .into_iter()
            .map(|t| t.product)
            .collect();
        assert_eq!(best, vec!["Rice (1kg)", "Milk (1L)", "Eggs (12pcs)"]);

        let slow: Vec<String> = slow_movers(&ledger(), 3)
            .into_iter()
            .map(|t| t.product)
            .collect();
        assert_eq!(slow, vec!["Bread", "Eggs (12pcs)", "Milk (1L)"]);
    }

    #[test]
    fn test_payment_breakdown() {
        let counts = payment_breakdown(&ledger());
        assert_eq!(counts[0].method, PaymentMethod::Upi);
        assert_eq!(counts[0].count, 3);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_recent_daily_revenue_keeps_latest_days() {
        let revenue = recent_daily_revenue(&ledger(), 2);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(revenue[0].revenue, Money::from_major_minor(500, 0));
        assert_eq!(revenue[1].revenue, Money::from_major_minor(100, 0));
    }

    #[test]
    fn test_top_products_from_transactions() {
        let item = |name: &str, qty: i64| CartItem {
            code: name.to_string(),
            name: name.to_string(),
            unit_price_cents: 59_900,
            quantity: qty,
        };
        let transactions = vec![Transaction {
            id: "TXN001".to_string(),
            customer_name: "John Doe".to_string(),
            customer_email: None,
            items: vec![item("Premium T-Shirt", 2), item("Denim Jeans", 1)],
            total_cents: 179_700,
            payment_method: PaymentMethod::Card,
            date: Utc::now(),
            status: TransactionStatus::Completed,
        }];

        let top = top_products(&transactions, 5);
        assert_eq!(top[0].product, "Premium T-Shirt");
        assert_eq!(top[0].revenue, Money::from_major_minor(1198, 0));
    }

    #[test]
    fn test_loyal_customers_only_regular() {
        let customer = |id: &str, status| Customer {
            id: id.to_string(),
            name: id.to_string(),
            email: None,
            loyalty_status: status,
            credit_allowed: false,
            credit_balance_cents: 0,
        };
        let roster = vec![
            customer("CUST001", LoyaltyStatus::New),
            customer("CUST002", LoyaltyStatus::Regular),
            customer("CUST003", LoyaltyStatus::Regular),
        ];
        let loyal = loyal_customers(&roster, 5);
        assert_eq!(loyal.len(), 2);
        assert_eq!(loyal[0].id, "CUST002");
    }

    #[test]
    fn test_dashboard_summary_empty() {
        let summary = dashboard_summary(&[], &[], &[]);
        assert!(summary.total_revenue.is_zero());
        assert!(summary.daily_revenue.is_empty());
        assert!(summary.best_sellers.is_empty());
    }
}
