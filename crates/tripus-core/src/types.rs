//! # Domain Types
//!
//! Core domain types used throughout TriPUS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SalesRecord   │   │   Transaction   │   │ CreditTransaction│      │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  date           │   │  id (TXN...)    │   │  id (CR-...)    │       │
//! │  │  product        │   │  items          │   │  customer_id    │       │
//! │  │  quantity       │   │  total_cents    │   │  amount_cents   │       │
//! │  │  unit_price     │   │  payment_method │   │  due_date       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   forecast input        checkout history       credit ledger            │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │ PaymentMethod   │       │
//! │  │  code (P001)    │   │  id (CUST001)   │   │  Cash, UPI,     │       │
//! │  │  price_cents    │   │  credit_allowed │   │  Card, Net      │       │
//! │  │  stock          │   │  credit_balance │   │  Banking, QR,   │       │
//! │  └─────────────────┘   └─────────────────┘   │  Credit         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! - The Forecast Engine only READS `SalesRecord`, `Transaction` and `Product`.
//! - The Credit Ledger exclusively owns `CreditTransaction` records and
//!   `Customer::credit_balance_cents`.
//! - The checkout session owns `Transaction`, `Bill` and product stock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::CartItem;
use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid for.
///
/// Serialized with the display labels used by the dashboard and the
/// sales ledger ("Net Banking", "QR Scanner", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// UPI transfer (simulated QR flow).
    #[serde(rename = "UPI")]
    Upi,
    /// Card payment (simulated).
    Card,
    /// Net banking (simulated bank redirect).
    #[serde(rename = "Net Banking")]
    NetBanking,
    /// Generic QR scanner payment.
    #[serde(rename = "QR Scanner")]
    QrScanner,
    /// Store credit (deferred payment).
    Credit,
}

impl PaymentMethod {
    /// All methods the synthetic ledger draws from (store credit excluded).
    pub const LEDGER_METHODS: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::NetBanking,
        PaymentMethod::QrScanner,
    ];

    /// Returns the display label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::QrScanner => "QR Scanner",
            PaymentMethod::Credit => "Credit",
        }
    }

    /// Parses a method name as typed by the UI ("cash", "upi", "netbanking", ...).
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::PaymentMethod;
    ///
    /// assert_eq!(PaymentMethod::parse("Net Banking"), Some(PaymentMethod::NetBanking));
    /// assert_eq!(PaymentMethod::parse("upi"), Some(PaymentMethod::Upi));
    /// assert_eq!(PaymentMethod::parse("cheque"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "upi" => Some(PaymentMethod::Upi),
            "card" | "creditcard" | "debitcard" => Some(PaymentMethod::Card),
            "netbanking" => Some(PaymentMethod::NetBanking),
            "qr" | "qrscanner" => Some(PaymentMethod::QrScanner),
            "credit" | "storecredit" => Some(PaymentMethod::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Sales Ledger
// =============================================================================

/// One line of the historical sales ledger (forecast input).
///
/// ## Invariants
/// - `quantity > 0`
/// - `unit_price_cents > 0`
///
/// Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Calendar day of the sale.
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Product name (the ledger is keyed by name, not code).
    pub product: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub payment_method: PaymentMethod,
    pub customer_id: String,
}

impl SalesRecord {
    /// Revenue of this record (quantity × unit price).
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity as i64)
    }
}

/// One day of the aggregate revenue forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Always ≥ 0.
    pub predicted_revenue: Money,
}

// =============================================================================
// Customer
// =============================================================================

/// Loyalty tier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LoyaltyStatus {
    Regular,
    New,
}

/// A store customer.
///
/// ## Invariants
/// - `credit_balance_cents >= 0`
/// - The balance only increases through a credit grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer id (e.g., "CUST007").
    pub id: String,
    pub name: String,
    /// Registered email, if any.
    pub email: Option<String>,
    pub loyalty_status: LoyaltyStatus,
    /// Whether the customer may buy on store credit.
    pub credit_allowed: bool,
    /// Running outstanding credit.
    pub credit_balance_cents: i64,
}

impl Customer {
    /// Returns the outstanding credit as Money.
    #[inline]
    pub fn credit_balance(&self) -> Money {
        Money::from_cents(self.credit_balance_cents)
    }
}

// =============================================================================
// Product (inventory)
// =============================================================================

/// A product in the store inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Business code (e.g., "P001"), unique in the inventory.
    pub code: String,
    /// Display name shown to cashier and on receipt.
    pub name: String,
    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
    /// Units on hand.
    pub stock: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// A business-intelligence catalog entry (category and stock level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Catalog id (e.g., "PROD001").
    pub product_id: String,
    pub product_name: String,
    pub stock_level: i64,
    pub category: String,
}

// =============================================================================
// Transactions & Bills
// =============================================================================

/// Status of a checkout transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Refunded,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Completed => f.write_str("completed"),
            TransactionStatus::Refunded => f.write_str("refunded"),
        }
    }
}

/// A completed checkout, as shown in transaction history and the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id (e.g., "TXN003").
    pub id: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    /// Line items frozen at checkout.
    pub items: Vec<CartItem>,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A printed/emailed bill for a non-credit checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Bill id (e.g., "BILL-0001").
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub customer_name: String,
    pub customer_email: Option<String>,
    /// Whether the receipt email was delivered.
    pub email_sent: bool,
}

impl Bill {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Credit
// =============================================================================

/// Status of a credit transaction.
///
/// ## State Machine
/// ```text
///   ┌─────────┐   settlement (extension point)   ┌──────┐
///   │ Pending │ ───────────────────────────────► │ Paid │
///   └─────────┘                                  └──────┘
/// ```
/// No operation in this crate performs the transition; sending a reminder
/// never changes the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Pending,
    Paid,
}

impl CreditStatus {
    /// Returns true if moving from `self` to `next` is a legal transition.
    ///
    /// ## Example
    /// ```rust
    /// use tripus_core::CreditStatus;
    ///
    /// assert!(CreditStatus::Pending.can_transition_to(CreditStatus::Paid));
    /// assert!(!CreditStatus::Paid.can_transition_to(CreditStatus::Pending));
    /// ```
    pub const fn can_transition_to(&self, next: CreditStatus) -> bool {
        matches!((self, next), (CreditStatus::Pending, CreditStatus::Paid))
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditStatus::Pending => f.write_str("pending"),
            CreditStatus::Paid => f.write_str("paid"),
        }
    }
}

/// A deferred-payment transaction against a customer's account.
///
/// ## Invariants
/// - `amount_cents > 0`
/// - `due_date = date + CREDIT_TERM_DAYS`
/// - Never mutated after creation (append-only ledger)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    /// Override address captured at grant time.
    pub customer_email: Option<String>,
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub status: CreditStatus,
    pub items: Vec<CartItem>,
}

impl CreditTransaction {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Settings & Team
// =============================================================================

/// Sender settings forwarded to the email collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

impl EmailSettings {
    /// Receipts can only be sent once an API key and sender are configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.sender_email.trim().is_empty()
    }
}

/// A staff member who can receive team reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[ts(as = "String")]
    pub join_date: NaiveDate,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serializes_with_labels() {
        let json = serde_json::to_string(&PaymentMethod::NetBanking).unwrap();
        assert_eq!(json, "\"Net Banking\"");

        let parsed: PaymentMethod = serde_json::from_str("\"QR Scanner\"").unwrap();
        assert_eq!(parsed, PaymentMethod::QrScanner);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("CASH"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse("net-banking"), Some(PaymentMethod::NetBanking));
        assert_eq!(PaymentMethod::parse("Credit Card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn test_sales_record_revenue() {
        let record = SalesRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            product: "Rice (1kg)".to_string(),
            quantity: 3,
            unit_price_cents: 8000,
            payment_method: PaymentMethod::Upi,
            customer_id: "CUST001".to_string(),
        };
        assert_eq!(record.revenue().cents(), 24_000);
    }

    #[test]
    fn test_credit_status_transitions() {
        assert!(CreditStatus::Pending.can_transition_to(CreditStatus::Paid));
        assert!(!CreditStatus::Pending.can_transition_to(CreditStatus::Pending));
        assert!(!CreditStatus::Paid.can_transition_to(CreditStatus::Pending));
        assert!(!CreditStatus::Paid.can_transition_to(CreditStatus::Paid));
    }

    #[test]
    fn test_email_settings_configured() {
        let mut settings = EmailSettings::default();
        assert!(!settings.is_configured());

        settings.api_key = "key".to_string();
        settings.sender_email = "store@example.com".to_string();
        assert!(settings.is_configured());
    }

    #[test]
    fn test_product_can_sell() {
        let product = Product {
            code: "P001".to_string(),
            name: "Rice (1kg)".to_string(),
            price_cents: 8000,
            stock: 3,
        };
        assert!(product.can_sell(3));
        assert!(!product.can_sell(4));
    }
}
