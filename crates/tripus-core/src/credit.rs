//! # Credit Ledger
//!
//! Append-only record of store-credit transactions.
//!
//! ## Grant Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Credit Grant                                    │
//! │                                                                         │
//! │  Session::grant_credit(cart, customer, override_email, now)             │
//! │       │                                                                 │
//! │       ├── cart empty?            → EmptyCart                            │
//! │       ├── customer unknown?      → CustomerNotFound                     │
//! │       ├── credit not allowed?    → CreditNotAllowed                     │
//! │       │                                                                 │
//! │       ├── commit_sale(cart)      → stock -= qty (once per cart id)      │
//! │       ├── new_credit_transaction → status Pending, due = date + 30d     │
//! │       ├── CreditLedger::append   → never edits existing entries         │
//! │       ├── customer.balance      += total                                │
//! │       └── invoice recipient      = override email, else customer email  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reminder Flow
//! A reminder resolves its recipient as the transaction's override email,
//! else the customer's registered email. Neither → `NoEmailAvailable`.
//! Sending a reminder never changes the transaction status.
//!
//! ## Settlement
//! `Pending → Paid` is encoded by [`CreditStatus::can_transition_to`], but no
//! operation performs it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CreditStatus, CreditTransaction, Customer};
use crate::validation::deliverable_email;
use crate::CREDIT_TERM_DAYS;

// =============================================================================
// Ledger
// =============================================================================

/// Credit transactions in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLedger {
    entries: Vec<CreditTransaction>,
}

impl CreditLedger {
    pub fn new() -> Self {
        CreditLedger::default()
    }

    /// Appends a transaction. Existing entries are never modified.
    pub fn append(&mut self, transaction: CreditTransaction) {
        self.entries.push(transaction);
    }

    pub fn entries(&self) -> &[CreditTransaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CreditTransaction> {
        self.entries.iter().find(|t| t.id == id)
    }

    /// Transactions for one customer, oldest first.
    pub fn for_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a CreditTransaction> + 'a {
        self.entries
            .iter()
            .filter(move |t| t.customer_id == customer_id)
    }

    /// The newest pending transaction for a customer (the UI's reminder target).
    pub fn latest_pending_for(&self, customer_id: &str) -> Option<&CreditTransaction> {
        self.entries
            .iter()
            .rev()
            .find(|t| t.customer_id == customer_id && t.status == CreditStatus::Pending)
    }

    /// Sum of pending amounts for a customer.
    pub fn outstanding_for(&self, customer_id: &str) -> Money {
        self.for_customer(customer_id)
            .filter(|t| t.status == CreditStatus::Pending)
            .map(CreditTransaction::amount)
            .sum()
    }

    /// Next sequential id ("CR001", "CR002", ...).
    pub fn next_id(&self) -> String {
        format!("CR{:03}", self.entries.len() + 1)
    }
}

// =============================================================================
// Grant
// =============================================================================

/// Result of a credit grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditGrant {
    pub transaction: CreditTransaction,
    /// Customer balance after the grant.
    pub new_balance_cents: i64,
    /// Where the invoice should go. `None` means the send is skipped.
    pub invoice_recipient: Option<String>,
}

/// Due date for credit created on `date`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tripus_core::credit::due_date_for;
///
/// let created = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(due_date_for(created), NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
/// ```
pub fn due_date_for(date: NaiveDate) -> NaiveDate {
    date + Duration::days(CREDIT_TERM_DAYS)
}

/// Builds a pending credit transaction for a cart's lines.
///
/// Does not touch the ledger, balances or stock; the session does that
/// once every check has passed.
pub fn new_credit_transaction(
    id: String,
    customer: &Customer,
    items: &[CartItem],
    override_email: Option<&str>,
    date: NaiveDate,
) -> CoreResult<CreditTransaction> {
    if items.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    if !customer.credit_allowed {
        return Err(CoreError::CreditNotAllowed(customer.id.clone()));
    }

    let amount: Money = items.iter().map(CartItem::line_total).sum();

    Ok(CreditTransaction {
        id,
        customer_id: customer.id.clone(),
        customer_name: customer.name.clone(),
        customer_email: deliverable_email(override_email),
        amount_cents: amount.cents(),
        date,
        due_date: due_date_for(date),
        status: CreditStatus::Pending,
        items: items.to_vec(),
    })
}

/// Invoice address: the override if given, else the customer's email.
pub fn invoice_recipient(transaction: &CreditTransaction, customer: &Customer) -> Option<String> {
    transaction
        .customer_email
        .clone()
        .or_else(|| deliverable_email(customer.email.as_deref()))
}

// =============================================================================
// Reminder
// =============================================================================

/// Everything the email collaborator needs for a credit reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub transaction_id: String,
    pub customer_name: String,
    pub recipient: String,
    pub amount: Money,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub status: CreditStatus,
}

/// Resolves the reminder recipient and packages the reminder.
///
/// ## Errors
/// - `NoEmailAvailable` when neither the transaction nor the customer
///   (looked up by id) has an address
pub fn prepare_reminder(
    transaction: &CreditTransaction,
    customers: &[Customer],
) -> CoreResult<ReminderRequest> {
    let recipient = transaction
        .customer_email
        .as_deref()
        .and_then(|e| deliverable_email(Some(e)))
        .or_else(|| {
            customers
                .iter()
                .find(|c| c.id == transaction.customer_id)
                .and_then(|c| deliverable_email(c.email.as_deref()))
        })
        .ok_or_else(|| CoreError::NoEmailAvailable {
            transaction_id: transaction.id.clone(),
        })?;

    Ok(ReminderRequest {
        transaction_id: transaction.id.clone(),
        customer_name: transaction.customer_name.clone(),
        recipient,
        amount: transaction.amount(),
        due_date: transaction.due_date,
        status: transaction.status,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
