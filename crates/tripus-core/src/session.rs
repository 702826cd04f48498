//! # Session
//!
//! The store's in-process state as an immutable snapshot.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   session_v1 ──── checkout(cart, tender, ...) ────► (session_v2, receipt)│
//! │       │                                                   │              │
//! │       │  unchanged on Err                                 │ new snapshot │
//! │       ▼                                                   ▼              │
//! │   still valid                                      caller swaps it in   │
//! │                                                                         │
//! │   Every mutating operation takes `&self` and returns a NEW Session.     │
//! │   All checks run before the copy is modified, so an error leaves no     │
//! │   partial state behind.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commit Sale
//! Cash/electronic checkout and credit grant both decrement stock through the
//! private `commit_sale`, which records the cart id. A second commit of the
//! same cart (through either path) fails with `CartAlreadyCommitted`, so a
//! unit of stock is never counted twice.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::credit::{
    invoice_recipient, new_credit_transaction, prepare_reminder, CreditGrant, CreditLedger,
    ReminderRequest,
};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::team::new_member;
use crate::types::{
    Bill, CreditTransaction, Customer, PaymentMethod, Product, TeamMember, Transaction,
    TransactionStatus,
};
use crate::validation::{deliverable_email, validate_product, validate_search_query};
use crate::WALK_IN_CUSTOMER;

// =============================================================================
// Checkout Types
// =============================================================================

/// How the customer pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tender {
    /// Cash with the amount handed over.
    Cash { received: Money },
    /// Any non-cash method (simulated: UPI, card, net banking, QR).
    Electronic { method: PaymentMethod },
}

impl Tender {
    pub fn method(&self) -> PaymentMethod {
        match self {
            Tender::Cash { .. } => PaymentMethod::Cash,
            Tender::Electronic { method } => *method,
        }
    }

    /// Checks the tender against a cart total and returns the change due.
    ///
    /// ## Errors
    /// - `InsufficientTender` when cash received is below the total
    /// - `Validation` when `Credit` is passed as an electronic method
    pub fn settle(&self, total: Money) -> CoreResult<Money> {
        match *self {
            Tender::Cash { received } => {
                if received < total {
                    return Err(CoreError::InsufficientTender {
                        received: received.to_string(),
                        total: total.to_string(),
                    });
                }
                Ok(received - total)
            }
            Tender::Electronic {
                method: PaymentMethod::Credit,
            } => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: "store credit must be granted to a customer".to_string(),
            }
            .into()),
            Tender::Electronic { .. } => Ok(Money::zero()),
        }
    }
}

/// Rebuilds checkout history from stored bills, numbering from `TXN001`.
pub fn history_from_bills(bills: &[Bill]) -> Vec<Transaction> {
    bills
        .iter()
        .enumerate()
        .map(|(i, bill)| Transaction {
            id: format!("TXN{:03}", i + 1),
            customer_name: bill.customer_name.clone(),
            customer_email: bill.customer_email.clone(),
            items: bill.items.clone(),
            total_cents: bill.total_cents,
            payment_method: bill.payment_method,
            date: bill.date,
            status: TransactionStatus::Completed,
        })
        .collect()
}

/// Optional customer details typed at the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Outcome of a non-credit checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub transaction: Transaction,
    pub bill: Bill,
    /// Change due (cash only; zero otherwise).
    pub change: Money,
    /// Receipt address if the supplied email is deliverable.
    pub receipt_recipient: Option<String>,
}

// =============================================================================
// Session
// =============================================================================

/// Snapshot of inventory, customers, history, credit and team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    products: Vec<Product>,
    customers: Vec<Customer>,
    transactions: Vec<Transaction>,
    bills: Vec<Bill>,
    credit: CreditLedger,
    team: Vec<TeamMember>,
    committed_carts: BTreeSet<String>,
}

impl Session {
    /// Creates a session with the given inventory.
    pub fn new(products: Vec<Product>) -> Self {
        Session {
            products,
            ..Session::default()
        }
    }

    pub fn with_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers = customers;
        self
    }

    pub fn with_bills(mut self, bills: Vec<Bill>) -> Self {
        self.bills = bills;
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_team(mut self, team: Vec<TeamMember>) -> Self {
        self.team = team;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn credit(&self) -> &CreditLedger {
        &self.credit
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    /// Whether a cart's stock has already been committed.
    pub fn is_committed(&self, cart_id: &str) -> bool {
        self.committed_carts.contains(cart_id)
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Adds a product. Codes are unique.
    pub fn add_product(&self, product: Product) -> CoreResult<Session> {
        validate_product(&product)?;
        if self.product(&product.code).is_some() {
            return Err(CoreError::DuplicateProduct(product.code));
        }

        let mut next = self.clone();
        next.products.push(product);
        Ok(next)
    }

    /// Replaces the product stored under `code`.
    ///
    /// The edited product may carry a new code, as long as no other product
    /// already uses it.
    pub fn update_product(&self, code: &str, product: Product) -> CoreResult<Session> {
        validate_product(&product)?;
        let index = self
            .products
            .iter()
            .position(|p| p.code == code)
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))?;

        if product.code != code && self.product(&product.code).is_some() {
            return Err(CoreError::DuplicateProduct(product.code));
        }

        let mut next = self.clone();
        next.products[index] = product;
        Ok(next)
    }

    pub fn delete_product(&self, code: &str) -> CoreResult<Session> {
        if self.product(code).is_none() {
            return Err(CoreError::ProductNotFound(code.to_string()));
        }

        let mut next = self.clone();
        next.products.retain(|p| p.code != code);
        Ok(next)
    }

    /// Case-insensitive substring match over name or code.
    pub fn search_products(&self, query: &str) -> CoreResult<Vec<Product>> {
        let query = validate_search_query(query)?.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.code.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Completes a cash or electronic checkout.
    ///
    /// ## Errors
    /// - `EmptyCart`
    /// - `InsufficientTender` when cash received is below the total
    /// - `Validation` when `Credit` is passed as an electronic method
    /// - `CartAlreadyCommitted`, `ProductNotFound`, `InsufficientStock`
    pub fn checkout(
        &self,
        cart: &Cart,
        tender: Tender,
        details: &CustomerDetails,
        now: DateTime<Utc>,
    ) -> CoreResult<(Session, CheckoutReceipt)> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = cart.total();
        let change = tender.settle(total)?;

        let mut next = self.commit_sale(cart)?;

        let customer_name = details
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(WALK_IN_CUSTOMER)
            .to_string();
        let customer_email = details
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        let transaction = Transaction {
            id: next.next_transaction_id(),
            customer_name: customer_name.clone(),
            customer_email: customer_email.clone(),
            items: cart.items.clone(),
            total_cents: total.cents(),
            payment_method: tender.method(),
            date: now,
            status: TransactionStatus::Completed,
        };

        let bill = Bill {
            id: format!("BILL-{:04}", next.bills.len() + 1),
            date: now,
            items: cart.items.clone(),
            total_cents: total.cents(),
            payment_method: tender.method(),
            customer_name,
            customer_email: customer_email.clone(),
            email_sent: false,
        };

        next.transactions.push(transaction.clone());
        next.bills.push(bill.clone());

        Ok((
            next,
            CheckoutReceipt {
                transaction,
                bill,
                change,
                receipt_recipient: deliverable_email(customer_email.as_deref()),
            },
        ))
    }

    /// Records whether a bill's receipt email was delivered.
    pub fn mark_bill_emailed(&self, bill_id: &str, sent: bool) -> CoreResult<Session> {
        let index = self
            .bills
            .iter()
            .position(|b| b.id == bill_id)
            .ok_or_else(|| {
                CoreError::Validation(ValidationError::InvalidFormat {
                    field: "bill".to_string(),
                    reason: format!("unknown bill {}", bill_id),
                })
            })?;

        let mut next = self.clone();
        next.bills[index].email_sent = sent;
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Credit
    // -------------------------------------------------------------------------

    /// Grants store credit for the cart's contents.
    ///
    /// Appends one `CreditTransaction` (pending, due in 30 days) and one
    /// `Transaction` paid by Credit, raises the customer's balance by the
    /// cart total and commits the cart's stock.
    pub fn grant_credit(
        &self,
        cart: &Cart,
        customer_id: &str,
        override_email: Option<&str>,
        now: DateTime<Utc>,
    ) -> CoreResult<(Session, CreditGrant)> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let customer_index = self
            .customers
            .iter()
            .position(|c| c.id == customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;
        let customer = &self.customers[customer_index];

        let credit = new_credit_transaction(
            self.credit.next_id(),
            customer,
            &cart.items,
            override_email,
            now.date_naive(),
        )?;
        let recipient = invoice_recipient(&credit, customer);

        let mut next = self.commit_sale(cart)?;

        let history_entry = Transaction {
            id: next.next_transaction_id(),
            customer_name: credit.customer_name.clone(),
            customer_email: recipient.clone(),
            items: credit.items.clone(),
            total_cents: credit.amount_cents,
            payment_method: PaymentMethod::Credit,
            date: now,
            status: TransactionStatus::Completed,
        };
        next.transactions.push(history_entry);

        let balance = &mut next.customers[customer_index].credit_balance_cents;
        *balance += credit.amount_cents;
        let new_balance_cents = *balance;

        next.credit.append(credit.clone());

        Ok((
            next,
            CreditGrant {
                transaction: credit,
                new_balance_cents,
                invoice_recipient: recipient,
            },
        ))
    }

    /// Newest pending credit transaction for a customer.
    pub fn latest_pending_for(&self, customer_id: &str) -> Option<&CreditTransaction> {
        self.credit.latest_pending_for(customer_id)
    }

    /// Packages a reminder for a credit transaction. Never changes state.
    pub fn prepare_reminder(&self, credit_id: &str) -> CoreResult<ReminderRequest> {
        let transaction = self
            .credit
            .get(credit_id)
            .ok_or_else(|| CoreError::CreditTransactionNotFound(credit_id.to_string()))?;
        prepare_reminder(transaction, &self.customers)
    }

    // -------------------------------------------------------------------------
    // Team
    // -------------------------------------------------------------------------

    pub fn add_team_member(
        &self,
        name: &str,
        email: &str,
        role: &str,
        join_date: NaiveDate,
    ) -> CoreResult<(Session, TeamMember)> {
        let next_id = self
            .team
            .iter()
            .filter_map(|m| m.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let member = new_member(next_id.to_string(), name, email, role, join_date)?;

        let mut next = self.clone();
        next.team.push(member.clone());
        Ok((next, member))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Decrements stock for every line, exactly once per cart id.
    fn commit_sale(&self, cart: &Cart) -> CoreResult<Session> {
        if self.is_committed(&cart.id) {
            return Err(CoreError::CartAlreadyCommitted(cart.id.clone()));
        }

        for item in &cart.items {
            let product = self
                .product(&item.code)
                .ok_or_else(|| CoreError::ProductNotFound(item.code.clone()))?;
            if !product.can_sell(item.quantity) {
                return Err(CoreError::InsufficientStock {
                    code: item.code.clone(),
                    available: product.stock,
                    requested: item.quantity,
                });
            }
        }

        let mut next = self.clone();
        for item in &cart.items {
            if let Some(product) = next.products.iter_mut().find(|p| p.code == item.code) {
                product.stock -= item.quantity;
            }
        }
        next.committed_carts.insert(cart.id.clone());
        Ok(next)
    }

    fn next_transaction_id(&self) -> String {
        format!("TXN{:03}", self.transactions.len() + 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreditStatus, LoyaltyStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 14, 30, 0).unwrap()
    }

    fn product(code: &str, name: &str, price_major: i64, stock: i64) -> Product {
        Product {
            code: code.to_string(),
            name: name.to_string(),
            price_cents: price_major * 100,
            stock,
        }
    }

    fn customer(id: &str, email: Option<&str>, credit_allowed: bool) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {}", id),
            email: email.map(str::to_string),
            loyalty_status: LoyaltyStatus::Regular,
            credit_allowed,
            credit_balance_cents: 50_000,
        }
    }

    fn session() -> Session {
        Session::new(vec![
            product("P001", "Premium T-Shirt", 599, 50),
            product("P002", "Denim Jeans", 1299, 30),
        ])
        .with_customers(vec![
            customer("CUST001", Some("raj@example.com"), true),
            customer("CUST002", None, true),
            customer("CUST003", Some("amit@example.com"), false),
        ])
    }

    fn cart(session: &Session) -> Cart {
        let mut cart = Cart::with_id("cart-1");
        cart.add_item(session.product("P001").unwrap(), 2).unwrap();
        cart.add_item(session.product("P002").unwrap(), 1).unwrap();
        cart
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_product_rejects_duplicates_and_invalid() {
        let s = session();
        assert!(matches!(
            s.add_product(product("P001", "Other", 10, 1)),
            Err(CoreError::DuplicateProduct(_))
        ));
        assert!(matches!(
            s.add_product(product("P009", "Free", 0, 1)),
            Err(CoreError::Validation(_))
        ));

        let next = s.add_product(product("P009", "Socks", 99, 10)).unwrap();
        assert_eq!(next.products().len(), 3);
        assert_eq!(s.products().len(), 2);
    }

    #[test]
    fn test_update_and_delete_product() {
        let s = session();
        let next = s
            .update_product("P001", product("P001", "Premium T-Shirt", 649, 40))
            .unwrap();
        assert_eq!(next.product("P001").unwrap().price_cents, 64_900);

        assert!(matches!(
            s.update_product("P001", product("P002", "Clash", 1, 1)),
            Err(CoreError::DuplicateProduct(_))
        ));

        let next = next.delete_product("P002").unwrap();
        assert!(next.product("P002").is_none());
        assert!(next.delete_product("P002").is_err());
    }

    #[test]
    fn test_search_products() {
        let s = session();
        assert_eq!(s.search_products("denim").unwrap().len(), 1);
        assert_eq!(s.search_products("p00").unwrap().len(), 2);
        assert_eq!(s.search_products("").unwrap().len(), 2);
        assert!(s.search_products("milk").unwrap().is_empty());
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    #[test]
    fn test_cash_checkout_returns_change_and_decrements_stock() {
        let s = session();
        let c = cart(&s);

        let (next, receipt) = s
            .checkout(
                &c,
                Tender::Cash {
                    received: Money::from_major_minor(3000, 0),
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap();

        assert_eq!(receipt.change, Money::from_major_minor(503, 0));
        assert_eq!(receipt.transaction.id, "TXN001");
        assert_eq!(receipt.transaction.customer_name, WALK_IN_CUSTOMER);
        assert_eq!(receipt.transaction.total(), Money::from_major_minor(2497, 0));
        assert!(!receipt.bill.email_sent);
        assert_eq!(receipt.receipt_recipient, None);

        assert_eq!(next.product("P001").unwrap().stock, 48);
        assert_eq!(next.product("P002").unwrap().stock, 29);
        assert_eq!(next.transactions().len(), 1);
        assert_eq!(next.bills().len(), 1);

        // The original snapshot is untouched.
        assert_eq!(s.product("P001").unwrap().stock, 50);
    }

    #[test]
    fn test_cash_checkout_insufficient_tender() {
        let s = session();
        let err = s
            .checkout(
                &cart(&s),
                Tender::Cash {
                    received: Money::from_major_minor(100, 0),
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientTender { .. }));
    }

    #[test]
    fn test_checkout_empty_cart() {
        let s = session();
        let err = s
            .checkout(
                &Cart::new(),
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_checkout_receipt_recipient_requires_at_sign() {
        let s = session();
        let details = CustomerDetails {
            name: Some("Jane Smith".to_string()),
            email: Some("jane@example.com".to_string()),
        };
        let (_, receipt) = s
            .checkout(
                &cart(&s),
                Tender::Electronic {
                    method: PaymentMethod::Card,
                },
                &details,
                now(),
            )
            .unwrap();
        assert_eq!(receipt.receipt_recipient, Some("jane@example.com".to_string()));
        assert_eq!(receipt.bill.customer_name, "Jane Smith");

        let details = CustomerDetails {
            name: None,
            email: Some("not-an-email".to_string()),
        };
        let (_, receipt) = s
            .checkout(
                &cart(&s),
                Tender::Electronic {
                    method: PaymentMethod::Card,
                },
                &details,
                now(),
            )
            .unwrap();
        assert_eq!(receipt.receipt_recipient, None);
    }

    #[test]
    fn test_checkout_rejects_credit_tender() {
        let s = session();
        let err = s
            .checkout(
                &cart(&s),
                Tender::Electronic {
                    method: PaymentMethod::Credit,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_checkout_stale_cart_insufficient_stock() {
        let s = session();
        let c = cart(&s);
        let s = s
            .update_product("P002", product("P002", "Denim Jeans", 1299, 0))
            .unwrap();

        let err = s
            .checkout(
                &c,
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(s.product("P001").unwrap().stock, 50);
    }

    #[test]
    fn test_mark_bill_emailed() {
        let s = session();
        let (next, receipt) = s
            .checkout(
                &cart(&s),
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap();
        let next = next.mark_bill_emailed(&receipt.bill.id, true).unwrap();
        assert!(next.bills()[0].email_sent);
        assert!(next.mark_bill_emailed("BILL-9999", true).is_err());
    }

    // -------------------------------------------------------------------------
    // Credit
    // -------------------------------------------------------------------------

    #[test]
    fn test_grant_credit_updates_balance_ledger_and_stock() {
        let s = session();
        let (next, grant) = s.grant_credit(&cart(&s), "CUST001", None, now()).unwrap();

        assert_eq!(grant.transaction.amount(), Money::from_major_minor(2497, 0));
        assert_eq!(grant.new_balance_cents, 50_000 + 249_700);
        assert_eq!(
            next.customer("CUST001").unwrap().credit_balance_cents,
            50_000 + 249_700
        );
        assert_eq!(next.credit().len(), 1);
        assert_eq!(
            grant.transaction.due_date,
            now().date_naive() + Duration::days(30)
        );
        assert_eq!(grant.transaction.status, CreditStatus::Pending);
        assert_eq!(grant.invoice_recipient, Some("raj@example.com".to_string()));

        assert_eq!(next.product("P001").unwrap().stock, 48);
        assert_eq!(next.transactions().len(), 1);
        assert_eq!(next.transactions()[0].payment_method, PaymentMethod::Credit);
    }

    #[test]
    fn test_grant_credit_override_email() {
        let s = session();
        let (_, grant) = s
            .grant_credit(&cart(&s), "CUST002", Some("accounts@example.com"), now())
            .unwrap();
        assert_eq!(
            grant.invoice_recipient,
            Some("accounts@example.com".to_string())
        );

        let (_, grant) = s.grant_credit(&cart(&s), "CUST002", None, now()).unwrap();
        assert_eq!(grant.invoice_recipient, None);
    }

    #[test]
    fn test_grant_credit_rejections_leave_state_untouched() {
        let s = session();
        assert!(matches!(
            s.grant_credit(&Cart::new(), "CUST001", None, now()),
            Err(CoreError::EmptyCart)
        ));
        assert!(matches!(
            s.grant_credit(&cart(&s), "CUST404", None, now()),
            Err(CoreError::CustomerNotFound(_))
        ));
        assert!(matches!(
            s.grant_credit(&cart(&s), "CUST003", None, now()),
            Err(CoreError::CreditNotAllowed(_))
        ));
        assert!(s.credit().is_empty());
        assert_eq!(s.customer("CUST001").unwrap().credit_balance_cents, 50_000);
    }

    #[test]
    fn test_cart_commits_once_across_paths() {
        let s = session();
        let c = cart(&s);

        let (after_cash, _) = s
            .checkout(
                &c,
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap();

        let err = after_cash
            .grant_credit(&c, "CUST001", None, now())
            .unwrap_err();
        assert!(matches!(err, CoreError::CartAlreadyCommitted(_)));
        assert_eq!(after_cash.product("P001").unwrap().stock, 48);
        assert!(after_cash.credit().is_empty());

        let err = after_cash
            .checkout(
                &c,
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::CartAlreadyCommitted(_)));
    }

    #[test]
    fn test_reminder_resolution() {
        let s = session();
        let (s, with_email) = s.grant_credit(&cart(&s), "CUST001", None, now()).unwrap();
        let mut second = Cart::with_id("cart-2");
        second.add_item(s.product("P001").unwrap(), 1).unwrap();
        let (s, without_email) = s.grant_credit(&second, "CUST002", None, now()).unwrap();

        let reminder = s.prepare_reminder(&with_email.transaction.id).unwrap();
        assert_eq!(reminder.recipient, "raj@example.com");

        let err = s.prepare_reminder(&without_email.transaction.id).unwrap_err();
        assert!(matches!(err, CoreError::NoEmailAvailable { .. }));

        assert!(matches!(
            s.prepare_reminder("CR999"),
            Err(CoreError::CreditTransactionNotFound(_))
        ));

        // Reminders never settle anything.
        assert_eq!(
            s.latest_pending_for("CUST001").unwrap().status,
            CreditStatus::Pending
        );
    }

    // -------------------------------------------------------------------------
    // Team
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_team_member_assigns_next_id() {
        let s = session().with_team(crate::team::default_team());
        let (next, member) = s
            .add_team_member(
                "Asha Rao",
                "asha@example.com",
                "Cashier",
                now().date_naive(),
            )
            .unwrap();
        assert_eq!(member.id, "4");
        assert_eq!(next.team().len(), 4);

        assert!(s
            .add_team_member("Asha Rao", "asha", "Cashier", now().date_naive())
            .is_err());
    }

    #[test]
    fn test_tender_json_shape() {
        let upi = Tender::Electronic {
            method: PaymentMethod::Upi,
        };
        let json = serde_json::to_value(upi).unwrap();
        assert_eq!(json["type"], "electronic");
        assert!(json.get("method").is_some());
        assert_eq!(serde_json::from_value::<Tender>(json).unwrap(), upi);

        let cash: Tender =
            serde_json::from_str(r#"{"type":"cash","received":50000}"#).unwrap();
        assert_eq!(cash.method(), PaymentMethod::Cash);
    }

    #[test]
    fn test_settle_checks_tender_without_state() {
        let total = Money::from_major_minor(2497, 0);

        let change = Tender::Cash {
            received: Money::from_major_minor(2500, 0),
        }
        .settle(total)
        .unwrap();
        assert_eq!(change, Money::from_major_minor(3, 0));

        assert!(matches!(
            Tender::Cash {
                received: Money::from_major_minor(100, 0)
            }
            .settle(total),
            Err(CoreError::InsufficientTender { .. })
        ));
        assert!(matches!(
            Tender::Electronic {
                method: PaymentMethod::Credit
            }
            .settle(total),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_history_from_bills_restores_transactions() {
        let s = session();
        let c = cart(&s);
        let (next, receipt) = s
            .checkout(
                &c,
                Tender::Electronic {
                    method: PaymentMethod::Card,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap();

        let history = history_from_bills(next.bills());

        assert_eq!(history, vec![receipt.transaction]);

        let restored = Session::new(next.products().to_vec())
            .with_bills(next.bills().to_vec())
            .with_transactions(history);
        let mut c = Cart::with_id("cart-2");
        c.add_item(restored.product("P001").unwrap(), 1).unwrap();
        let (_, second) = restored
            .checkout(
                &c,
                Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                &CustomerDetails::default(),
                now(),
            )
            .unwrap();
        assert_eq!(second.transaction.id, "TXN002");
        assert_eq!(second.bill.id, "BILL-0002");
    }
}
