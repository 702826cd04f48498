//! # Credit Commands
//!
//! Store credit: granting credit for the cart, listing what customers owe,
//! and emailing payment reminders.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  grant_credit ──► session.apply(grant_credit)                          │
//! │                     • CreditTransaction (pending, due +30 days)        │
//! │                     • history Transaction paid by Credit               │
//! │                     • balance += cart total, stock committed           │
//! │                ──► cache products ──► clear cart                       │
//! │                ──► invoice to override email, else customer email      │
//! │                    (no address: skipped, not an error)                 │
//! │                                                                         │
//! │  send_credit_reminder ──► NO_EMAIL_AVAILABLE if no address             │
//! │                      ──► EMAIL_DELIVERY_FAILED if the send fails       │
//! │                      (status is never changed by a reminder)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::checkout::DeliveryStatus;
use crate::error::ApiError;
use crate::state::SessionState;
use crate::AppContext;
use tripus_core::{CreditTransaction, Customer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCreditRequest {
    pub customer_id: String,
    /// Invoice address for this grant instead of the customer's own.
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCreditResponse {
    pub transaction: CreditTransaction,
    pub new_balance_cents: i64,
    pub invoice: DeliveryStatus,
}

/// A credit-enabled customer with what they currently owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCustomer {
    pub customer: Customer,
    /// Sum of pending credit granted in this session.
    pub outstanding_cents: i64,
    /// Reminder target, if any.
    pub latest_pending: Option<CreditTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub transaction_id: String,
    pub recipient: String,
}

/// Customers allowed to buy on credit.
pub fn list_credit_customers(session: &SessionState) -> Vec<CreditCustomer> {
    debug!("list_credit_customers command");
    session.with_session(|s| {
        s.customers()
            .iter()
            .filter(|c| c.credit_allowed)
            .map(|c| CreditCustomer {
                customer: c.clone(),
                outstanding_cents: s.credit().outstanding_for(&c.id).cents(),
                latest_pending: s.latest_pending_for(&c.id).cloned(),
            })
            .collect()
    })
}

/// Every credit transaction, oldest first.
pub fn list_credit_transactions(session: &SessionState) -> Vec<CreditTransaction> {
    session.with_session(|s| s.credit().entries().to_vec())
}

/// Grants store credit for the current cart.
///
/// ## Errors
/// - `INVALID_INPUT`: empty cart
/// - `NOT_FOUND`: unknown customer
/// - `CREDIT_NOT_ALLOWED`: customer is not credit-enabled
/// - `INSUFFICIENT_STOCK` / `CONFLICT`: as for checkout
pub async fn grant_credit(
    ctx: &AppContext,
    request: GrantCreditRequest,
) -> Result<GrantCreditResponse, ApiError> {
    let cart = ctx.cart.snapshot();
    debug!(
        cart_id = %cart.id,
        customer_id = %request.customer_id,
        "grant_credit command"
    );

    let (grant, products) = ctx.session.apply(|s| {
        let (next, grant) = s.grant_credit(
            &cart,
            &request.customer_id,
            request.email.as_deref(),
            Utc::now(),
        )?;
        let products = next.products().to_vec();
        Ok((next, (grant, products)))
    })?;

    info!(
        credit_id = %grant.transaction.id,
        customer_id = %grant.transaction.customer_id,
        amount = %grant.transaction.amount(),
        due_date = %grant.transaction.due_date,
        "Credit granted"
    );

    ctx.store.persist_products(&products).await;
    ctx.cart.clear_if(&cart.id);

    let invoice = match grant.invoice_recipient.as_deref() {
        Some(recipient) => {
            let result = ctx
                .mailer
                .send_credit_invoice(&grant.transaction, recipient)
                .await
                .map_err(ApiError::from);
            DeliveryStatus::from_result(recipient, result)
        }
        None => {
            debug!(credit_id = %grant.transaction.id, "No invoice address, skipping email");
            DeliveryStatus::skipped()
        }
    };

    Ok(GrantCreditResponse {
        transaction: grant.transaction,
        new_balance_cents: grant.new_balance_cents,
        invoice,
    })
}

/// Emails a payment reminder for one credit transaction.
///
/// Attempted once; the transaction's status is never changed.
pub async fn send_credit_reminder(
    ctx: &AppContext,
    credit_id: &str,
) -> Result<ReminderResponse, ApiError> {
    debug!(credit_id = %credit_id, "send_credit_reminder command");

    let reminder = ctx.session.with_session(|s| s.prepare_reminder(credit_id))?;
    ctx.mailer.send_reminder(&reminder).await?;

    Ok(ReminderResponse {
        transaction_id: reminder.transaction_id,
        recipient: reminder.recipient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::product::add_product;
    use crate::error::ErrorCode;
    use crate::testing;
    use chrono::Duration;
    use tripus_core::generator::default_products;
    use tripus_core::{CreditStatus, LoyaltyStatus, Product, Session};

    fn credit_customer(ctx: &AppContext) -> Customer {
        ctx.session.with_session(|s| {
            s.customers()
                .iter()
                .find(|c| c.credit_allowed)
                .cloned()
                .unwrap()
        })
    }

    async fn stock_priced_items(ctx: &AppContext) {
        for (code, price_cents) in [("P101", 59_900), ("P102", 129_900)] {
            let product = Product {
                code: code.to_string(),
                name: format!("Item {}", code),
                price_cents,
                stock: 10,
            };
            add_product(&ctx.session, &ctx.store, product).await.unwrap();
        }
        add_to_cart(&ctx.session, &ctx.cart, "P101", Some(2)).unwrap();
        add_to_cart(&ctx.session, &ctx.cart, "P102", Some(1)).unwrap();
    }

    #[tokio::test]
    async fn test_grant_credit_raises_balance_by_cart_total() {
        let (ctx, transport) = testing::context().await;
        let customer = credit_customer(&ctx);
        stock_priced_items(&ctx).await;

        let response = grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: customer.id.clone(),
                email: None,
            },
        )
        .await
        .unwrap();

        let credit = &response.transaction;
        assert_eq!(credit.id, "CR001");
        assert_eq!(credit.amount_cents, 249_700);
        assert_eq!(credit.status, CreditStatus::Pending);
        assert_eq!(credit.due_date, credit.date + Duration::days(30));
        assert_eq!(
            response.new_balance_cents,
            customer.credit_balance_cents + 249_700
        );

        assert!(response.invoice.sent);
        assert_eq!(response.invoice.recipient, customer.email);
        assert_eq!(transport.sent().await[0].kind(), "receipt");

        ctx.session.with_session(|s| {
            assert_eq!(s.credit().len(), 1);
            assert_eq!(s.product("P101").unwrap().stock, 8);
            assert_eq!(s.transactions().len(), 1);
        });
        assert!(ctx.cart.with_cart(|c| c.is_empty()));

        let listed = list_credit_customers(&ctx.session);
        let entry = listed.iter().find(|c| c.customer.id == customer.id).unwrap();
        assert_eq!(entry.outstanding_cents, 249_700);
        assert_eq!(entry.latest_pending.as_ref().unwrap().id, "CR001");
    }

    #[tokio::test]
    async fn test_invoice_goes_to_override_email() {
        let (ctx, transport) = testing::context().await;
        let customer = credit_customer(&ctx);
        add_to_cart(&ctx.session, &ctx.cart, "P002", Some(1)).unwrap();

        let response = grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: customer.id,
                email: Some("accounts@example.com".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            response.invoice.recipient.as_deref(),
            Some("accounts@example.com")
        );
        assert_eq!(transport.sent().await[0].recipient(), "accounts@example.com");
    }

    #[tokio::test]
    async fn test_grant_empty_cart_rejected() {
        let (ctx, _) = testing::context().await;
        let customer = credit_customer(&ctx);

        let err = grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: customer.id,
                email: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(list_credit_transactions(&ctx.session).is_empty());
    }

    #[tokio::test]
    async fn test_grant_to_unknown_customer() {
        let (ctx, _) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P002", Some(1)).unwrap();

        let err = grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: "CUST999".to_string(),
                email: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(ctx.session.with_session(|s| s.product("P002").unwrap().stock), 30);
    }

    #[tokio::test]
    async fn test_reminder_sent_without_changing_status() {
        let (ctx, transport) = testing::context().await;
        let customer = credit_customer(&ctx);
        add_to_cart(&ctx.session, &ctx.cart, "P001", Some(1)).unwrap();
        grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: customer.id,
                email: None,
            },
        )
        .await
        .unwrap();

        let response = send_credit_reminder(&ctx, "CR001").await.unwrap();

        assert_eq!(Some(response.recipient), customer.email);
        assert_eq!(transport.sent().await.last().unwrap().kind(), "credit-reminder");
        assert_eq!(
            list_credit_transactions(&ctx.session)[0].status,
            CreditStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_reminder_without_address_fails() {
        let (mut ctx, transport) = testing::context().await;
        let unreachable = Customer {
            id: "CUST900".to_string(),
            name: "No Mail".to_string(),
            email: None,
            loyalty_status: LoyaltyStatus::Regular,
            credit_allowed: true,
            credit_balance_cents: 0,
        };
        ctx.session = SessionState::new(
            Session::new(default_products()).with_customers(vec![unreachable]),
        );
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(1)).unwrap();

        let response = grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: "CUST900".to_string(),
                email: None,
            },
        )
        .await
        .unwrap();
        assert!(!response.invoice.attempted);

        let err = send_credit_reminder(&ctx, "CR001").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NoEmailAvailable);
        assert!(transport.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_reminder_delivery_failure_reported() {
        let (ctx, transport) = testing::context().await;
        let customer = credit_customer(&ctx);
        add_to_cart(&ctx.session, &ctx.cart, "P001", Some(1)).unwrap();
        grant_credit(
            &ctx,
            GrantCreditRequest {
                customer_id: customer.id,
                email: Some("ledger@example.com".to_string()),
            },
        )
        .await
        .unwrap();
        transport.fail_for("ledger@example.com").await;

        let err = send_credit_reminder(&ctx, "CR001").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmailDeliveryFailed);
        assert_eq!(
            list_credit_transactions(&ctx.session)[0].status,
            CreditStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_reminder_unknown_transaction() {
        let (ctx, _) = testing::context().await;

        let err = send_credit_reminder(&ctx, "CR404").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
