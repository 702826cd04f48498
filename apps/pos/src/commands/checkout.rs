//! # Checkout Commands
//!
//! Completes a cash or electronic sale and emails the receipt.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(request)                                                     │
//! │       │                                                                 │
//! │       ├── 1. Empty cart? ──────────────► INVALID_INPUT (nothing done)  │
//! │       │   Tender short / Credit? ─────► PAYMENT_ERROR / INVALID_INPUT  │
//! │       ├── 2. Simulated payment delay (awaited, not cancellable)        │
//! │       ├── 3. session.apply(checkout) ──► commit sale once per cart id  │
//! │       │        • stock decremented                                      │
//! │       │        • Transaction + Bill appended                            │
//! │       ├── 4. Cache products + bills (best effort)                      │
//! │       ├── 5. Clear cart (new id)                                       │
//! │       └── 6. Send receipt ──► ok: bill.email_sent = true               │
//! │                           └─► failed: reported in `receipt`,           │
//! │                               sale stays committed                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::AppContext;
use tripus_core::{Bill, CoreError, CustomerDetails, Tender, Transaction};

/// Checkout input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub tender: Tender,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// What happened to a receipt or invoice email.
///
/// A failed send never undoes the sale; it is only reported here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatus {
    /// False when there was no address to send to.
    pub attempted: bool,
    pub sent: bool,
    pub recipient: Option<String>,
    pub error: Option<String>,
}

impl DeliveryStatus {
    pub fn skipped() -> Self {
        DeliveryStatus::default()
    }

    pub fn from_result(recipient: &str, result: Result<(), ApiError>) -> Self {
        DeliveryStatus {
            attempted: true,
            sent: result.is_ok(),
            recipient: Some(recipient.to_string()),
            error: result.err().map(|e| e.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub transaction: Transaction,
    pub bill: Bill,
    /// Cash change; zero for electronic payments.
    pub change_cents: i64,
    pub receipt: DeliveryStatus,
}

/// Completes a non-credit checkout of the current cart.
///
/// ## Errors
/// - `INVALID_INPUT`: empty cart, or `Credit` passed as an electronic method
/// - `PAYMENT_ERROR`: cash received below the total
/// - `INSUFFICIENT_STOCK`: stock changed since the items were added
/// - `CONFLICT`: the cart was already committed
///
/// Email problems are never errors here; see [`DeliveryStatus`].
pub async fn checkout(ctx: &AppContext, request: CheckoutRequest) -> Result<CheckoutResponse, ApiError> {
    let cart = ctx.cart.snapshot();
    debug!(
        cart_id = %cart.id,
        items = cart.item_count(),
        method = %request.tender.method(),
        "checkout command"
    );

    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }
    request.tender.settle(cart.total())?;

    let delay = ctx.config.payment_delay();
    if !delay.is_zero() {
        debug!(delay_ms = delay.as_millis() as u64, "Processing payment");
        tokio::time::sleep(delay).await;
    }

    // Lines added while the payment was processing belong to this sale.
    let cart = ctx.cart.snapshot();

    let details = CustomerDetails {
        name: request.customer_name,
        email: request.customer_email,
    };
    let (receipt, products, bills) = ctx.session.apply(|s| {
        let (next, receipt) = s.checkout(&cart, request.tender, &details, Utc::now())?;
        let products = next.products().to_vec();
        let bills = next.bills().to_vec();
        Ok((next, (receipt, products, bills)))
    })?;

    info!(
        transaction_id = %receipt.transaction.id,
        bill_id = %receipt.bill.id,
        total = %receipt.transaction.total(),
        method = %receipt.transaction.payment_method,
        "Sale completed"
    );

    ctx.store.persist_products(&products).await;
    ctx.store.persist_bills(&bills).await;
    ctx.cart.clear_if(&cart.id);

    let mut bill = receipt.bill;
    let delivery = match receipt.receipt_recipient.as_deref() {
        Some(recipient) => {
            let delivery = send_receipt(ctx, &bill, recipient).await;
            if delivery.sent {
                bill.email_sent = true;
            }
            delivery
        }
        None => {
            debug!(bill_id = %bill.id, "No receipt address, skipping email");
            DeliveryStatus::skipped()
        }
    };

    Ok(CheckoutResponse {
        transaction: receipt.transaction,
        bill,
        change_cents: receipt.change.cents(),
        receipt: delivery,
    })
}

/// Sends the receipt and records the outcome on the stored bill.
async fn send_receipt(ctx: &AppContext, bill: &Bill, recipient: &str) -> DeliveryStatus {
    let settings = ctx.store.inner().snapshots().load_email_settings().await;
    let result = ctx
        .mailer
        .send_receipt(bill, recipient, &settings)
        .await
        .map_err(ApiError::from);

    if result.is_ok() {
        match ctx.session.apply(|s| {
            let next = s.mark_bill_emailed(&bill.id, true)?;
            let bills = next.bills().to_vec();
            Ok((next, bills))
        }) {
            Ok(bills) => ctx.store.persist_bills(&bills).await,
            Err(e) => warn!(bill_id = %bill.id, error = %e, "Could not mark bill emailed"),
        }
    }

    DeliveryStatus::from_result(recipient, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::testing;
    use tripus_core::{Money, PaymentMethod};

    fn cash(major: i64) -> CheckoutRequest {
        CheckoutRequest {
            tender: Tender::Cash {
                received: Money::from_major_minor(major, 0),
            },
            customer_name: Some("Asha".to_string()),
            customer_email: Some("asha@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let (ctx, _) = testing::context().await;

        let err = checkout(&ctx, cash(100)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(ctx.session.with_session(|s| s.transactions().is_empty()));
    }

    #[tokio::test]
    async fn test_cash_checkout_commits_and_returns_change() {
        let (ctx, transport) = testing::context().await;
        ctx.store
            .inner()
            .snapshots()
            .save_email_settings(&testing::configured_settings())
            .await
            .unwrap();
        add_to_cart(&ctx.session, &ctx.cart, "P001", Some(2)).unwrap();

        let response = checkout(&ctx, cash(200)).await.unwrap();

        assert_eq!(response.transaction.id, "TXN001");
        assert_eq!(response.bill.id, "BILL-0001");
        assert_eq!(response.change_cents, 4000);
        assert!(response.receipt.sent);
        assert!(response.bill.email_sent);
        assert_eq!(transport.sent().await.len(), 1);

        ctx.session.with_session(|s| {
            assert_eq!(s.product("P001").unwrap().stock, 48);
            assert!(s.bills()[0].email_sent);
        });
        assert!(ctx.cart.with_cart(|c| c.is_empty()));

        let cached = ctx.store.inner().snapshots().load_bills().await;
        assert_eq!(cached.len(), 1);
        assert!(cached[0].email_sent);
    }

    #[tokio::test]
    async fn test_short_cash_is_payment_error() {
        let (ctx, _) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P005", Some(1)).unwrap();

        let err = checkout(&ctx, cash(100)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(ctx.session.with_session(|s| s.product("P005").unwrap().stock), 15);
        assert!(!ctx.cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_receipt_failure_keeps_sale() {
        let (ctx, transport) = testing::context().await;
        ctx.store
            .inner()
            .snapshots()
            .save_email_settings(&testing::configured_settings())
            .await
            .unwrap();
        transport.fail_for("asha@example.com").await;
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(1)).unwrap();

        let response = checkout(&ctx, cash(25)).await.unwrap();

        assert!(response.receipt.attempted);
        assert!(!response.receipt.sent);
        assert!(response.receipt.error.is_some());
        assert!(!response.bill.email_sent);
        assert_eq!(ctx.session.with_session(|s| s.transactions().len()), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_settings_reported() {
        let (ctx, transport) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(1)).unwrap();

        let response = checkout(&ctx, cash(25)).await.unwrap();

        assert!(response.receipt.attempted);
        assert!(!response.receipt.sent);
        assert!(transport.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_electronic_without_email_skips_receipt() {
        let (ctx, transport) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P002", Some(1)).unwrap();

        let response = checkout(
            &ctx,
            CheckoutRequest {
                tender: Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                customer_name: None,
                customer_email: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.transaction.customer_name, "Walk-in Customer");
        assert_eq!(response.change_cents, 0);
        assert_eq!(response.receipt, DeliveryStatus::skipped());
        assert!(transport.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_credit_tender_rejected() {
        let (ctx, _) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P002", Some(1)).unwrap();

        let err = checkout(
            &ctx,
            CheckoutRequest {
                tender: Tender::Electronic {
                    method: PaymentMethod::Credit,
                },
                customer_name: None,
                customer_email: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_tender_rejected_before_payment_delay() {
        let (mut ctx, _) = testing::context().await;
        ctx.config.payment_delay_ms = 5_000;
        add_to_cart(&ctx.session, &ctx.cart, "P005", Some(1)).unwrap();

        let started = std::time::Instant::now();
        let err = checkout(&ctx, cash(100)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_items_added_during_delay_are_sold() {
        let (mut ctx, _) = testing::context().await;
        ctx.config.payment_delay_ms = 200;
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(1)).unwrap();

        let sale = checkout(
            &ctx,
            CheckoutRequest {
                tender: Tender::Electronic {
                    method: PaymentMethod::Card,
                },
                customer_name: None,
                customer_email: None,
            },
        );
        let late_add = async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            add_to_cart(&ctx.session, &ctx.cart, "P002", Some(1)).unwrap();
        };
        let (result, ()) = tokio::join!(sale, late_add);
        let response = result.unwrap();

        assert_eq!(response.transaction.items.len(), 2);
        assert_eq!(ctx.session.with_session(|s| s.product("P002").unwrap().stock), 29);
        assert!(ctx.cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_request_json_shape() {
        let request: CheckoutRequest = serde_json::from_str(
            r#"{"tender":{"type":"electronic","method":"UPI"},"customerEmail":"asha@example.com"}"#,
        )
        .unwrap();

        assert_eq!(
            request.tender,
            Tender::Electronic {
                method: PaymentMethod::Upi
            }
        );
        assert_eq!(request.customer_name, None);

        let json = serde_json::to_value(&cash(200)).unwrap();
        assert_eq!(json["tender"]["type"], "cash");
        assert_eq!(serde_json::from_value::<CheckoutRequest>(json).unwrap(), cash(200));
    }

    #[tokio::test]
    async fn test_payment_delay_is_awaited() {
        let (mut ctx, _) = testing::context().await;
        ctx.config.payment_delay_ms = 50;
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(1)).unwrap();

        let started = std::time::Instant::now();
        checkout(&ctx, cash(25)).await.unwrap();

        assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    }
}
