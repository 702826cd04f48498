//! # Export Commands
//!
//! Transactions CSV for download or `tripus export`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::state::{ConfigState, SessionState};
use tripus_core::export::{export_file_name, transactions_csv};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    /// Suggested name, `transactions_YYYY-MM-DD.csv`.
    pub file_name: String,
    pub contents: String,
    pub rows: usize,
}

/// Flattens the session's transaction history into CSV.
pub fn export_transactions(
    session: &SessionState,
    config: &ConfigState,
    today: NaiveDate,
) -> CsvExport {
    debug!("export_transactions command");

    let (contents, rows) = session.with_session(|s| {
        (
            transactions_csv(s.transactions(), &config.currency_symbol),
            s.transactions().len(),
        )
    });

    info!(rows = rows, "Transactions exported");
    CsvExport {
        file_name: export_file_name(today),
        contents,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::checkout::{checkout, CheckoutRequest};
    use crate::testing;
    use tripus_core::{Money, Tender};

    #[tokio::test]
    async fn test_empty_history_is_header_only() {
        let (ctx, _) = testing::context().await;

        let export = export_transactions(&ctx.session, &ctx.config, testing::today());

        assert_eq!(export.file_name, "transactions_2024-06-10.csv");
        assert_eq!(export.rows, 0);
        assert_eq!(export.contents.lines().count(), 1);
        assert!(export.contents.starts_with("\"Date\",\"Transaction ID\""));
    }

    #[tokio::test]
    async fn test_export_includes_checkout() {
        let (ctx, _) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P003", Some(2)).unwrap();
        checkout(
            &ctx,
            CheckoutRequest {
                tender: Tender::Cash {
                    received: Money::from_major_minor(50, 0),
                },
                customer_name: Some("Ravi".to_string()),
                customer_email: None,
            },
        )
        .await
        .unwrap();

        let export = export_transactions(&ctx.session, &ctx.config, testing::today());

        assert_eq!(export.rows, 1);
        let row = export.contents.lines().nth(1).unwrap();
        assert!(row.contains("\"TXN001\""));
        assert!(row.contains("\"Bread (2)\""));
        assert!(row.contains("₹50"));
    }
}
