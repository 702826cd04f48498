//! # CSV Export
//!
//! Flattens transaction history into a quoted CSV table.
//!
//! ```text
//! "Date","Transaction ID","Customer","Items","Total Amount","Payment Method","Status"
//! "2024-06-10","TXN001","John Doe","Premium T-Shirt (2); Denim Jeans (1)","₹2497","Card","completed"
//! ```
//!
//! Every field is double-quoted and embedded quotes are doubled. Rows are
//! joined with `\n` and there is no trailing newline, so an empty history
//! renders as the header line alone.

use chrono::NaiveDate;

use crate::types::Transaction;

/// Column headers, in order.
pub const CSV_HEADER: [&str; 7] = [
    "Date",
    "Transaction ID",
    "Customer",
    "Items",
    "Total Amount",
    "Payment Method",
    "Status",
];

/// Renders transactions as CSV, totals prefixed with `currency_symbol`.
pub fn transactions_csv(transactions: &[Transaction], currency_symbol: &str) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(transactions.len() + 1);
    rows.push(csv_row(CSV_HEADER.iter().map(|h| h.to_string())));

    for transaction in transactions {
        let items = transaction
            .items
            .iter()
            .map(|item| format!("{} ({})", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join("; ");

        rows.push(csv_row([
            transaction.date.date_naive().format("%Y-%m-%d").to_string(),
            transaction.id.clone(),
            transaction.customer_name.clone(),
            items,
            format!("{}{}", currency_symbol, transaction.total().plain()),
            transaction.payment_method.to_string(),
            transaction.status.to_string(),
        ]));
    }

    rows.join("\n")
}

/// Suggested download name, e.g. `transactions_2024-06-10.csv`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("transactions_{}.csv", date.format("%Y-%m-%d"))
}

fn csv_row(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

// =============================================================================
// Unit Tests
// =============================================================================
