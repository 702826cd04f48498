//! # Email Request Contract
//!
//! JSON bodies POSTed to the send-email endpoint, discriminated by `type`.
//!
//! ```text
//! { "type": "receipt",         customerName, customerEmail, transactionId,
//!                              items[], total, paymentMethod, date, emailSettings? }
//! { "type": "credit-reminder", customerName, customerEmail, transactionId,
//!                              amount, dueDate, status }
//! { "type": "custom",          to, subject, html }
//! ```
//!
//! Amounts travel as major currency units (e.g. `24.97`).

use serde::{Deserialize, Serialize};

use tripus_core::{
    Bill, CartItem, CreditTransaction, EmailSettings, PaymentMethod, ReminderRequest, TeamMessage,
};

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<&CartItem> for ReceiptLine {
    fn from(item: &CartItem) -> Self {
        ReceiptLine {
            code: item.code.clone(),
            name: item.name.clone(),
            price: item.unit_price().as_major_f64(),
            quantity: item.quantity,
        }
    }
}

/// A request to the email collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EmailRequest {
    /// Sale receipt or credit invoice.
    #[serde(rename_all = "camelCase")]
    Receipt {
        customer_name: String,
        customer_email: String,
        transaction_id: String,
        items: Vec<ReceiptLine>,
        total: f64,
        payment_method: String,
        date: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email_settings: Option<EmailSettings>,
    },

    /// Reminder for a pending credit transaction.
    #[serde(rename_all = "camelCase")]
    CreditReminder {
        customer_name: String,
        customer_email: String,
        transaction_id: String,
        amount: f64,
        due_date: String,
        status: String,
    },

    /// Free-form HTML message.
    Custom {
        to: String,
        subject: String,
        html: String,
    },
}

impl EmailRequest {
    /// Receipt for a completed checkout, carrying the sender settings.
    pub fn receipt(bill: &Bill, recipient: &str, settings: &EmailSettings) -> Self {
        EmailRequest::Receipt {
            customer_name: bill.customer_name.clone(),
            customer_email: recipient.to_string(),
            transaction_id: bill.id.clone(),
            items: bill.items.iter().map(ReceiptLine::from).collect(),
            total: bill.total().as_major_f64(),
            payment_method: bill.payment_method.label().to_string(),
            date: bill.date.to_rfc3339(),
            email_settings: Some(settings.clone()),
        }
    }

    /// Invoice for freshly granted credit.
    pub fn credit_invoice(transaction: &CreditTransaction, recipient: &str) -> Self {
        EmailRequest::Receipt {
            customer_name: transaction.customer_name.clone(),
            customer_email: recipient.to_string(),
            transaction_id: transaction.id.clone(),
            items: transaction.items.iter().map(ReceiptLine::from).collect(),
            total: transaction.amount().as_major_f64(),
            payment_method: PaymentMethod::Credit.label().to_string(),
            date: transaction.date.to_string(),
            email_settings: None,
        }
    }

    pub fn credit_reminder(reminder: &ReminderRequest) -> Self {
        EmailRequest::CreditReminder {
            customer_name: reminder.customer_name.clone(),
            customer_email: reminder.recipient.clone(),
            transaction_id: reminder.transaction_id.clone(),
            amount: reminder.amount.as_major_f64(),
            due_date: reminder.due_date.to_string(),
            status: reminder.status.to_string(),
        }
    }

    pub fn custom(message: &TeamMessage) -> Self {
        EmailRequest::Custom {
            to: message.to.clone(),
            subject: message.subject.clone(),
            html: message.html.clone(),
        }
    }

    /// Address the request is delivered to.
    pub fn recipient(&self) -> &str {
        match self {
            EmailRequest::Receipt { customer_email, .. }
            | EmailRequest::CreditReminder { customer_email, .. } => customer_email,
            EmailRequest::Custom { to, .. } => to,
        }
    }

    /// Wire name of the request type.
    pub fn kind(&self) -> &'static str {
        match self {
            EmailRequest::Receipt { .. } => "receipt",
            EmailRequest::CreditReminder { .. } => "credit-reminder",
            EmailRequest::Custom { .. } => "custom",
        }
    }
}
