//! # Mailer
//!
//! Builds email requests from domain records and hands them to a transport.
//!
//! Every send is awaited by the caller and attempted exactly once. The mailer
//! never touches sales or ledger state, so a failure here cannot undo a
//! committed checkout or credit grant.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{NotifyError, NotifyResult};
use crate::message::EmailRequest;
use crate::transport::EmailTransport;
use tripus_core::{Bill, CreditTransaction, EmailSettings, ReminderRequest, TeamMessage};

/// Outcome of a sequential batch of team messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub delivered: usize,
    /// Recipients whose send failed.
    pub failed: Vec<String>,
}

#[derive(Clone)]
pub struct Mailer {
    transport: Arc<dyn EmailTransport>,
}

impl Mailer {
    pub fn new(transport: Arc<dyn EmailTransport>) -> Self {
        Mailer { transport }
    }

    /// Sends a checkout receipt.
    ///
    /// ## Errors
    /// - `NotConfigured` when the sender settings lack an API key or address;
    ///   nothing is sent
    /// - transport errors otherwise
    pub async fn send_receipt(
        &self,
        bill: &Bill,
        recipient: &str,
        settings: &EmailSettings,
    ) -> NotifyResult<()> {
        if !settings.is_configured() {
            warn!(bill_id = %bill.id, "Receipt not sent: email settings incomplete");
            return Err(NotifyError::NotConfigured);
        }

        self.dispatch(EmailRequest::receipt(bill, recipient, settings))
            .await?;
        info!(bill_id = %bill.id, to = %recipient, "Receipt sent");
        Ok(())
    }

    /// Sends the invoice for newly granted credit.
    pub async fn send_credit_invoice(
        &self,
        transaction: &CreditTransaction,
        recipient: &str,
    ) -> NotifyResult<()> {
        self.dispatch(EmailRequest::credit_invoice(transaction, recipient))
            .await?;
        info!(credit_id = %transaction.id, to = %recipient, "Credit invoice sent");
        Ok(())
    }

    /// Sends a credit reminder. The credit status is never touched.
    pub async fn send_reminder(&self, reminder: &ReminderRequest) -> NotifyResult<()> {
        self.dispatch(EmailRequest::credit_reminder(reminder)).await?;
        info!(
            credit_id = %reminder.transaction_id,
            to = %reminder.recipient,
            "Credit reminder sent"
        );
        Ok(())
    }

    pub async fn send_custom(&self, message: &TeamMessage) -> NotifyResult<()> {
        self.dispatch(EmailRequest::custom(message)).await
    }

    /// Sends team messages one after another. A failed send does not stop
    /// the batch.
    pub async fn send_team_messages(&self, messages: &[TeamMessage]) -> BatchReport {
        let mut report = BatchReport {
            attempted: messages.len(),
            ..BatchReport::default()
        };

        for message in messages {
            match self.send_custom(message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(to = %message.to, error = %e, "Team message failed");
                    report.failed.push(message.to.clone());
                }
            }
        }

        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            "Team messages sent"
        );
        report
    }

    async fn dispatch(&self, request: EmailRequest) -> NotifyResult<()> {
        self.transport.send(&request).await.inspect_err(|e| {
            warn!(kind = request.kind(), to = %request.recipient(), error = %e, "Email send failed");
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
