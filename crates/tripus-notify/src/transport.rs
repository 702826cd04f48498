//! # Email Transport
//!
//! The seam between the mailer and the network.
//!
//! ```text
//! ┌──────────┐   &EmailRequest   ┌────────────────────────┐   POST JSON   ┌──────────────┐
//! │  Mailer  │ ────────────────► │ dyn EmailTransport     │ ────────────► │ send-email   │
//! └──────────┘                   │  • HttpEmailTransport  │               │ endpoint     │
//!                                │  • RecordingTransport  │               └──────────────┘
//!                                └────────────────────────┘
//! ```
//!
//! ## Outcome Rules (HTTP)
//! - connect error or timeout          → `DeliveryFailed`
//! - non-2xx status                    → `Rejected { status, reason }`
//! - 2xx with `{"success": false}`     → `Rejected`
//! - any other 2xx                     → delivered
//!
//! No retries; a failed send is reported to the caller once.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::NotifyConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::message::EmailRequest;

/// Delivers one request to the email collaborator.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> NotifyResult<()>;
}

// =============================================================================
// HTTP
// =============================================================================

/// Optional envelope returned by the endpoint.
#[derive(Debug, Default, Deserialize)]
struct SendResponse {
    success: Option<bool>,
    error: Option<String>,
}

/// POSTs requests as JSON with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpEmailTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEmailTransport {
    pub fn new(config: &NotifyConfig) -> NotifyResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NotifyError::InvalidConfig(e.to_string()))?;

        Ok(HttpEmailTransport {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    async fn send(&self, request: &EmailRequest) -> NotifyResult<()> {
        debug!(
            kind = request.kind(),
            to = %request.recipient(),
            endpoint = %self.endpoint,
            "Posting email request"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let envelope: SendResponse = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() {
            let reason = envelope
                .error
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            warn!(status = status.as_u16(), reason = %reason, "Email endpoint rejected request");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        if envelope.success == Some(false) {
            let reason = envelope
                .error
                .unwrap_or_else(|| "Failed to send email".to_string());
            warn!(reason = %reason, "Email endpoint reported failure");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(())
    }
}

// =============================================================================
// Recording
// =============================================================================

/// Keeps requests in memory instead of sending them.
///
/// Used by tests and by `--offline` runs. Recipients registered with
/// [`fail_for`](Self::fail_for) are rejected.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<EmailRequest>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every future request addressed to `recipient`.
    pub async fn fail_for(&self, recipient: &str) {
        self.failing.lock().await.insert(recipient.to_string());
    }

    /// Requests accepted so far, in send order.
    pub async fn sent(&self) -> Vec<EmailRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, request: &EmailRequest) -> NotifyResult<()> {
        if self.failing.lock().await.contains(request.recipient()) {
            return Err(NotifyError::Rejected {
                status: 500,
                reason: format!("recipient {} is unreachable", request.recipient()),
            });
        }

        self.sent.lock().await.push(request.clone());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Vec<Value>>>;

    async fn accept(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        seen.lock().await.push(body);
        Json(json!({ "success": true }))
    }

    async fn reject() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Missing API key" })),
        )
    }

    async fn soft_fail() -> Json<Value> {
        Json(json!({ "success": false, "error": "Quota exceeded" }))
    }

    async fn plain_ok() -> &'static str {
        "sent"
    }

    /// Starts a local endpoint and returns its base URL.
    async fn serve() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/api/send-email", post(accept))
            .route("/reject", post(reject))
            .route("/soft-fail", post(soft_fail))
            .route("/plain", post(plain_ok))
            .with_state(seen.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), seen)
    }

    fn transport(url: String) -> HttpEmailTransport {
        HttpEmailTransport::new(&NotifyConfig {
            endpoint: url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn custom(to: &str) -> EmailRequest {
        EmailRequest::Custom {
            to: to.to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_http_delivers_json_body() {
        let (base, seen) = serve().await;
        let transport = transport(format!("{base}/api/send-email"));

        transport.send(&custom("jane@example.com")).await.unwrap();

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["type"], "custom");
        assert_eq!(seen[0]["to"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_http_error_status_is_rejected() {
        let (base, _) = serve().await;
        let transport = transport(format!("{base}/reject"));

        let err = transport.send(&custom("jane@example.com")).await.unwrap_err();
        match err {
            NotifyError::Rejected { status, reason } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Missing API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_success_false_is_rejected() {
        let (base, _) = serve().await;
        let transport = transport(format!("{base}/soft-fail"));

        let err = transport.send(&custom("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_http_non_json_success_is_delivered() {
        let (base, _) = serve().await;
        let transport = transport(format!("{base}/plain"));

        assert!(transport.send(&custom("jane@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_http_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = transport(format!("http://{addr}/api/send-email"));
        let err = transport.send(&custom("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryFailed(_)));
    }

    #[test]
    fn test_http_requires_valid_endpoint() {
        let config = NotifyConfig {
            endpoint: "ftp://mail".to_string(),
            timeout_secs: 5,
        };
        assert!(HttpEmailTransport::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_recording_transport() {
        let transport = RecordingTransport::new();
        transport.fail_for("down@example.com").await;

        transport.send(&custom("up@example.com")).await.unwrap();
        assert!(transport.send(&custom("down@example.com")).await.is_err());

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient(), "up@example.com");
    }
}
