//! # cas-sms — Notification Gateway
//!
//! The SMS collaborator boundary. The USSD core only ever calls
//! [`NotificationGateway::send`] and discards the result after logging —
//! a notification failure must never abort a registration or surface to
//! the subscriber.
//!
//! Three implementations:
//!
//! - [`AfricasTalkingClient`] — real HTTP client for the Africa's Talking
//!   messaging API, per-request timeout so a slow gateway cannot hang a
//!   callback.
//! - [`NoopNotifier`] — used when credentials are absent; logs and drops.
//! - [`MemoryNotifier`] — records sent messages for test assertions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cas_core::PhoneNumber;
use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

/// Error crossing the notification boundary.
///
/// Observed and discarded by the orchestration layer; carried as a typed
/// error anyway so the log line says what actually happened.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("sms transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("sms gateway rejected request: status {status}, body: {body}")]
    Rejected { status: u16, body: String },

    /// Client is not configured with credentials.
    #[error("sms client not configured: {0}")]
    NotConfigured(String),
}

/// Outbound SMS, as consumed by the router.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send `message` to `phone`. Implementations must bound their own
    /// latency — the caller never applies a secondary timeout.
    async fn send(&self, phone: &PhoneNumber, message: &str) -> Result<(), NotifyError>;
}

// ── Africa's Talking client ─────────────────────────────────────────────────

/// Configuration for the Africa's Talking messaging API.
#[derive(Debug, Clone)]
pub struct AfricasTalkingConfig {
    /// Account username ("sandbox" for the test environment).
    pub username: String,
    /// API key sent in the `apiKey` header.
    pub api_key: String,
    /// Base URL of the messaging endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds (default 10).
    pub timeout_secs: u64,
}

impl AfricasTalkingConfig {
    /// Production messaging endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.africastalking.com/version1/messaging";

    /// Create a config with the production endpoint and default timeout.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Subset of the Africa's Talking response body we inspect.
#[derive(Debug, Deserialize)]
struct SmsResponse {
    #[serde(rename = "SMSMessageData")]
    message_data: SmsMessageData,
}

#[derive(Debug, Deserialize)]
struct SmsMessageData {
    #[serde(rename = "Recipients", default)]
    recipients: Vec<SmsRecipient>,
}

#[derive(Debug, Deserialize)]
struct SmsRecipient {
    #[serde(rename = "status")]
    status: String,
}

/// HTTP client for the Africa's Talking bulk messaging API.
#[derive(Debug, Clone)]
pub struct AfricasTalkingClient {
    client: reqwest::Client,
    config: AfricasTalkingConfig,
}

impl AfricasTalkingClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::NotConfigured`] if username or API key is empty,
    /// or if the underlying HTTP client cannot be constructed.
    pub fn new(config: AfricasTalkingConfig) -> Result<Self, NotifyError> {
        if config.username.trim().is_empty() || config.api_key.trim().is_empty() {
            return Err(NotifyError::NotConfigured(
                "username and api key are required".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifyError::NotConfigured(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl NotificationGateway for AfricasTalkingClient {
    async fn send(&self, phone: &PhoneNumber, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.config.base_url)
            .header("apiKey", &self.config.api_key)
            .header("Accept", "application/json")
            .form(&[
                ("username", self.config.username.as_str()),
                ("to", phone.as_str()),
                ("message", message),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }

        // The API reports per-recipient delivery status inside a 200/201.
        let body: SmsResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        if let Some(recipient) = body.message_data.recipients.first() {
            if recipient.status != "Success" {
                return Err(NotifyError::Rejected {
                    status: status.as_u16(),
                    body: format!("recipient status: {}", recipient.status),
                });
            }
        }

        tracing::info!(to = %phone, "confirmation sms dispatched");
        Ok(())
    }
}

// ── Test & fallback doubles ─────────────────────────────────────────────────

/// Notifier used when SMS credentials are not configured: logs and drops.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotificationGateway for NoopNotifier {
    async fn send(&self, phone: &PhoneNumber, message: &str) -> Result<(), NotifyError> {
        tracing::info!(to = %phone, body_len = message.len(), "sms client not configured, dropping message");
        Ok(())
    }
}

/// Records every message for later assertion. Optionally fails on demand
/// so tests can prove notification failure never surfaces to subscribers.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Arc<RwLock<Vec<(String, String)>>>,
    fail: Arc<RwLock<bool>>,
}

impl Clone for MemoryNotifier {
    fn clone(&self) -> Self {
        Self {
            sent: Arc::clone(&self.sent),
            fail: Arc::clone(&self.fail),
        }
    }
}

impl MemoryNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.fail.write() = failing;
    }

    /// Messages sent so far, as (phone, body) pairs.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().clone()
    }
}

#[async_trait]
impl NotificationGateway for MemoryNotifier {
    async fn send(&self, phone: &PhoneNumber, message: &str) -> Result<(), NotifyError> {
        if *self.fail.read() {
            return Err(NotifyError::Transport("simulated outage".to_string()));
        }
        self.sent
            .write()
            .push((phone.as_str().to_string(), message.to_string()));
        Ok(())
    }
}
