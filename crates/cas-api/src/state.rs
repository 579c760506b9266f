//! # Application State & Configuration
//!
//! Shared state for the Axum application and the environment-driven
//! configuration that assembles it. Gateway selection happens here:
//! with Africa's Talking credentials present the real SMS client is
//! wired in, otherwise a logging no-op notifier so the service stays
//! fully functional in development.

use std::sync::Arc;

use cas_router::UssdRouter;
use cas_session::SessionStore;
use cas_sms::{AfricasTalkingClient, AfricasTalkingConfig, NoopNotifier, NotificationGateway};
use cas_store::{InMemoryAlertStore, InMemoryRegistry, RegistrationGateway};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The USSD request handler.
    pub router: UssdRouter,
    /// Session store, shared with the router; the maintenance endpoint
    /// clears it directly.
    pub sessions: SessionStore,
    /// Alert ingestion seam, shared with the router's query gateway.
    pub alerts: InMemoryAlertStore,
    /// Secret guarding the session maintenance endpoint. `None` means the
    /// endpoint is disabled (every request is unauthorized).
    pub debug_secret: Option<String>,
}

impl AppState {
    /// Assemble state from configuration, wiring the default in-memory
    /// gateways and the configured SMS notifier.
    pub fn from_config(config: &AppConfig) -> Self {
        let sessions = SessionStore::new();
        let registry = InMemoryRegistry::new();
        let alerts = InMemoryAlertStore::new();
        let router = UssdRouter::new(
            sessions.clone(),
            Arc::new(registry),
            Arc::new(alerts.clone()),
            config.notifier(),
        );
        Self {
            router,
            sessions,
            alerts,
            debug_secret: config.debug_secret.clone(),
        }
    }

    /// Assemble state around explicit gateway implementations. Used by
    /// tests to substitute recording or failing collaborators.
    pub fn with_gateways(
        registrations: Arc<dyn RegistrationGateway>,
        alerts: InMemoryAlertStore,
        notifier: Arc<dyn NotificationGateway>,
        debug_secret: Option<String>,
    ) -> Self {
        let sessions = SessionStore::new();
        let router = UssdRouter::new(
            sessions.clone(),
            registrations,
            Arc::new(alerts.clone()),
            notifier,
        );
        Self {
            router,
            sessions,
            alerts,
            debug_secret,
        }
    }
}

/// Environment-driven service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port (`PORT`, default 8080).
    pub port: u16,
    /// Maintenance endpoint secret (`USSD_DEBUG_SECRET`).
    pub debug_secret: Option<String>,
    /// Africa's Talking account username (`AT_USERNAME`).
    pub at_username: Option<String>,
    /// Africa's Talking API key (`AT_API_KEY`).
    pub at_api_key: Option<String>,
    /// Override for the messaging endpoint (`AT_BASE_URL`); the sandbox
    /// environment uses a different host than production.
    pub at_base_url: Option<String>,
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 8080;

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok()),
            debug_secret: non_empty(std::env::var("USSD_DEBUG_SECRET").ok()),
            at_username: non_empty(std::env::var("AT_USERNAME").ok()),
            at_api_key: non_empty(std::env::var("AT_API_KEY").ok()),
            at_base_url: non_empty(std::env::var("AT_BASE_URL").ok()),
        }
    }

    /// Build the SMS notifier this configuration calls for.
    ///
    /// Missing or rejected credentials degrade to the no-op notifier with
    /// a warning; registration still works, only the confirmation SMS is
    /// dropped.
    pub fn notifier(&self) -> Arc<dyn NotificationGateway> {
        let (Some(username), Some(api_key)) = (&self.at_username, &self.at_api_key) else {
            tracing::warn!("AT_USERNAME / AT_API_KEY not set, confirmation sms disabled");
            return Arc::new(NoopNotifier);
        };

        let mut sms = AfricasTalkingConfig::new(username.clone(), api_key.clone());
        if let Some(base_url) = &self.at_base_url {
            sms.base_url = base_url.clone();
        }
        match AfricasTalkingClient::new(sms) {
            Ok(client) => Arc::new(client),
            Err(error) => {
                tracing::warn!(%error, "sms client rejected configuration, confirmation sms disabled");
                Arc::new(NoopNotifier)
            }
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        None => AppConfig::DEFAULT_PORT,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(port = %value, "unparseable PORT, using default");
            AppConfig::DEFAULT_PORT
        }),
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_and_parses() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("9000".to_string())), 9000);
        assert_eq!(parse_port(Some("not-a-port".to_string())), 8080);
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("s3cret".to_string())), Some("s3cret".to_string()));
    }

    #[test]
    fn missing_credentials_fall_back_to_noop_notifier() {
        let config = AppConfig {
            port: 8080,
            debug_secret: None,
            at_username: None,
            at_api_key: Some("key".to_string()),
            at_base_url: None,
        };
        // Must not panic and must produce a usable notifier.
        let _notifier = config.notifier();
    }
}
