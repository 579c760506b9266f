//! # Climate Alerts
//!
//! Read-only alert consumption for the USSD core: the router only ever
//! asks for "the latest approved alert for a county". Publication is an
//! ingestion seam used by ops tooling and tests; authoring and approval
//! workflows live outside this system.

use async_trait::async_trait;
use cas_core::{County, RiskLevel};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::GatewayError;

/// A climate alert for one county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub county: County,
    /// Risk category, e.g. "flood" or "drought". Free-form by design —
    /// new risk types must not require a schema change.
    pub risk_type: String,
    pub risk_level: RiskLevel,
    /// The approved, subscriber-facing message text.
    pub message: String,
    /// Only approved alerts are ever shown to subscribers.
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Build an approved alert stamped now. Convenience for ingestion and tests.
    pub fn approved(
        county: County,
        risk_type: impl Into<String>,
        risk_level: RiskLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            county,
            risk_type: risk_type.into(),
            risk_level,
            message: message.into(),
            approved: true,
            created_at: Utc::now(),
        }
    }
}

/// Alert lookup, as consumed by the router.
#[async_trait]
pub trait AlertQueryGateway: Send + Sync {
    /// The most recently created approved alert for `county`, if any.
    async fn latest_approved(&self, county: County) -> Result<Option<Alert>, GatewayError>;
}

// ── In-memory implementation ────────────────────────────────────────────────

/// Thread-safe in-memory alert store.
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    data: Arc<RwLock<Vec<Alert>>>,
}

impl Clone for InMemoryAlertStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl InMemoryAlertStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest an alert. Unapproved alerts are stored but never surfaced.
    pub fn publish(&self, alert: Alert) {
        self.data.write().push(alert);
    }

    /// Number of stored alerts, approved or not.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no alerts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AlertQueryGateway for InMemoryAlertStore {
    async fn latest_approved(&self, county: County) -> Result<Option<Alert>, GatewayError> {
        let guard = self.data.read();
        Ok(guard
            .iter()
            .filter(|a| a.approved && a.county == county)
            .max_by_key(|a| a.created_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn latest_approved_picks_most_recent_for_county() {
        let store = InMemoryAlertStore::new();
        let mut older = Alert::approved(County::Busia, "flood", RiskLevel::High, "older");
        older.created_at = Utc::now() - Duration::hours(2);
        store.publish(older);
        store.publish(Alert::approved(
            County::Busia,
            "flood",
            RiskLevel::Medium,
            "newer",
        ));
        store.publish(Alert::approved(
            County::Kisumu,
            "drought",
            RiskLevel::Low,
            "other county",
        ));

        let latest = store.latest_approved(County::Busia).await.unwrap().unwrap();
        assert_eq!(latest.message, "newer");
    }

    #[tokio::test]
    async fn unapproved_alerts_are_invisible() {
        let store = InMemoryAlertStore::new();
        let mut draft = Alert::approved(County::Garissa, "flood", RiskLevel::High, "draft");
        draft.approved = false;
        store.publish(draft);

        assert!(store.latest_approved(County::Garissa).await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn county_without_alerts_yields_none() {
        let store = InMemoryAlertStore::new();
        assert!(store.latest_approved(County::Makueni).await.unwrap().is_none());
    }
}
