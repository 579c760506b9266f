//! # Subscriber Registrations
//!
//! Durable record binding a subscriber to a county and language for alert
//! delivery, plus the gateway trait and in-memory implementation.
//!
//! Registrations are keyed by phone number; upsert is the only write path
//! from the USSD core and `deactivate` flips the active flag only.

use async_trait::async_trait;
use cas_core::{County, Language, PhoneNumber};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GatewayError;

/// A subscriber's durable alert registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique key.
    pub phone_number: PhoneNumber,
    /// County the subscriber receives alerts for.
    pub county: County,
    /// Language for menus, confirmations, and alert SMS.
    pub language: Language,
    /// Unsubscribe flips this to `false`; the record itself survives.
    pub active: bool,
    /// When the most recent alert SMS went out, if any.
    pub last_alert_sent: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Durable registration storage, as consumed by the router.
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Look up the registration for `phone`, if any.
    async fn find_by_phone(&self, phone: &PhoneNumber)
        -> Result<Option<Registration>, GatewayError>;

    /// Create or update the registration for `phone`, setting county,
    /// language, and `active = true`. Returns the stored record.
    async fn upsert(
        &self,
        phone: &PhoneNumber,
        county: County,
        language: Language,
    ) -> Result<Registration, GatewayError>;

    /// Set `active = false` for `phone`. A missing record is not an error —
    /// unsubscribe is idempotent.
    async fn deactivate(&self, phone: &PhoneNumber) -> Result<(), GatewayError>;
}

// ── In-memory implementation ────────────────────────────────────────────────

/// Thread-safe in-memory registration store.
///
/// The lock is `parking_lot` and never held across `.await` — the async
/// trait surface exists for the collaborator seam, not because the
/// reference implementation blocks.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    data: Arc<RwLock<HashMap<String, Registration>>>,
}

impl Clone for InMemoryRegistry {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations (active and inactive).
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RegistrationGateway for InMemoryRegistry {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Registration>, GatewayError> {
        Ok(self.data.read().get(phone.as_str()).cloned())
    }

    async fn upsert(
        &self,
        phone: &PhoneNumber,
        county: County,
        language: Language,
    ) -> Result<Registration, GatewayError> {
        let now = Utc::now();
        let mut guard = self.data.write();
        let record = guard
            .entry(phone.as_str().to_string())
            .and_modify(|existing| {
                existing.county = county;
                existing.language = language;
                existing.active = true;
                existing.updated_at = now;
            })
            .or_insert_with(|| Registration {
                phone_number: phone.clone(),
                county,
                language,
                active: true,
                last_alert_sent: None,
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn deactivate(&self, phone: &PhoneNumber) -> Result<(), GatewayError> {
        let mut guard = self.data.write();
        if let Some(record) = guard.get_mut(phone.as_str()) {
            record.active = false;
            record.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(s: &str) -> PhoneNumber {
        PhoneNumber::new(s).unwrap()
    }

    #[tokio::test]
    async fn upsert_creates_active_registration() {
        let registry = InMemoryRegistry::new();
        let record = registry
            .upsert(&phone("0700000000"), County::Busia, Language::En)
            .await
            .unwrap();
        assert!(record.active);
        assert_eq!(record.county, County::Busia);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn upsert_updates_in_place_never_duplicates() {
        let registry = InMemoryRegistry::new();
        let p = phone("0700000000");
        registry
            .upsert(&p, County::Busia, Language::En)
            .await
            .unwrap();
        let updated = registry
            .upsert(&p, County::Nairobi, Language::Sw)
            .await
            .unwrap();

        assert_eq!(registry.len(), 1, "re-registration must update, not duplicate");
        assert_eq!(updated.county, County::Nairobi);
        assert_eq!(updated.language, Language::Sw);
        assert!(updated.active);
    }

    #[tokio::test]
    async fn upsert_reactivates_after_unsubscribe() {
        let registry = InMemoryRegistry::new();
        let p = phone("0700000000");
        registry
            .upsert(&p, County::Kilifi, Language::En)
            .await
            .unwrap();
        registry.deactivate(&p).await.unwrap();
        let record = registry
            .upsert(&p, County::Kilifi, Language::En)
            .await
            .unwrap();
        assert!(record.active);
    }

    #[tokio::test]
    async fn deactivate_is_idempotent_even_for_missing_records() {
        let registry = InMemoryRegistry::new();
        let p = phone("0799999999");
        // Never registered: still Ok.
        registry.deactivate(&p).await.unwrap();

        registry
            .upsert(&p, County::Turkana, Language::Sw)
            .await
            .unwrap();
        registry.deactivate(&p).await.unwrap();
        registry.deactivate(&p).await.unwrap();

        let record = registry.find_by_phone(&p).await.unwrap().unwrap();
        assert!(!record.active);
        assert_eq!(record.county, County::Turkana, "deactivate touches only the flag");
    }

    #[tokio::test]
    async fn find_by_phone_misses_cleanly() {
        let registry = InMemoryRegistry::new();
        assert!(registry
            .find_by_phone(&phone("0700000001"))
            .await
            .unwrap()
            .is_none());
    }
}
