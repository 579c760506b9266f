//! # Phone Number Newtype
//!
//! The subscriber's phone number is the key for both the ephemeral session
//! store and the durable registration store. A distinct type prevents it
//! from being confused with the gateway session id or free-form text.
//!
//! ## Validation
//!
//! Non-empty after trimming and at most 15 characters (E.164 maximum).
//! Leading `+` and digits only is deliberately NOT enforced — gateway
//! sandboxes send test identifiers that are not valid MSISDNs.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated subscriber phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Maximum length accepted, matching the E.164 ceiling.
    pub const MAX_LEN: usize = 15;

    /// Create a phone number, validating non-emptiness and length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhoneNumber`] if the trimmed value
    /// is empty or longer than [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidPhoneNumber {
                reason: "must not be empty".to_string(),
            });
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(ValidationError::InvalidPhoneNumber {
                reason: format!("must not exceed {} characters", Self::MAX_LEN),
            });
        }
        Ok(Self(trimmed))
    }

    /// Access the phone number string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
