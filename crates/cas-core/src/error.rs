//! # Validation Errors
//!
//! Structured error hierarchy for domain-primitive construction failures.

use thiserror::Error;

/// Errors raised when constructing a domain primitive from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Phone number is empty or exceeds the E.164-ish length ceiling.
    #[error("invalid phone number: {reason}")]
    InvalidPhoneNumber { reason: String },

    /// Language code is not part of the closed enumeration.
    #[error("unknown language code: {code}")]
    UnknownLanguage { code: String },

    /// County code does not name a catalog entry.
    #[error("unknown county code: {code}")]
    UnknownCounty { code: String },

    /// Risk level string is not part of the closed enumeration.
    #[error("unknown risk level: {value}")]
    UnknownRiskLevel { value: String },
}
