//! # Gateway Errors
//!
//! Failures crossing the storage collaborator boundary. The router catches
//! these at the orchestration layer and degrades to a localized message —
//! they never become transport-level errors.

use thiserror::Error;

/// Error returned by registration and alert gateways.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The backing store could not be reached or the operation timed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the record content could not be interpreted.
    #[error("corrupt record for {key}: {reason}")]
    CorruptRecord { key: String, reason: String },
}
