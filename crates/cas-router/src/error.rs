//! # Router Errors
//!
//! Faults that escape the per-branch handling inside the effect executor.
//! All of them stop at the [`crate::UssdRouter::handle`] boundary, which
//! maps them to the fallback screen — they never reach the transport.

use cas_store::GatewayError;
use thiserror::Error;

/// A routing fault caught by the top-level boundary.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A storage collaborator failed outside the branches that have their
    /// own localized degradation (registration and unsubscribe).
    #[error("storage gateway failure: {0}")]
    Gateway(#[from] GatewayError),
}
