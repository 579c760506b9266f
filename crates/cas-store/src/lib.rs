//! # cas-store — Registration & Alert Gateways
//!
//! The USSD core treats durable storage as an external collaborator and
//! only ever talks to it through a trait. This crate owns:
//!
//! - The [`Registration`] and [`Alert`] record types.
//! - The [`RegistrationGateway`] and [`AlertQueryGateway`] traits the
//!   router is written against.
//! - In-memory reference implementations ([`InMemoryRegistry`],
//!   [`InMemoryAlertStore`]) used in production for single-process
//!   deployments and in every test.
//!
//! Alert authoring and approval happen elsewhere; from this crate's
//! perspective alerts are read-only apart from the [`InMemoryAlertStore::publish`]
//! ingestion seam.

pub mod alert;
pub mod error;
pub mod registry;

pub use alert::{Alert, AlertQueryGateway, InMemoryAlertStore};
pub use error::GatewayError;
pub use registry::{InMemoryRegistry, Registration, RegistrationGateway};
