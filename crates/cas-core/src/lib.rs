//! # cas-core — Foundational Types for the Climate Alert Stack
//!
//! Domain primitives shared by every other crate in the workspace:
//!
//! - [`PhoneNumber`] — validated subscriber identifier (the session key).
//! - [`Language`] — the closed language dimension (English / Kiswahili)
//!   that cuts across every menu screen.
//! - [`County`] — the fixed catalog of 8 counties with stable numeric
//!   codes, storage keys, and per-language display labels. Catalog order
//!   is numeric-code order, which governs menu rendering and pagination.
//! - [`RiskLevel`] — alert severity classification.
//!
//! ## Crate Policy
//!
//! - Sits at the bottom of the dependency DAG — depends on nothing internal.
//! - No I/O, no async, no global state. Pure data and validation.

pub mod county;
pub mod error;
pub mod language;
pub mod phone;
pub mod risk;

pub use county::County;
pub use error::ValidationError;
pub use language::Language;
pub use phone::PhoneNumber;
pub use risk::RiskLevel;
