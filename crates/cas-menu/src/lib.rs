//! # cas-menu — Localized Screens & Pagination
//!
//! The pure, stateless rendering layer of the USSD service:
//!
//! - [`ScreenKey`] + [`text`] — the (language, key) → localized template
//!   lookup, with named `{placeholder}` substitution that never fails:
//!   an unresolved placeholder stays verbatim in the output and a
//!   diagnostic goes to the log, never to the subscriber.
//! - [`Pagination`] — pure slice-bound arithmetic for paged menus.
//! - [`county_menu`] — the paginated county-selection screen, counties in
//!   numeric-code order with navigation controls appended.
//!
//! The literal wording of the catalog is a data asset; the contract is the
//! lookup behavior, not the strings.

pub mod catalog;
pub mod menu;
pub mod pagination;

pub use catalog::{text, ScreenKey};
pub use menu::{county_menu, COUNTIES_PER_PAGE};
pub use pagination::Pagination;
