//! # cas-router — The USSD Session State Machine
//!
//! The core of the service. Each gateway callback carries only a phone
//! number and the accumulated digit path; this crate reconstructs the
//! conversation and produces the next screen:
//!
//! 1. [`NavigationPath`] parses the raw path into discrete steps.
//! 2. [`decide`] is the pure, ordered routing table: given resolved
//!    context and the step sequence it picks exactly one [`Action`].
//!    First match wins; the precedence is auditable in one function.
//! 3. [`UssdRouter`] resolves context from the session store and the
//!    registration gateway, runs the decision, and executes its effects
//!    (store updates, registration, alert lookup, notification).
//!
//! ## Never fail visibly
//!
//! [`UssdRouter::handle`] is the single error boundary: any fault below
//! it is logged and mapped to the language-default main-menu fallback
//! screen. The protocol has no error screen — every code path emits a
//! valid `CON`/`END` response.

pub mod decision;
pub mod error;
pub mod path;
pub mod response;
pub mod router;

pub use decision::{decide, Action, Decision, RouteContext};
pub use error::RouteError;
pub use path::NavigationPath;
pub use response::UssdResponse;
pub use router::UssdRouter;
