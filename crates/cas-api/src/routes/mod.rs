//! Route handlers.

pub mod maintenance;
pub mod ussd;
