//! Data models shared across services
//!
//! Kept separate from the raw API response types under `api`; services only
//! ever hand these to the report assembler.

pub mod billing;

pub use billing::{Billing, ServiceBilling};
