//! Shared domain types for the advisor session client.
//!
//! Messages, conversation logs, session identities, service errors and
//! client configuration. No I/O and no async -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod session;
