//! Infrastructure layer for the advisor client.
//!
//! Implements the `AdvisorService` port from `advisor-core` over HTTP, and
//! loads client configuration from the data directory.

pub mod config;
pub mod http;
