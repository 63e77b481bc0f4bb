//! Observability setup for the advisor client.

pub mod tracing_setup;
