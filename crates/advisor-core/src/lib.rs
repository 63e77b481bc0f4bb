//! Session conversation logic for the advisor client.
//!
//! This crate defines the `AdvisorService` port that the infrastructure
//! layer implements, and the `SessionController` that keeps the local
//! conversation in sync with the service. It depends only on
//! `advisor-types` -- never on `advisor-infra` or any HTTP crate.

pub mod advisor;
pub mod conversation;
