//! HTTP adapter for the advisor service.
//!
//! `client` talks to the two endpoints (`GET /session`, `POST /chat`);
//! `wire` holds the JSON shapes they speak and converts them to and from
//! the domain `Message` type.

pub mod client;
pub mod wire;

pub use client::HttpAdvisorService;
