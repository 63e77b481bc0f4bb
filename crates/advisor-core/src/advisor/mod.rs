//! Port to the remote advisor service.

pub mod box_service;
pub mod service;
