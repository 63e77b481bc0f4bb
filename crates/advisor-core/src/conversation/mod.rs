//! The session conversation controller and the state it publishes.
//!
//! `SessionController` owns the session identity and conversation log and
//! serializes all requests behind a single busy flag. Presentation code
//! reads `ConversationSnapshot`s and never mutates them.

pub mod controller;
pub mod error;
pub mod snapshot;
