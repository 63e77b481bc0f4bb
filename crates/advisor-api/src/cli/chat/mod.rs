//! Interactive terminal chat with the advisor.
//!
//! This module is the presentation side of the session controller: it
//! collects the session ID, renders the conversation, reads user input and
//! handles slash commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
