//! Backend for a chat bot's `roll` command: classifies free-form dice input,
//! plays the rolls and renders a transcript for the reply.

pub mod common;
pub mod config;
pub mod interaction;
pub mod logging;
pub mod parse;
pub mod roll;

pub use config::RollConfig;
pub use parse::{ast::ParsedInput, classify, classify_tokens};
pub use roll::{evaluate, Evaluation, RollError, RollOutcome};
