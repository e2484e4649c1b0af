//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Action`]s for the terminal
//! runner. It holds no game state; the runner forwards every mapped action to
//! a session.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
