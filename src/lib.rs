//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,engine,input,types}` and
//! carries the plain text view used by the terminal runner.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub mod view;
