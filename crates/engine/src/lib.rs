//! Session engine - drives a [`GameState`](blockfall_core::GameState) in real time
//!
//! The core crate is a pure state machine; this crate gives it a clock and an
//! owner. A [`Session`] runs one tokio worker that serializes gravity ticks and
//! player actions, and publishes snapshots and events after each mutation.
//!
//! # Example
//!
//! ```no_run
//! use blockfall_engine::{core::GameConfig, types::Action, Session};
//!
//! # async fn run() -> Result<(), blockfall_engine::SessionError> {
//! let session = Session::start(GameConfig::default())?;
//! let mut changes = session.watch();
//!
//! session.submit(Action::MoveLeft).await?;
//! changes.changed().await.ok();
//! println!("revision {}", changes.borrow().revision);
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod scheduler;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use scheduler::GravityScheduler;
pub use session::{Notification, Session, SessionError};
