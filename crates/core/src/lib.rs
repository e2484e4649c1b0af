//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block engine: the shape
//! catalog, pieces, the piece pool and queue, the hold slot, the grid, collision
//! detection, locking and row clearing. It has no dependencies on timers,
//! terminals or threads; the session crate drives it from a single owner.
//!
//! - **Deterministic**: the same seed (or the same explicit pool) always
//!   produces the same piece sequence
//! - **Validated**: no mutation is committed before the collision detector
//!   accepts it
//! - **Observable**: every committed mutation bumps a revision and records
//!   [`GameEvent`]s
//!
//! # Module Structure
//!
//! - [`shapes`]: hand-authored occupancy matrices and colors per orientation
//! - [`piece`]: a shape at an anchor, footprint computation
//! - [`generator`]: repeating shape pool and the fixed-length lookahead queue
//! - [`hold`]: hold slot with the once-per-lock rule
//! - [`grid`]: locked cells and row collapse
//! - [`collision`]: bounds and occupancy checks for candidate placements
//! - [`game_state`]: action dispatch, gravity steps, lock/clear/spawn, top-out
//! - [`snapshot`]: read-only copy for views
//! - [`config`]: validated session configuration
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::Action;
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//!
//! game.apply_action(Action::MoveRight);
//! game.apply_action(Action::RotateRight);
//! assert!(game.apply_action(Action::HardDrop));
//!
//! // The dropped piece is now part of the grid
//! assert_eq!(game.grid().occupied_count(), 4);
//! ```

pub mod collision;
pub mod config;
pub mod events;
pub mod game_state;
pub mod generator;
pub mod grid;
pub mod hold;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use events::{GameEvent, Phase};
pub use game_state::{GameState, Step};
pub use generator::{PieceGenerator, PieceQueue, PoolWrap};
pub use grid::Grid;
pub use hold::HoldSlot;
pub use piece::{Footprint, Piece, Point};
pub use rng::SimpleRng;
pub use shapes::{color_of, matrix_for, Matrix};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
