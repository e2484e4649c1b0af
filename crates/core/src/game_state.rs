//! Game state module - the playfield state machine
//!
//! This module ties together the grid, the active piece, the queue and the hold
//! slot. Every mutation is validated by the collision detector before it is
//! committed; a downward step that is refused locks the piece, clears full rows
//! and spawns the next piece from the queue, all within the same call.
//!
//! The active piece is never painted into the grid. Its footprint before the
//! last committed mutation is kept so a view can erase it before drawing the
//! new one.

use log::{debug, info, trace, warn};

use crate::collision;
use crate::config::{ConfigError, GameConfig};
use crate::events::{GameEvent, Phase};
use crate::generator::{PieceGenerator, PieceQueue};
use crate::grid::Grid;
use crate::hold::HoldSlot;
use crate::piece::{Footprint, Piece};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Action, RotateDirection, ShapeKind};

/// Result of a single downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The piece moved down one row
    Fell,
    /// The piece could not move; it was locked and the next piece spawned
    Locked,
    /// Nothing to move (game over)
    Refused,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    hold: HoldSlot,
    /// Footprint of the active piece before the last committed mutation
    previous: Footprint,
    phase: Phase,
    /// Monotonic count of committed mutations
    revision: u64,
    /// Events since the last `take_events` (consumed by observers)
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game whose pieces come from a shuffled bag seeded by `config.seed`
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let generator = PieceGenerator::bag(config.seed).with_wrap(config.pool_wrap);
        Self::with_generator(config, generator)
    }

    /// Create a game that replays a fixed sequence of shapes
    pub fn with_pool(config: GameConfig, pool: Vec<ShapeKind>) -> Result<Self, ConfigError> {
        let generator = PieceGenerator::from_pool(pool)?.with_wrap(config.pool_wrap);
        Self::with_generator(config, generator)
    }

    /// Create a game from a prepared generator; its wrap mode is kept as is
    pub fn with_generator(config: GameConfig, generator: PieceGenerator) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawn = config.spawn_point();
        let mut queue = PieceQueue::new(generator, config.queue_length, spawn);
        let first = queue.advance();

        let mut state = Self {
            grid: Grid::new(config.width, config.height),
            active: None,
            queue,
            hold: HoldSlot::new(config.hold_once_per_lock),
            previous: Footprint::new(),
            phase: Phase::Falling,
            revision: 0,
            events: Vec::new(),
            config,
        };
        state.spawn(first);
        Ok(state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn held(&self) -> Option<Piece> {
        self.hold.held().copied()
    }

    pub fn can_hold(&self) -> bool {
        self.phase == Phase::Falling && self.hold.can_hold()
    }

    pub fn previous_footprint(&self) -> &[crate::piece::Point] {
        &self.previous
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take and clear the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Anchor row the active piece would rest at after a hard drop
    pub fn landing_y(&self) -> Option<i16> {
        let active = self.active?;
        let own = active.footprint();
        Some(active.y + collision::drop_distance(&self.grid, &active, &own))
    }

    /// Apply a player action. Returns false when the action was refused.
    pub fn apply_action(&mut self, action: Action) -> bool {
        if self.game_over() {
            trace!("{} refused: game over", action.as_str());
            return false;
        }

        let applied = match action {
            Action::MoveLeft => self.try_move(-1, 0),
            Action::MoveRight => self.try_move(1, 0),
            Action::RotateLeft => self.try_rotate(RotateDirection::Left),
            Action::RotateRight => self.try_rotate(RotateDirection::Right),
            Action::SoftDrop => self.step_down() != Step::Refused,
            Action::HardDrop => self.hard_drop(),
            Action::Hold => self.hold(),
        };

        trace!(
            "{} {}",
            action.as_str(),
            if applied { "applied" } else { "refused" }
        );
        applied
    }

    /// Gravity tick: one forced downward step
    pub fn tick(&mut self) -> Step {
        if self.game_over() {
            return Step::Refused;
        }
        self.step_down()
    }

    /// Shift the active piece by (dx, dy) if the destination is free
    pub fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let own = active.footprint();
        if !collision::can_move(&self.grid, &active, dx, dy, &own) {
            return false;
        }

        let moved = active.moved(dx, dy);
        self.events.push(GameEvent::Moved {
            from: (active.x, active.y),
            to: (moved.x, moved.y),
        });
        self.commit(moved, own);
        true
    }

    /// Turn the active piece in place; no kick search
    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let own = active.footprint();
        if !collision::can_rotate(&self.grid, &active, direction, &own) {
            return false;
        }

        let rotated = active.rotated(direction);
        self.events.push(GameEvent::Rotated {
            orientation: rotated.orientation,
        });
        self.commit(rotated, own);
        true
    }

    /// Move down one row, or lock when blocked
    pub fn step_down(&mut self) -> Step {
        let Some(active) = self.active else {
            return Step::Refused;
        };

        if self.try_move(0, 1) {
            return Step::Fell;
        }

        self.lock(active);
        self.revision += 1;
        Step::Locked
    }

    /// Drop the active piece as far as it goes and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let own = active.footprint();
        let distance = collision::drop_distance(&self.grid, &active, &own);
        let landed = active.moved(0, distance);
        if distance > 0 {
            self.events.push(GameEvent::Moved {
                from: (active.x, active.y),
                to: (landed.x, landed.y),
            });
        }

        self.lock(landed);
        self.revision += 1;
        true
    }

    /// Swap the active piece with the hold slot
    pub fn hold(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let spawn = self.config.spawn_point();
        let Some(next) = self.hold.swap(active, &mut self.queue, spawn) else {
            return false;
        };

        self.events.push(GameEvent::HoldSwapped {
            held: active.kind,
            active: next.kind,
        });
        self.previous = active.footprint();
        self.spawn(next);
        self.revision += 1;
        true
    }

    fn commit(&mut self, piece: Piece, previous: Footprint) {
        self.previous = previous;
        self.active = Some(piece);
        self.revision += 1;
    }

    /// Write the piece into the grid, clear rows and bring in the next piece.
    ///
    /// A piece whose cells are no longer free is discarded without a
    /// `Locked` event; the grid is left untouched.
    fn lock(&mut self, piece: Piece) {
        let cells = piece.footprint();
        if self.grid.lock_cells(&cells, piece.color()) {
            debug!(
                "locked {} at ({}, {}) rotated {}",
                piece.kind.as_str(),
                piece.x,
                piece.y,
                piece.orientation.degrees()
            );
            self.events.push(GameEvent::Locked {
                kind: piece.kind,
                cells: cells.to_vec(),
            });
        } else {
            warn!(
                "lock of {} at ({}, {}) overlaps the grid, piece discarded",
                piece.kind.as_str(),
                piece.x,
                piece.y
            );
        }

        let rows = self.grid.clear_full_rows(self.config.frozen_top_rows);
        if !rows.is_empty() {
            self.events.push(GameEvent::RowsCleared { rows });
        }

        self.hold.release();
        self.previous = cells;
        self.active = None;

        let next = self.queue.advance();
        self.spawn(next);
    }

    /// Make `piece` active, or end the game when it does not fit
    fn spawn(&mut self, piece: Piece) -> bool {
        if collision::fits(&self.grid, &piece, &[]) {
            self.active = Some(piece);
            self.events.push(GameEvent::Spawned { kind: piece.kind });
            return true;
        }

        info!(
            "top-out: {} cannot spawn at ({}, {})",
            piece.kind.as_str(),
            piece.x,
            piece.y
        );
        self.active = None;
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver);
        false
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.previous_footprint.clear();
        out.previous_footprint.extend_from_slice(&self.previous);
        out.landing_y = self.landing_y();
        out.next.clear();
        out.next.extend(self.queue.iter().map(|p| p.kind));
        out.held = self.hold.held().map(|p| p.kind);
        out.can_hold = self.can_hold();
        out.phase = self.phase;
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
