//! Hold slot - one piece set aside by the player
//!
//! Holding never touches the grid. It only moves pieces between the active
//! slot, the hold slot and the queue head.

use crate::generator::PieceQueue;
use crate::piece::Piece;

#[derive(Debug, Clone)]
pub struct HoldSlot {
    held: Option<Piece>,
    /// Set after a hold, cleared on the next lock
    used: bool,
    once_per_lock: bool,
}

impl HoldSlot {
    pub fn new(once_per_lock: bool) -> Self {
        Self {
            held: None,
            used: false,
            once_per_lock,
        }
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// Whether a hold would currently be accepted
    pub fn can_hold(&self) -> bool {
        !(self.once_per_lock && self.used)
    }

    /// Park `active` and return the piece that replaces it.
    ///
    /// An empty slot takes the next piece from the queue (which refills by one);
    /// an occupied slot swaps. Both pieces are put back on the spawn anchor with
    /// their orientation kept. Returns `None` when the once-per-lock rule refuses.
    pub fn swap(&mut self, active: Piece, queue: &mut PieceQueue, spawn: (i16, i16)) -> Option<Piece> {
        if !self.can_hold() {
            return None;
        }

        let parked = active.at(spawn.0, spawn.1);
        let next = match self.held.replace(parked) {
            Some(previous) => previous.at(spawn.0, spawn.1),
            None => queue.advance(),
        };
        self.used = true;
        Some(next)
    }

    /// Re-arm the slot after a lock
    pub fn release(&mut self) {
        self.used = false;
    }
}
