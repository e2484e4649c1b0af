//! Generator module - repeating pool of shapes and the lookahead queue
//!
//! The generator owns a finite pool that is filled once and then replayed in
//! order forever. The default pool is one 7-bag (each shape once) shuffled by a
//! seeded LCG, so the cycle itself repeats identically.
//!
//! By default the cursor restarts when it reaches the end of the pool minus
//! one, so the final pool entry is never drawn ([`PoolWrap::Legacy`]).
//! [`PoolWrap::Full`] cycles through every entry.
//!
//! The queue keeps a fixed number of upcoming pieces. Each advance hands out the
//! head and generates exactly one replacement at the tail.

use std::collections::VecDeque;

use serde::Deserialize;

use crate::config::ConfigError;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::ShapeKind;

/// Where the generator cursor restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolWrap {
    /// Restart once the cursor reaches `len - 1`; the last entry is skipped
    #[default]
    Legacy,
    /// Restart after the last entry
    Full,
}

impl PoolWrap {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Some(PoolWrap::Legacy),
            "full" => Some(PoolWrap::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PoolWrap::Legacy => "legacy",
            PoolWrap::Full => "full",
        }
    }
}

/// Cycles through a fixed pool of shapes
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    pool: Vec<ShapeKind>,
    cursor: usize,
    wrap: PoolWrap,
}

impl PieceGenerator {
    /// One of each shape, shuffled once with the given seed
    pub fn bag(seed: u32) -> Self {
        let mut pool = ShapeKind::ALL.to_vec();
        SimpleRng::new(seed).shuffle(&mut pool);
        Self {
            pool,
            cursor: 0,
            wrap: PoolWrap::default(),
        }
    }

    /// Replay an explicit sequence of shapes
    pub fn from_pool(pool: Vec<ShapeKind>) -> Result<Self, ConfigError> {
        if pool.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        Ok(Self {
            pool,
            cursor: 0,
            wrap: PoolWrap::default(),
        })
    }

    pub fn with_wrap(mut self, wrap: PoolWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Return the shape under the cursor and advance.
    ///
    /// The cursor restarts before reading once it has reached the cycle
    /// length, so a legacy pool of one or two entries always yields the first.
    pub fn draw(&mut self) -> ShapeKind {
        if self.cursor >= self.cycle_len() {
            self.cursor = 0;
        }
        let kind = self.pool[self.cursor];
        self.cursor += 1;
        kind
    }

    /// Number of entries drawn before the sequence repeats
    pub fn cycle_len(&self) -> usize {
        match self.wrap {
            PoolWrap::Legacy => self.pool.len().saturating_sub(1).max(1),
            PoolWrap::Full => self.pool.len(),
        }
    }

    pub fn pool(&self) -> &[ShapeKind] {
        &self.pool
    }
}

/// Fixed-length buffer of upcoming pieces, all placed at the spawn anchor
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pending: VecDeque<Piece>,
    generator: PieceGenerator,
    spawn: (i16, i16),
}

impl PieceQueue {
    /// Fill a queue of `len` pieces from the generator
    pub fn new(mut generator: PieceGenerator, len: usize, spawn: (i16, i16)) -> Self {
        let pending = (0..len)
            .map(|_| Piece::new(generator.draw(), spawn.0, spawn.1))
            .collect();
        Self {
            pending,
            generator,
            spawn,
        }
    }

    /// Hand out the head and append one freshly generated piece at the tail
    pub fn advance(&mut self) -> Piece {
        let fresh = Piece::new(self.generator.draw(), self.spawn.0, self.spawn.1);
        self.pending.push_back(fresh);
        self.pending.pop_front().unwrap_or(fresh)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pending.iter()
    }

    /// Shapes of the upcoming pieces, head first
    pub fn kinds(&self) -> Vec<ShapeKind> {
        self.pending.iter().map(|p| p.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
