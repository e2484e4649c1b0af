//! Seeded RNG for ordering the piece pool
//!
//! The same seed always yields the same pool order, so a session can be
//! replayed from its configuration alone.

/// LCG multiplier and increment (Numerical Recipes), modulus 2^32
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 would lock the generator onto a fixed cycle start; it maps to 1
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }

    /// Uniform-ish value in `0..bound`; 0 when `bound` is 0
    pub fn below(&mut self, bound: u32) -> u32 {
        match bound {
            0 => 0,
            _ => self.next_u32() % bound,
        }
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}
