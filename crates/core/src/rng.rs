//! RNG module - one-piece lookahead queue
//!
//! Each refill is an independent uniform draw from the active catalog; there
//! is no bag and no fairness guarantee.
//!
//! The generator is a small LCG so a whole game is reproducible from its seed.

use crate::pieces::all_shapes;
use crate::types::{PieceKind, PieceSet};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Holds exactly one upcoming piece
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    set: PieceSet,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a queue and fill the lookahead slot
    pub fn new(seed: u32, set: PieceSet) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::pick(&mut rng, set);
        Self { next, set, rng }
    }

    fn pick(rng: &mut SimpleRng, set: PieceSet) -> PieceKind {
        let shapes = all_shapes(set);
        shapes[rng.next_range(shapes.len() as u32) as usize]
    }

    /// The piece the next spawn will use
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the lookahead piece and refill the slot with a fresh random pick
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = Self::pick(&mut self.rng, self.set);
        piece
    }

    /// Get the current RNG state (for restarting game with a continuing sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, PieceSet::Classic)
    }
}
