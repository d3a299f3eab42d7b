//! RNG oracle for deterministic random number generation.
//!
//! Every random draw in the movement core (tie-breaks, pet whims, trap risk)
//! is keyed by the game seed, the decision nonce, the actor and a per-draw
//! context counter. Replaying the same inputs replays the same decisions.

use crate::state::EntityId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, bound)`; 0 when `bound` is 0.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }

    /// True with probability `1 / odds` (always true for `odds <= 1`).
    fn one_in(&self, seed: u64, odds: u32) -> bool {
        odds <= 1 || self.below(seed, odds) == 0
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: the seed is the state, so each call is an independent draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed from game state components.
///
/// * `game_seed` - Base seed set at level creation
/// * `nonce` - Decision sequence number
/// * `actor_id` - Actor making the decision
/// * `context` - Distinguishes several draws within one decision
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Random stream for one actor decision.
///
/// Each draw advances the context counter, so successive draws within the
/// same decision are independent while the whole sequence stays reproducible.
pub struct DecisionRng<'a> {
    oracle: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    actor: EntityId,
    context: u32,
}

impl<'a> DecisionRng<'a> {
    pub fn new(oracle: &'a dyn RngOracle, game_seed: u64, nonce: u64, actor: EntityId) -> Self {
        Self {
            oracle,
            game_seed,
            nonce,
            actor,
            context: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, self.actor.0, self.context);
        self.context = self.context.wrapping_add(1);
        seed
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        let seed = self.next_seed();
        self.oracle.below(seed, bound)
    }

    pub fn one_in(&mut self, odds: u32) -> bool {
        let seed = self.next_seed();
        self.oracle.one_in(seed, odds)
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u32 {
        self.context
    }
}
