//! Fractional-speed turn scheduling.
//!
//! An actor with rating `r` earns `r / Q` actions per global turn, where `Q`
//! is the action quantum. Fractions accumulate without any per-actor counter:
//! the number of actions granted up to turn `t` is `floor((t * r + offset) / Q)`,
//! so the budget of a single turn is the difference between two consecutive
//! totals.
//!
//! When the rating changes, only `offset` is rewritten, once, so that the
//! running total stays continuous. No history is replayed.

mod error;

pub use error::ScheduleError;

use crate::state::{ActorState, Tick};

/// Exclusive speed modifier on top of an actor's intrinsic rating.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SpeedModifier {
    #[default]
    Normal,
    Slow,
    Fast,
    VeryFast,
}

impl SpeedModifier {
    /// Effective rating for an intrinsic `base` rating.
    pub fn apply(self, base: u32) -> u32 {
        match self {
            SpeedModifier::Normal => base,
            SpeedModifier::Slow => base.div_ceil(2),
            SpeedModifier::Fast => (4 * base + 2) / 3,
            SpeedModifier::VeryFast => (5 * base + 2) / 3,
        }
    }
}

/// Per-actor scheduler bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedState {
    pub modifier: SpeedModifier,
    /// Accumulator phase in `[0, Q)`, rewritten on every rating change.
    pub offset: u32,
}

/// Stateless scheduler parameterised by the action quantum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduler {
    quantum: u32,
}

impl Scheduler {
    /// # Errors
    ///
    /// Returns `ScheduleError::ZeroQuantum` for a zero quantum.
    pub fn new(quantum: u32) -> Result<Self, ScheduleError> {
        if quantum == 0 {
            return Err(ScheduleError::ZeroQuantum);
        }
        Ok(Self { quantum })
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    pub fn effective_rating(actor: &ActorState) -> u32 {
        actor.speed.modifier.apply(actor.kind.speed)
    }

    /// Actions granted in total from turn 1 through `turn`.
    pub fn granted_through(&self, rating: u32, offset: u32, turn: Tick) -> u64 {
        let numerator = turn.0 as u128 * rating as u128 + offset as u128;
        (numerator / self.quantum as u128) as u64
    }

    /// Action budget of `actor` for global turn `turn`. Turn 0 grants nothing.
    pub fn actions_available(&self, actor: &ActorState, turn: Tick) -> u32 {
        if turn == Tick::ZERO {
            return 0;
        }
        let rating = Self::effective_rating(actor);
        let offset = actor.speed.offset % self.quantum;
        let now = self.granted_through(rating, offset, turn);
        let before = self.granted_through(rating, offset, Tick(turn.0 - 1));
        (now - before) as u32
    }

    /// Re-phases the accumulator for a rating change from `old` to `new`
    /// made after turn `turn`'s budget was granted.
    pub fn rephase(&self, speed: &mut SpeedState, old: u32, new: u32, turn: Tick) {
        let quantum = self.quantum as i128;
        let shifted =
            speed.offset as i128 + turn.0 as i128 * (old as i128 - new as i128);
        speed.offset = shifted.rem_euclid(quantum) as u32;
    }

    /// Changes the speed modifier, keeping the fractional progress.
    pub fn set_modifier(&self, actor: &mut ActorState, modifier: SpeedModifier, turn: Tick) {
        let old = Self::effective_rating(actor);
        let new = modifier.apply(actor.kind.speed);
        actor.speed.modifier = modifier;
        if old != new {
            self.rephase(&mut actor.speed, old, new, turn);
            tracing::debug!(
                actor = %actor.id,
                old,
                new,
                offset = actor.speed.offset,
                "speed modifier changed"
            );
        }
    }

    /// Changes the intrinsic rating (polymorph, growing up).
    pub fn set_base_speed(&self, actor: &mut ActorState, speed: u32, turn: Tick) {
        let old = Self::effective_rating(actor);
        let new = actor.speed.modifier.apply(speed);
        actor.kind.speed = speed;
        if old != new {
            self.rephase(&mut actor.speed, old, new, turn);
            tracing::debug!(
                actor = %actor.id,
                old,
                new,
                offset = actor.speed.offset,
                "base speed changed"
            );
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            quantum: crate::config::MovementConfig::DEFAULT_QUANTUM,
        }
    }
}
