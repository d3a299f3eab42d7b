//! Actor-related state types.
//!
//! This module contains the types describing a single non-player actor:
//! - ActorState: Main actor structure
//! - Kind: Immutable capability profile
//! - Status: Conditions that gate or distort movement

pub mod kind;
pub mod status;

pub use kind::{ActorKind, MovementModes, SizeClass};
pub use status::{ActorStatus, Flight, StatusFlags};

use super::{EntityId, Position, ResourceMeter, Tick, TrapFamiliarity};
use crate::policy::MovementPolicy;
use crate::schedule::SpeedState;

/// Relationship of an actor towards the player. Exactly one holds at a time.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Disposition {
    #[default]
    Hostile,
    Peaceful,
    Tame,
}

/// Tag for a longer-lived intent assigned by game logic outside this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StrategyTag {
    Pursue,
    Flee,
    Ascend,
    ReturnToPost,
    /// Last point where the actor decided to look for the player.
    Search,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategicGoal {
    pub tag: StrategyTag,
    pub target: Position,
}

impl StrategicGoal {
    pub const fn new(tag: StrategyTag, target: Position) -> Self {
        Self { tag, target }
    }
}

/// What the actor thinks it knows about the player's whereabouts.
///
/// Distinct from ground truth: a `Displaced` belief points at the player's
/// visual decoy, a `Stale` belief at wherever the player was last noticed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerBelief {
    #[default]
    Unknown,
    Accurate(Position),
    Stale(Position),
    Displaced(Position),
}

impl PlayerBelief {
    pub fn position(&self) -> Option<Position> {
        match *self {
            PlayerBelief::Unknown => None,
            PlayerBelief::Accurate(pos)
            | PlayerBelief::Stale(pos)
            | PlayerBelief::Displaced(pos) => Some(pos),
        }
    }

    /// True when the belief comes from a current observation (accurate or a
    /// decoy the actor is actively fooled by).
    pub fn is_current(&self) -> bool {
        matches!(self, PlayerBelief::Accurate(_) | PlayerBelief::Displaced(_))
    }
}

/// Hunger bookkeeping for companions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionState {
    /// Turn at which the companion starts to feel hungry.
    pub hungry_at: Tick,
    /// Chance weight (0-10) of fetching playthings for the player.
    pub apport: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Hunger {
    Satiated,
    Content,
    Hungry,
    Starving,
}

impl CompanionState {
    /// Turns past `hungry_at` after which hunger becomes starvation.
    pub const STARVATION_MARGIN: u64 = 500;
    /// Turns before `hungry_at` during which the companion is still satiated.
    pub const SATIATION_MARGIN: u64 = 1000;

    pub fn new(hungry_at: Tick) -> Self {
        Self {
            hungry_at,
            apport: 10,
        }
    }

    pub fn hunger(&self, now: Tick) -> Hunger {
        if now.0 >= self.hungry_at.0 + Self::STARVATION_MARGIN {
            Hunger::Starving
        } else if now >= self.hungry_at {
            Hunger::Hungry
        } else if now.0 + Self::SATIATION_MARGIN < self.hungry_at.0 {
            Hunger::Satiated
        } else {
            Hunger::Content
        }
    }
}

/// Complete per-actor state consumed by the movement core.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub position: Position,
    pub kind: ActorKind,
    pub status: ActorStatus,
    pub disposition: Disposition,
    /// Scheduler bookkeeping: speed modifier and speed-change offset.
    pub speed: SpeedState,
    pub strategy: Option<StrategicGoal>,
    pub belief: PlayerBelief,
    pub hp: ResourceMeter,
    pub traps_seen: TrapFamiliarity,
    /// Leashed actors are tethered to the player.
    pub leashed: bool,
    pub has_digging_tool: bool,
    pub companion: Option<CompanionState>,
    pub policy: MovementPolicy,
    pub alive: bool,
}

impl ActorState {
    pub fn new(id: EntityId, position: Position, kind: ActorKind) -> Self {
        Self {
            id,
            position,
            kind,
            status: ActorStatus::default(),
            disposition: Disposition::Hostile,
            speed: SpeedState::default(),
            strategy: None,
            belief: PlayerBelief::Unknown,
            hp: ResourceMeter::full(10),
            traps_seen: TrapFamiliarity::empty(),
            leashed: false,
            has_digging_tool: false,
            companion: None,
            policy: MovementPolicy::Standard,
            alive: true,
        }
    }

    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        if disposition == Disposition::Tame {
            if self.companion.is_none() {
                self.companion = Some(CompanionState::new(Tick(1000)));
            }
            if self.policy == MovementPolicy::Standard {
                self.policy = MovementPolicy::Companion;
            }
        }
        self
    }

    pub fn with_belief(mut self, belief: PlayerBelief) -> Self {
        self.belief = belief;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategicGoal) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_status(mut self, status: ActorStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_hp(mut self, hp: ResourceMeter) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_policy(mut self, policy: MovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_traps_seen(mut self, traps_seen: TrapFamiliarity) -> Self {
        self.traps_seen = traps_seen;
        self
    }

    pub fn leashed(mut self) -> Self {
        self.leashed = true;
        self
    }

    pub fn with_digging_tool(mut self) -> Self {
        self.has_digging_tool = true;
        self
    }

    pub fn is_tame(&self) -> bool {
        self.disposition == Disposition::Tame
    }

    pub fn is_peaceful(&self) -> bool {
        self.disposition == Disposition::Peaceful
    }

    pub fn is_hostile(&self) -> bool {
        self.disposition == Disposition::Hostile
    }
}
