//! Per-turn movement for the non-player actors of a grid dungeon.
//!
//! `game-movement` decides, every global turn, how many actions each actor
//! gets and what each action is: a step, an attack, a swap, a door forced or
//! a wall dug. It is deterministic: the same state, oracles and seed replay
//! the same decisions. Everything the host game owns (terrain, combat, trap
//! effects, item values) is reached through the traits in [`env`].
//!
//! The pipeline for one action is
//! [`strategy::select_goal`] → [`arbitration::resolve_turn`], and
//! [`driver::MovementDriver`] runs it for the whole roster under the
//! fractional-speed [`schedule::Scheduler`].
pub mod arbitration;
pub mod config;
pub mod driver;
pub mod env;
pub mod error;
#[cfg(feature = "loaders")]
pub mod loaders;
pub mod movement;
pub mod pathfinding;
pub mod policy;
pub mod schedule;
pub mod state;
pub mod strategy;

pub use arbitration::{ResolveError, TurnOutcome, resolve_turn};
pub use config::MovementConfig;
pub use driver::{MovementDriver, TurnReport};
pub use env::{
    AttackOutcome, CapabilityOracle, Collaborators, CombatResolver, ConfigOracle, DecisionRng,
    Env, GridMap, HookOutcome, InertResolver, ItemInterestOracle, KindCapabilities, MapOracle,
    MoveHooks, MovementEnv, OracleError, PcgRng, RngOracle, TrapOutcome, TrapResolver,
};
pub use error::{ErrorSeverity, GameError};
pub use movement::{
    CandidateList, CandidateMove, CellNotes, PermissionProfile, Permissions, enumerate,
};
pub use pathfinding::{DistanceField, FieldOptions};
pub use policy::MovementPolicy;
pub use schedule::{ScheduleError, Scheduler, SpeedModifier, SpeedState};
pub use state::{
    ActorKind, ActorState, ActorStatus, Disposition, EntityId, GameState, MovementModes,
    PlayerBelief, Position, StateError, StrategicGoal, StrategyTag, Tick, TileMap, TileView, Trap,
    TrapKind,
};
pub use strategy::{Bias, Goal, GoalSource, select_goal};
