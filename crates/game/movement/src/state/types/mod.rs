pub mod actor;
pub mod common;
pub mod entities;
pub mod trap;
pub mod turn;
pub mod world;

// Re-export all actor-related types
pub use actor::{
    ActorKind, ActorState, ActorStatus, CompanionState, Disposition, Flight, Hunger,
    MovementModes, PlayerBelief, SizeClass, StatusFlags, StrategicGoal, StrategyTag,
};

// Re-export common types
pub use common::{EntityId, Position, ResourceMeter, Tick};

// Re-export roster types
pub use entities::{EntitiesState, PlayerState};

// Re-export trap types
pub use trap::{Trap, TrapFamiliarity, TrapKind};

// Re-export turn state
pub use turn::TurnState;

// Re-export world types
pub use world::{TileMap, TileView, WorldState};
