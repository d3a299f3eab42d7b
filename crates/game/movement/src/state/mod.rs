//! Authoritative movement state.
//!
//! This module owns the data structures that describe actors, the player,
//! turn bookkeeping and the runtime world overlay. Callers read this state
//! freely; occupancy is written only through the helpers on [`GameState`] so
//! the roster and the occupancy grid never disagree.
mod error;
pub mod types;

use crate::env::MapOracle;
pub use error::StateError;
pub use types::{
    ActorKind, ActorState, ActorStatus, CompanionState, Disposition, EntitiesState, EntityId,
    Flight, Hunger, MovementModes, PlayerBelief, PlayerState, Position, ResourceMeter, SizeClass,
    StatusFlags, StrategicGoal, StrategyTag, Tick, TileMap, TileView, Trap, TrapFamiliarity,
    TrapKind, TurnState, WorldState,
};

/// Canonical snapshot of the movement state for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at level creation and never modified. Combined with
    /// `turn.nonce` to derive a unique seed for each decision.
    pub game_seed: u64,

    /// Sequential entity ID allocator (monotonically increasing).
    next_entity_id: u32,

    pub turn: TurnState,
    pub entities: EntitiesState,
    /// Runtime world data layered on top of the static map.
    pub world: WorldState,
}

impl GameState {
    /// Creates a state with the player standing at `player_position`.
    pub fn new(game_seed: u64, player_position: Position) -> Self {
        let mut world = WorldState::default();
        world
            .tile_map
            .add_occupant(player_position, EntityId::PLAYER);

        Self {
            game_seed,
            next_entity_id: 1,
            turn: TurnState::default(),
            entities: EntitiesState::new(PlayerState::new(player_position)),
            world,
        }
    }

    /// Returns a merged tile view that combines static map data with runtime changes.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> Option<TileView>
    where
        M: MapOracle + ?Sized,
    {
        self.world.tile_view(map, position)
    }

    pub fn player_position(&self) -> Position {
        self.entities.player.position
    }

    pub fn occupant_at(&self, position: Position) -> Option<EntityId> {
        self.world.tile_map.occupant(position)
    }

    /// Allocates a fresh actor id (never 0, never reused).
    ///
    /// # Errors
    ///
    /// Returns `StateError::EntityIdOverflow` once the id space is exhausted.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = self.next_entity_id.max(1);
        self.next_entity_id = id.checked_add(1).ok_or(StateError::EntityIdOverflow {
            current: id,
        })?;
        Ok(EntityId(id))
    }

    /// Adds an actor to the end of the roster and places it on the map.
    ///
    /// # Errors
    ///
    /// Fails when the id is taken or the actor's cell is already occupied.
    pub fn add_actor(&mut self, actor: ActorState) -> Result<EntityId, StateError> {
        let id = actor.id;
        if id.is_player() || self.entities.actor(id).is_some() {
            return Err(StateError::DuplicateActor(id));
        }
        if let Some(occupant) = self.occupant_at(actor.position) {
            return Err(StateError::PositionOccupied {
                position: actor.position,
                occupant,
            });
        }

        self.world.tile_map.add_occupant(actor.position, id);
        self.entities.push(actor);
        self.next_entity_id = self.next_entity_id.max(id.0.saturating_add(1));
        Ok(id)
    }

    /// Moves the player, keeping occupancy in step.
    ///
    /// # Errors
    ///
    /// Returns `StateError::PositionOccupied` if an actor stands at `to`.
    pub fn move_player(&mut self, to: Position) -> Result<(), StateError> {
        let from = self.player_position();
        if from == to {
            return Ok(());
        }
        if let Some(occupant) = self.occupant_at(to) {
            return Err(StateError::PositionOccupied {
                position: to,
                occupant,
            });
        }
        self.world
            .tile_map
            .move_occupant(from, to, EntityId::PLAYER);
        self.entities.player.position = to;
        Ok(())
    }

    /// Moves a live actor onto a free cell. Returns false (and changes
    /// nothing) when the actor is missing or the destination is taken.
    pub fn relocate_actor(&mut self, id: EntityId, to: Position) -> bool {
        let Some(actor) = self.entities.live_actor(id) else {
            return false;
        };
        let from = actor.position;
        if !self.world.tile_map.move_occupant(from, to, id) {
            return false;
        }
        if let Some(actor) = self.entities.actor_mut(id) {
            actor.position = to;
        }
        true
    }

    /// Exchanges the cells of two live actors atomically.
    pub fn swap_actors(&mut self, a: EntityId, b: EntityId) -> bool {
        let (Some(first), Some(second)) = (
            self.entities.live_actor(a).map(|actor| actor.position),
            self.entities.live_actor(b).map(|actor| actor.position),
        ) else {
            return false;
        };
        if !self.world.tile_map.swap_occupants(first, second) {
            return false;
        }
        if let Some(actor) = self.entities.actor_mut(a) {
            actor.position = second;
        }
        if let Some(actor) = self.entities.actor_mut(b) {
            actor.position = first;
        }
        true
    }

    /// Marks an actor dead and clears its cell. The roster entry is kept
    /// until [`EntitiesState::purge_dead`]. Idempotent: returns false if the
    /// actor was already dead or unknown.
    pub fn kill_actor(&mut self, id: EntityId) -> bool {
        let Some(actor) = self.entities.actor_mut(id) else {
            return false;
        };
        if !actor.alive {
            return false;
        }
        actor.alive = false;
        let position = actor.position;
        self.world.tile_map.remove_occupant(position, id);
        true
    }

    /// Removes an actor from the level entirely.
    pub fn remove_actor(&mut self, id: EntityId) -> Option<ActorState> {
        let actor = self.entities.take(id)?;
        self.world.tile_map.remove_occupant(actor.position, id);
        Some(actor)
    }

    /// Number of live entities (actors and the player) in the eight cells
    /// around `position`.
    pub fn live_neighbor_count(&self, position: Position) -> usize {
        position
            .neighbors()
            .filter(|cell| self.world.tile_map.is_occupied(*cell))
            .count()
    }
}
