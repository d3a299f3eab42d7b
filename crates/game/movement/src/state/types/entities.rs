use super::{ActorState, EntityId, Position};

/// The player as seen by the movement core: a position and nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Ordered roster of every non-player actor on the level.
///
/// Roster order is the order in which the driver visits actors each turn.
/// Dead actors stay in the roster (with `alive == false`) until
/// [`EntitiesState::purge_dead`] runs, so ids captured at the start of a pass
/// remain resolvable for its whole duration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: PlayerState,
    actors: Vec<ActorState>,
}

impl EntitiesState {
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            actors: Vec::new(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Live actor with the given id.
    pub fn live_actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actor(id).filter(|actor| actor.alive)
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter()
    }

    pub fn live_actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.iter().filter(|actor| actor.alive)
    }

    pub fn live_actors_mut(&mut self) -> impl Iterator<Item = &mut ActorState> {
        self.actors.iter_mut().filter(|actor| actor.alive)
    }

    /// Snapshot of live actor ids in roster order.
    pub fn roster(&self) -> Vec<EntityId> {
        self.live_actors().map(|actor| actor.id).collect()
    }

    pub(crate) fn push(&mut self, actor: ActorState) {
        self.actors.push(actor);
    }

    /// Removes an actor from the roster entirely (level change, banishment).
    pub(crate) fn take(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        Some(self.actors.remove(index))
    }

    /// Drops every dead actor, returning their ids.
    pub fn purge_dead(&mut self) -> Vec<EntityId> {
        let dead = self
            .actors
            .iter()
            .filter(|actor| !actor.alive)
            .map(|actor| actor.id)
            .collect();
        self.actors.retain(|actor| actor.alive);
        dead
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
