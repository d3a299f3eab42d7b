use crate::state::{ActorState, GameState, Position};

/// Item-desirability collaborator.
///
/// Object stacks and their value to a given actor are owned by the host; the
/// movement core only asks which nearby objects are worth walking to.
pub trait ItemInterestOracle: Send + Sync {
    /// Objects within `radius` (Chebyshev) of the actor that it would pick
    /// up or eat. Order is not significant.
    fn desired_objects_near(
        &self,
        state: &GameState,
        actor: &ActorState,
        radius: u32,
    ) -> Vec<DesiredObject>;
}

/// How an object appeals to the actor looking at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemAppeal {
    /// Always worth fetching (favourite food).
    Treat,
    /// Worth eating when hungry.
    Food,
    /// Something to carry back to the player.
    Plaything,
    /// Anything a collector would hoard.
    Loot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesiredObject {
    pub position: Position,
    pub appeal: ItemAppeal,
    /// Companions steer clear of cursed objects unless starving.
    pub cursed: bool,
}

impl DesiredObject {
    pub const fn new(position: Position, appeal: ItemAppeal) -> Self {
        Self {
            position,
            appeal,
            cursed: false,
        }
    }

    pub const fn cursed(mut self) -> Self {
        self.cursed = true;
        self
    }
}

/// Interest oracle for levels without any objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoItemInterest;

impl ItemInterestOracle for NoItemInterest {
    fn desired_objects_near(&self, _: &GameState, _: &ActorState, _: u32) -> Vec<DesiredObject> {
        Vec::new()
    }
}

/// Fixed list of objects, filtered by distance. Handy for hosts that keep
/// object positions in a flat list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectList {
    objects: Vec<DesiredObject>,
}

impl ObjectList {
    pub fn new(objects: Vec<DesiredObject>) -> Self {
        Self { objects }
    }

    pub fn remove_at(&mut self, position: Position) {
        self.objects.retain(|object| object.position != position);
    }
}

impl ItemInterestOracle for ObjectList {
    fn desired_objects_near(
        &self,
        _: &GameState,
        actor: &ActorState,
        radius: u32,
    ) -> Vec<DesiredObject> {
        self.objects
            .iter()
            .filter(|object| object.position.chebyshev(actor.position) <= radius)
            .copied()
            .collect()
    }
}
