use std::collections::{BTreeMap, BTreeSet};

use crate::env::{MapOracle, TerrainKind, TileFlags};

use super::{EntityId, Position, Trap};

/// Aggregated world-level state layered on top of the static map.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub tile_map: TileMap,
}

impl WorldState {
    pub fn new(tile_map: TileMap) -> Self {
        Self { tile_map }
    }

    /// Produces a merged view combining static tile data with runtime changes.
    pub fn tile_view<M>(&self, map: &M, position: Position) -> Option<TileView>
    where
        M: MapOracle + ?Sized,
    {
        let static_tile = map.tile(position)?;
        let tiles = &self.tile_map;

        Some(TileView {
            position,
            terrain: tiles
                .terrain_override(position)
                .unwrap_or(static_tile.terrain()),
            flags: static_tile.flags(),
            occupant: tiles.occupant(position),
            trap: tiles.trap(position),
            warded: tiles.is_warded(position),
            boulder: tiles.has_boulder(position),
            image: tiles.displaced_image() == Some(position),
        })
    }
}

/// Runtime changes layered on top of immutable static tiles.
///
/// Occupancy holds at most one entity per cell, the player included. The
/// displaced image is tracked separately and never counts as occupancy.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    occupancy: BTreeMap<Position, EntityId>,
    terrain: BTreeMap<Position, TerrainKind>,
    traps: BTreeMap<Position, Trap>,
    wards: BTreeSet<Position>,
    boulders: BTreeSet<Position>,
    displaced_image: Option<Position>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy(&self) -> &BTreeMap<Position, EntityId> {
        &self.occupancy
    }

    pub fn occupant(&self, position: Position) -> Option<EntityId> {
        self.occupancy.get(&position).copied()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupancy.contains_key(&position)
    }

    /// Places an entity on a free cell. Returns false if another entity is
    /// already there.
    pub fn add_occupant(&mut self, position: Position, entity: EntityId) -> bool {
        match self.occupancy.get(&position) {
            Some(current) => *current == entity,
            None => {
                self.occupancy.insert(position, entity);
                true
            }
        }
    }

    pub fn remove_occupant(&mut self, position: Position, entity: EntityId) -> bool {
        if self.occupant(position) == Some(entity) {
            self.occupancy.remove(&position);
            true
        } else {
            false
        }
    }

    /// Moves an entity between cells. Leaves the map untouched and returns
    /// false unless `from` holds `entity` and `to` is free.
    pub fn move_occupant(&mut self, from: Position, to: Position, entity: EntityId) -> bool {
        if self.occupant(from) != Some(entity) || self.is_occupied(to) {
            return false;
        }
        self.occupancy.remove(&from);
        self.occupancy.insert(to, entity);
        true
    }

    /// Exchanges the occupants of two cells in one step. Both cells must be
    /// occupied; otherwise nothing changes.
    pub fn swap_occupants(&mut self, a: Position, b: Position) -> bool {
        match (self.occupant(a), self.occupant(b)) {
            (Some(first), Some(second)) => {
                self.occupancy.insert(a, second);
                self.occupancy.insert(b, first);
                true
            }
            _ => false,
        }
    }

    pub fn terrain_override(&self, position: Position) -> Option<TerrainKind> {
        self.terrain.get(&position).copied()
    }

    /// Records a runtime terrain change (door opened, wall dug out).
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        self.terrain.insert(position, terrain);
    }

    pub fn trap(&self, position: Position) -> Option<Trap> {
        self.traps.get(&position).copied()
    }

    pub fn set_trap(&mut self, position: Position, trap: Trap) {
        self.traps.insert(position, trap);
    }

    pub fn remove_trap(&mut self, position: Position) -> Option<Trap> {
        self.traps.remove(&position)
    }

    pub fn is_warded(&self, position: Position) -> bool {
        self.wards.contains(&position)
    }

    pub fn set_ward(&mut self, position: Position, warded: bool) {
        if warded {
            self.wards.insert(position);
        } else {
            self.wards.remove(&position);
        }
    }

    pub fn has_boulder(&self, position: Position) -> bool {
        self.boulders.contains(&position)
    }

    pub fn set_boulder(&mut self, position: Position, present: bool) {
        if present {
            self.boulders.insert(position);
        } else {
            self.boulders.remove(&position);
        }
    }

    /// Where the player's decoy appears, if displaced.
    pub fn displaced_image(&self) -> Option<Position> {
        self.displaced_image
    }

    pub fn set_displaced_image(&mut self, position: Option<Position>) {
        self.displaced_image = position;
    }
}

/// Effective state of a single cell: static layout plus runtime changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileView {
    position: Position,
    terrain: TerrainKind,
    flags: TileFlags,
    occupant: Option<EntityId>,
    trap: Option<Trap>,
    warded: bool,
    boulder: bool,
    image: bool,
}

impl TileView {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn trap(&self) -> Option<Trap> {
        self.trap
    }

    pub fn is_warded(&self) -> bool {
        self.warded
    }

    pub fn has_boulder(&self) -> bool {
        self.boulder
    }

    pub fn has_displaced_image(&self) -> bool {
        self.image
    }

    pub fn is_sanctuary(&self) -> bool {
        self.flags.contains(TileFlags::SANCTUARY)
    }

    pub fn is_room(&self) -> bool {
        self.flags.contains(TileFlags::ROOM)
    }

    pub fn is_diggable(&self) -> bool {
        self.terrain.is_solid() && !self.flags.contains(TileFlags::NONDIGGABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Door, DoorState, GridMap};

    #[test]
    fn one_occupant_per_cell() {
        let mut tiles = TileMap::new();
        let cell = Position::new(1, 1);
        assert!(tiles.add_occupant(cell, EntityId(1)));
        assert!(!tiles.add_occupant(cell, EntityId(2)));
        assert!(tiles.add_occupant(cell, EntityId(1)));
        assert_eq!(tiles.occupant(cell), Some(EntityId(1)));
    }

    #[test]
    fn swap_requires_two_occupants() {
        let mut tiles = TileMap::new();
        let (a, b) = (Position::new(0, 0), Position::new(1, 0));
        tiles.add_occupant(a, EntityId(1));
        assert!(!tiles.swap_occupants(a, b));
        assert_eq!(tiles.occupant(a), Some(EntityId(1)));

        tiles.add_occupant(b, EntityId(2));
        assert!(tiles.swap_occupants(a, b));
        assert_eq!(tiles.occupant(a), Some(EntityId(2)));
        assert_eq!(tiles.occupant(b), Some(EntityId(1)));
        assert_eq!(tiles.occupancy().len(), 2);
    }

    #[test]
    fn move_refuses_occupied_destination() {
        let mut tiles = TileMap::new();
        let (a, b) = (Position::new(0, 0), Position::new(1, 0));
        tiles.add_occupant(a, EntityId(1));
        tiles.add_occupant(b, EntityId(2));
        assert!(!tiles.move_occupant(a, b, EntityId(1)));
        tiles.remove_occupant(b, EntityId(2));
        assert!(tiles.move_occupant(a, b, EntityId(1)));
        assert!(!tiles.is_occupied(a));
    }

    #[test]
    fn view_prefers_runtime_terrain() {
        let map = GridMap::from_rows(&["+."]).expect("valid layout");
        let mut world = WorldState::default();
        let door = Position::new(0, 0);
        world
            .tile_map
            .set_terrain(door, TerrainKind::Doorway(Door::new(DoorState::Open)));
        world.tile_map.set_displaced_image(Some(Position::new(1, 0)));

        let view = world.tile_view(&map, door).expect("on map");
        assert_eq!(
            view.terrain().door().map(|door| door.state),
            Some(DoorState::Open)
        );
        let image = world
            .tile_view(&map, Position::new(1, 0))
            .expect("on map");
        assert!(image.has_displaced_image());
        assert!(!image.is_occupied());
        assert!(world.tile_view(&map, Position::new(2, 0)).is_none());
    }
}
