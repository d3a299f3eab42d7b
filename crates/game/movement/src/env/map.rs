use bitflags::bitflags;

use super::OracleError;
use crate::state::Position;

/// Static map oracle exposing the level layout as generated.
///
/// Runtime changes (opened doors, dug tunnels, occupancy) are layered on top
/// by [`crate::state::TileMap`]; the oracle itself never changes during play.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

bitflags! {
    /// Static per-cell attributes that do not change with terrain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Walls and rock here resist digging.
        const NONDIGGABLE = 1 << 0;
        /// Consecrated ground hostile actors will not walk onto.
        const SANCTUARY   = 1 << 1;
        /// Part of a room (as opposed to a corridor or doorway).
        const ROOM        = 1 << 2;
    }
}

/// Door state within a doorway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DoorState {
    /// Empty doorway, no door fitted.
    NoDoor,
    Broken,
    Open,
    Closed,
    Locked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub state: DoorState,
    /// Booby-trapped doors explode when opened, unlocked or broken.
    pub trapped: bool,
}

impl Door {
    pub const fn new(state: DoorState) -> Self {
        Self {
            state,
            trapped: false,
        }
    }

    pub const fn trapped(mut self) -> Self {
        self.trapped = true;
        self
    }

    /// Closed or locked.
    pub fn is_shut(self) -> bool {
        matches!(self.state, DoorState::Closed | DoorState::Locked)
    }

    /// A door leaf is fitted (open or shut); such doorways forbid diagonal steps.
    pub fn has_leaf(self) -> bool {
        !matches!(self.state, DoorState::NoDoor | DoorState::Broken)
    }
}

/// Special floor features. All are walkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FeatureKind {
    Altar,
    Fountain,
    Throne,
    Sink,
    Grave,
    StairsUp,
    StairsDown,
}

/// Canonical terrain classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Corridor,
    Wall,
    /// Solid, undug rock.
    Rock,
    Doorway(Door),
    Pool,
    Lava,
    IronBars,
    Feature(FeatureKind),
}

impl TerrainKind {
    /// Wall or rock: blocks everything that cannot dig or phase through it.
    pub fn is_solid(self) -> bool {
        matches!(self, TerrainKind::Wall | TerrainKind::Rock)
    }

    pub fn door(self) -> Option<Door> {
        match self {
            TerrainKind::Doorway(door) => Some(door),
            _ => None,
        }
    }

    /// Blocks a diagonal squeeze when found on both orthogonal corners.
    pub fn blocks_squeeze(self) -> bool {
        self.is_solid() || matches!(self, TerrainKind::IronBars)
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
    flags: TileFlags,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            flags: TileFlags::empty(),
        }
    }

    pub const fn with_flags(mut self, flags: TileFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn flags(self) -> TileFlags {
        self.flags
    }
}

/// Flat row-major map, the stock [`MapOracle`] implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl GridMap {
    /// Creates a map filled with a single tile.
    pub fn filled(dimensions: MapDimensions, tile: StaticTile) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            tiles: vec![tile; len],
        }
    }

    /// Parses a map from text rows, top row first (`y = 0`).
    ///
    /// Legend: `.` room floor, `#` corridor, `|`/`-` wall, space solid rock,
    /// `:` empty doorway, `/` broken door, `'` open door, `+` closed door,
    /// `*` locked door, `}` pool, `~` lava, `=` iron bars, `_` altar,
    /// `{` fountain, `<`/`>` stairs, `S` sanctuary floor.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidLayout` for ragged rows or unknown glyphs.
    pub fn from_rows(rows: &[&str]) -> Result<Self, OracleError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(OracleError::InvalidLayout {
                    row: y,
                    reason: "ragged row",
                });
            }
            for glyph in row.chars() {
                let tile = Self::tile_for_glyph(glyph).ok_or(OracleError::InvalidLayout {
                    row: y,
                    reason: "unknown glyph",
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles,
        })
    }

    fn tile_for_glyph(glyph: char) -> Option<StaticTile> {
        let room = |terrain| StaticTile::new(terrain).with_flags(TileFlags::ROOM);
        let door = |state| StaticTile::new(TerrainKind::Doorway(Door::new(state)));
        let tile = match glyph {
            '.' => room(TerrainKind::Floor),
            '#' => StaticTile::new(TerrainKind::Corridor),
            '|' | '-' => StaticTile::new(TerrainKind::Wall),
            ' ' => StaticTile::new(TerrainKind::Rock),
            ':' => door(DoorState::NoDoor),
            '/' => door(DoorState::Broken),
            '\'' => door(DoorState::Open),
            '+' => door(DoorState::Closed),
            '*' => door(DoorState::Locked),
            '}' => room(TerrainKind::Pool),
            '~' => room(TerrainKind::Lava),
            '=' => room(TerrainKind::IronBars),
            '_' => room(TerrainKind::Feature(FeatureKind::Altar)),
            '{' => room(TerrainKind::Feature(FeatureKind::Fountain)),
            '<' => room(TerrainKind::Feature(FeatureKind::StairsUp)),
            '>' => room(TerrainKind::Feature(FeatureKind::StairsDown)),
            'S' => StaticTile::new(TerrainKind::Floor)
                .with_flags(TileFlags::ROOM | TileFlags::SANCTUARY),
            _ => return None,
        };
        Some(tile)
    }

    /// Replaces a tile, returning false when the position is off the map.
    pub fn set_tile(&mut self, position: Position, tile: StaticTile) -> bool {
        match self.dimensions.index(position) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .and_then(|index| self.tiles.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_top_down() {
        let map = GridMap::from_rows(&["|+|", "._}"]).expect("valid layout");
        assert_eq!(map.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(
            map.tile(Position::new(1, 0)).map(StaticTile::terrain),
            Some(TerrainKind::Doorway(Door::new(DoorState::Closed)))
        );
        assert_eq!(
            map.tile(Position::new(2, 1)).map(StaticTile::terrain),
            Some(TerrainKind::Pool)
        );
        assert!(map.tile(Position::new(3, 0)).is_none());
    }

    #[test]
    fn rejects_ragged_rows_and_unknown_glyphs() {
        assert!(matches!(
            GridMap::from_rows(&["...", ".."]),
            Err(OracleError::InvalidLayout { row: 1, .. })
        ));
        assert!(matches!(
            GridMap::from_rows(&["..?"]),
            Err(OracleError::InvalidLayout { row: 0, .. })
        ));
    }

    #[test]
    fn only_fitted_doors_have_leaves() {
        assert!(!Door::new(DoorState::Broken).has_leaf());
        assert!(!Door::new(DoorState::NoDoor).has_leaf());
        assert!(Door::new(DoorState::Open).has_leaf());
        assert!(Door::new(DoorState::Locked).is_shut());
    }
}
