//! Immutable capability profile shared by every actor of the same kind.

use bitflags::bitflags;

bitflags! {
    /// Movement and interaction modes granted by an actor's kind.
    ///
    /// These are raw kind traits; situational answers ("can this actor dig
    /// right now?") go through [`crate::env::CapabilityOracle`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementModes: u32 {
        const FLY                = 1 << 0;
        const LEVITATE           = 1 << 1;
        const SWIM               = 1 << 2;
        const TUNNEL             = 1 << 3;
        /// Tunnelling only works while carrying a digging tool.
        const NEEDS_PICK         = 1 << 4;
        const WALL_WALK          = 1 << 5;
        const AMORPHOUS          = 1 << 6;
        const OPEN_DOORS         = 1 << 7;
        const UNLOCK_DOORS       = 1 << 8;
        const BUST_DOORS         = 1 << 9;
        const PASS_BARS          = 1 << 10;
        const LAVA_TOLERANT      = 1 << 11;
        const FIRE_RESISTANT     = 1 << 12;
        const SLEEP_RESISTANT    = 1 << 13;
        const MOVES_BOULDERS     = 1 << 14;
        const IGNORES_WARDS      = 1 << 15;
        const AVOIDS_PLAYER_LINE = 1 << 16;
        /// Picks up objects it finds lying around.
        const COLLECTOR          = 1 << 17;
        /// Swaps places with peaceful or tame actors in its way.
        const DISPLACER          = 1 << 18;
        const CLINGS             = 1 << 19;
    }
}

/// Body size, ordered from smallest to largest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SizeClass {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gigantic,
}

impl SizeClass {
    /// Whether a body this size fits through a diagonal gap between two
    /// blocking cells.
    pub fn squeezes_diagonally(self) -> bool {
        self <= SizeClass::Small
    }
}

/// Capability profile for an actor kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorKind {
    /// Template identifier in the external monster table.
    pub template: u16,
    pub modes: MovementModes,
    pub size: SizeClass,
    pub level: u8,
    /// Intrinsic movement rating; the action quantum is "normal speed".
    pub speed: u32,
    /// Leap reach in cells; 0 for ordinary walkers.
    pub leap: u8,
}

impl ActorKind {
    pub const fn new(template: u16, speed: u32) -> Self {
        Self {
            template,
            modes: MovementModes::empty(),
            size: SizeClass::Medium,
            level: 1,
            speed,
            leap: 0,
        }
    }

    pub const fn with_modes(mut self, modes: MovementModes) -> Self {
        self.modes = modes;
        self
    }

    pub const fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    pub const fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub const fn with_leap(mut self, leap: u8) -> Self {
        self.leap = leap;
        self
    }

    pub fn has(&self, modes: MovementModes) -> bool {
        self.modes.contains(modes)
    }
}

impl Default for ActorKind {
    fn default() -> Self {
        Self::new(0, 12)
    }
}
