//! Trap categories and per-actor trap familiarity.

/// Trap categories recognised by the movement core.
///
/// `Unrecognized` carries a raw category code coming from external data that
/// does not map onto a known trap; the enumerator reports it and skips the
/// cell rather than guessing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TrapKind {
    Arrow,
    Dart,
    FallingRock,
    SqueakyBoard,
    BearTrap,
    LandMine,
    RollingBoulder,
    SleepingGas,
    Rust,
    Fire,
    Pit,
    SpikedPit,
    Hole,
    TrapDoor,
    Teleport,
    LevelTeleport,
    MagicPortal,
    Web,
    Statue,
    Magic,
    AntiMagic,
    Polymorph,
    VibratingSquare,
    #[strum(disabled)]
    Unrecognized(u8),
}

impl TrapKind {
    /// Bit index used for familiarity tracking, `None` for unrecognised codes.
    pub fn index(self) -> Option<u32> {
        use TrapKind::*;
        let index = match self {
            Arrow => 0,
            Dart => 1,
            FallingRock => 2,
            SqueakyBoard => 3,
            BearTrap => 4,
            LandMine => 5,
            RollingBoulder => 6,
            SleepingGas => 7,
            Rust => 8,
            Fire => 9,
            Pit => 10,
            SpikedPit => 11,
            Hole => 12,
            TrapDoor => 13,
            Teleport => 14,
            LevelTeleport => 15,
            MagicPortal => 16,
            Web => 17,
            Statue => 18,
            Magic => 19,
            AntiMagic => 20,
            Polymorph => 21,
            VibratingSquare => 22,
            Unrecognized(_) => return None,
        };
        Some(index)
    }

    pub fn is_pit(self) -> bool {
        matches!(self, TrapKind::Pit | TrapKind::SpikedPit)
    }

    pub fn is_hole(self) -> bool {
        matches!(self, TrapKind::Hole | TrapKind::TrapDoor)
    }
}

/// A trap placed on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trap {
    pub kind: TrapKind,
}

impl Trap {
    pub const fn new(kind: TrapKind) -> Self {
        Self { kind }
    }
}

/// Set of trap categories an actor has seen before and knows to avoid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapFamiliarity(u32);

impl TrapFamiliarity {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn knows(&self, kind: TrapKind) -> bool {
        kind.index().is_some_and(|bit| self.0 & (1 << bit) != 0)
    }

    pub fn learn(&mut self, kind: TrapKind) {
        if let Some(bit) = kind.index() {
            self.0 |= 1 << bit;
        }
    }

    pub fn with(mut self, kind: TrapKind) -> Self {
        self.learn(kind);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_known_category_has_a_distinct_bit() {
        let mut seen = 0u32;
        for kind in TrapKind::iter() {
            let bit = kind.index().expect("known kinds are indexed");
            assert_eq!(seen & (1 << bit), 0, "{kind} shares a bit");
            seen |= 1 << bit;
        }
    }

    #[test]
    fn unrecognized_codes_are_never_familiar() {
        let mut memory = TrapFamiliarity::empty();
        memory.learn(TrapKind::Unrecognized(99));
        assert!(!memory.knows(TrapKind::Unrecognized(99)));
        assert_eq!(memory, TrapFamiliarity::empty());
    }
}
