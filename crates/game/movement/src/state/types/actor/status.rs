//! Mutable status conditions that gate or distort movement.
//!
//! Boolean conditions live in [`StatusFlags`]; conditions with a duration
//! carry their own counters and are ticked once per global turn by the
//! movement driver.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u16 {
        const ASLEEP   = 1 << 0;
        /// Caught in a trap; cannot leave its cell.
        const TRAPPED  = 1 << 1;
        const CONFUSED = 1 << 2;
        const STUNNED  = 1 << 3;
        const BLINDED  = 1 << 4;
    }
}

/// Flight state. `Timed` counts down; `Indefinite` lasts until cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flight {
    #[default]
    Calm,
    Timed(u16),
    Indefinite,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStatus {
    pub flags: StatusFlags,
    pub flight: Flight,
    /// Remaining turns during which the actor cannot act at all.
    pub frozen_turns: u16,
}

impl ActorStatus {
    pub fn has(&self, flags: StatusFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn set(&mut self, flags: StatusFlags, value: bool) {
        self.flags.set(flags, value);
    }

    pub fn is_asleep(&self) -> bool {
        self.has(StatusFlags::ASLEEP)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    pub fn is_fleeing(&self) -> bool {
        !matches!(self.flight, Flight::Calm)
    }

    /// Starts or extends flight. A zero duration means "until cleared".
    /// A running timer is only ever lengthened.
    pub fn flee(&mut self, turns: u16) {
        self.flight = match (self.flight, turns) {
            (_, 0) | (Flight::Indefinite, _) => Flight::Indefinite,
            (Flight::Timed(left), turns) => Flight::Timed(left.max(turns)),
            (Flight::Calm, turns) => Flight::Timed(turns),
        };
    }

    pub fn calm(&mut self) {
        self.flight = Flight::Calm;
    }

    pub fn freeze(&mut self, turns: u16) {
        self.frozen_turns = self.frozen_turns.max(turns);
    }

    /// Advances timed conditions by one global turn.
    pub fn tick(&mut self) {
        self.frozen_turns = self.frozen_turns.saturating_sub(1);
        if let Flight::Timed(left) = self.flight {
            self.flight = if left <= 1 {
                Flight::Calm
            } else {
                Flight::Timed(left - 1)
            };
        }
    }
}
