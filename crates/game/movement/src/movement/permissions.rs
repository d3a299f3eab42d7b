//! Permission masks and informational cell notes.

use bitflags::bitflags;

use crate::env::CapabilityOracle;
use crate::state::{ActorState, Disposition, Position};

bitflags! {
    /// What an actor is allowed to do to reach a cell this turn.
    ///
    /// The enumerator only admits a candidate when every permission it needs
    /// is in the mask, and records exactly those permissions on it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Permissions: u16 {
        const OPEN_DOORS        = 1 << 0;
        const UNLOCK_DOORS      = 1 << 1;
        const BUST_DOORS        = 1 << 2;
        const DIG               = 1 << 3;
        const ATTACK_PLAYER     = 1 << 4;
        const ATTACK_HOSTILE    = 1 << 5;
        const ATTACK_PEACEFUL   = 1 << 6;
        const ATTACK_TAME       = 1 << 7;
        const DISPLACE_PEACEFUL = 1 << 8;
        const DISPLACE_TAME     = 1 << 9;
        const IGNORE_WARD       = 1 << 10;
        /// Step onto a trap the actor knows can hurt it.
        const RISK_TRAPS        = 1 << 11;

        const ATTACKS = Self::ATTACK_PLAYER.bits()
            | Self::ATTACK_HOSTILE.bits()
            | Self::ATTACK_PEACEFUL.bits()
            | Self::ATTACK_TAME.bits();
        const DISPLACEMENTS = Self::DISPLACE_PEACEFUL.bits() | Self::DISPLACE_TAME.bits();
        const DOOR_WORK = Self::OPEN_DOORS.bits()
            | Self::UNLOCK_DOORS.bits()
            | Self::BUST_DOORS.bits();
    }
}

bitflags! {
    /// Facts about a candidate cell that never exclude it on their own.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellNotes: u8 {
        /// A boulder sits here.
        const ROCK            = 1 << 0;
        /// Shares a row, column or diagonal with the believed player position.
        const PLAYER_LINE     = 1 << 1;
        const SANCTUARY       = 1 << 2;
        const OCCUPIED        = 1 << 3;
        /// A trap of a kind the actor has never seen.
        const UNFAMILIAR_TRAP = 1 << 4;
    }
}

/// Builds the permission mask an actor moves with.
pub struct PermissionProfile;

impl PermissionProfile {
    /// Grants implied by disposition alone.
    pub fn disposition_mask(disposition: Disposition) -> Permissions {
        match disposition {
            Disposition::Hostile => Permissions::ATTACK_PLAYER | Permissions::ATTACK_TAME,
            Disposition::Tame => {
                Permissions::ATTACK_HOSTILE | Permissions::DISPLACE_TAME | Permissions::RISK_TRAPS
            }
            Disposition::Peaceful => Permissions::DISPLACE_PEACEFUL | Permissions::IGNORE_WARD,
        }
    }

    /// Disposition grants plus what the actor's capabilities allow.
    pub fn mask(actor: &ActorState, caps: &dyn CapabilityOracle) -> Permissions {
        let mut mask = Self::disposition_mask(actor.disposition);
        mask.set(Permissions::OPEN_DOORS, caps.can_open_doors(actor));
        mask.set(Permissions::UNLOCK_DOORS, caps.can_unlock_doors(actor));
        mask.set(Permissions::BUST_DOORS, caps.can_bust_doors(actor));
        mask.set(Permissions::DIG, caps.can_tunnel(actor));
        if caps.ignores_wards(actor) {
            mask |= Permissions::IGNORE_WARD;
        }
        if caps.displaces_others(actor) {
            mask |= Permissions::DISPLACEMENTS;
        }
        mask
    }

    /// Drops `DIG` while closing in on a goal within `range`: digging a
    /// detour next to the target wastes the turn.
    pub fn suppress_dig_near(
        mask: Permissions,
        here: Position,
        target: Position,
        range: u32,
    ) -> Permissions {
        if here.chebyshev(target) <= range {
            mask - Permissions::DIG
        } else {
            mask
        }
    }
}
