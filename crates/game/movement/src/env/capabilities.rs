//! Capability queries about individual actors.
//!
//! The movement core never inspects kind bits directly; it asks a
//! [`CapabilityOracle`]. [`KindCapabilities`] answers from the actor's kind,
//! status and carried tools, which is enough for most hosts. Hosts with a
//! richer property system (intrinsics granted by items, polymorph) supply
//! their own implementation.

use crate::state::{ActorState, MovementModes, Position, StatusFlags};

pub trait CapabilityOracle: Send + Sync {
    fn can_fly(&self, actor: &ActorState) -> bool;
    fn can_levitate(&self, actor: &ActorState) -> bool;
    fn can_swim(&self, actor: &ActorState) -> bool;
    /// Able to dig through walls and rock right now.
    fn can_tunnel(&self, actor: &ActorState) -> bool;
    fn can_open_doors(&self, actor: &ActorState) -> bool;
    fn can_unlock_doors(&self, actor: &ActorState) -> bool;
    fn can_bust_doors(&self, actor: &ActorState) -> bool;
    fn can_pass_walls(&self, actor: &ActorState) -> bool;
    fn can_pass_bars(&self, actor: &ActorState) -> bool;
    fn is_amorphous(&self, actor: &ActorState) -> bool;
    fn tolerates_lava(&self, actor: &ActorState) -> bool;
    fn resists_fire(&self, actor: &ActorState) -> bool;
    fn resists_sleep(&self, actor: &ActorState) -> bool;
    fn moves_boulders(&self, actor: &ActorState) -> bool;
    fn ignores_wards(&self, actor: &ActorState) -> bool;
    fn avoids_player_line(&self, actor: &ActorState) -> bool;
    fn collects_items(&self, actor: &ActorState) -> bool;
    /// Swaps places with actors in its way when allowed.
    fn displaces_others(&self, actor: &ActorState) -> bool;
    fn is_asleep(&self, actor: &ActorState) -> bool;
    fn is_frozen(&self, actor: &ActorState) -> bool;
    fn is_confused(&self, actor: &ActorState) -> bool;
    fn is_stunned(&self, actor: &ActorState) -> bool;
    fn is_fleeing(&self, actor: &ActorState) -> bool;
    fn believes_player_location(&self, actor: &ActorState) -> Option<Position>;

    /// Flying or levitating: clear of the floor and anything on it.
    fn is_airborne(&self, actor: &ActorState) -> bool {
        self.can_fly(actor) || self.can_levitate(actor)
    }
}

/// Capabilities read straight from [`crate::state::ActorKind`] and status.
#[derive(Clone, Copy, Debug, Default)]
pub struct KindCapabilities;

impl CapabilityOracle for KindCapabilities {
    fn can_fly(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::FLY)
    }

    fn can_levitate(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::LEVITATE)
    }

    fn can_swim(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::SWIM)
    }

    fn can_tunnel(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::TUNNEL)
            && (!actor.kind.has(MovementModes::NEEDS_PICK) || actor.has_digging_tool)
    }

    fn can_open_doors(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::OPEN_DOORS)
    }

    fn can_unlock_doors(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::UNLOCK_DOORS)
    }

    fn can_bust_doors(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::BUST_DOORS)
    }

    fn can_pass_walls(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::WALL_WALK)
    }

    fn can_pass_bars(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::PASS_BARS) || actor.kind.has(MovementModes::AMORPHOUS)
    }

    fn is_amorphous(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::AMORPHOUS)
    }

    fn tolerates_lava(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::LAVA_TOLERANT)
    }

    fn resists_fire(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::FIRE_RESISTANT)
    }

    fn resists_sleep(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::SLEEP_RESISTANT)
    }

    fn moves_boulders(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::MOVES_BOULDERS)
    }

    fn ignores_wards(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::IGNORES_WARDS)
    }

    fn avoids_player_line(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::AVOIDS_PLAYER_LINE)
    }

    fn collects_items(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::COLLECTOR)
    }

    fn displaces_others(&self, actor: &ActorState) -> bool {
        actor.kind.has(MovementModes::DISPLACER)
    }

    fn is_asleep(&self, actor: &ActorState) -> bool {
        actor.status.is_asleep()
    }

    fn is_frozen(&self, actor: &ActorState) -> bool {
        actor.status.is_frozen()
    }

    fn is_confused(&self, actor: &ActorState) -> bool {
        actor.status.has(StatusFlags::CONFUSED)
    }

    fn is_stunned(&self, actor: &ActorState) -> bool {
        actor.status.has(StatusFlags::STUNNED)
    }

    fn is_fleeing(&self, actor: &ActorState) -> bool {
        actor.status.is_fleeing()
    }

    fn believes_player_location(&self, actor: &ActorState) -> Option<Position> {
        actor.belief.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorKind, EntityId};

    #[test]
    fn tool_dependent_tunnelling() {
        let kind =
            ActorKind::default().with_modes(MovementModes::TUNNEL | MovementModes::NEEDS_PICK);
        let bare = ActorState::new(EntityId(1), Position::ORIGIN, kind);
        let armed = bare.clone().with_digging_tool();
        assert!(!KindCapabilities.can_tunnel(&bare));
        assert!(KindCapabilities.can_tunnel(&armed));
    }

    #[test]
    fn amorphous_actors_ooze_through_bars() {
        let kind = ActorKind::default().with_modes(MovementModes::AMORPHOUS);
        let actor = ActorState::new(EntityId(1), Position::ORIGIN, kind);
        assert!(KindCapabilities.can_pass_bars(&actor));
        assert!(!KindCapabilities.is_airborne(&actor));
    }
}
