//! Terrain, door and trap rules shared by the enumerator and the pathfinder.

use crate::env::{
    CapabilityOracle, Door, DoorState, MapOracle, MovementEnv, OracleError, TerrainKind,
};
use crate::state::{ActorState, EntityId, GameState, Position, TileView, Trap, TrapKind};

use super::Permissions;

/// Whether terrain lets the actor in, and at what price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainAccess {
    Blocked,
    Open,
    /// Passable only by using these permissions.
    Requires(Permissions),
}

/// Whether a trap can hurt the actor stepping on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapThreat {
    Harmless,
    Harmful,
    /// Category code the rules do not know.
    Unknown,
}

/// Capability answers for one actor, fetched once per decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mobility {
    pub airborne: bool,
    pub swims: bool,
    pub tunnels: bool,
    pub passes_walls: bool,
    pub passes_bars: bool,
    pub amorphous: bool,
    pub lava_tolerant: bool,
    pub fire_resistant: bool,
    pub sleep_resistant: bool,
    pub clings: bool,
}

impl Mobility {
    pub fn of(actor: &ActorState, caps: &dyn CapabilityOracle) -> Self {
        Self {
            airborne: caps.is_airborne(actor),
            swims: caps.can_swim(actor),
            tunnels: caps.can_tunnel(actor),
            passes_walls: caps.can_pass_walls(actor),
            passes_bars: caps.can_pass_bars(actor),
            amorphous: caps.is_amorphous(actor),
            lava_tolerant: caps.tolerates_lava(actor),
            fire_resistant: caps.resists_fire(actor),
            sleep_resistant: caps.resists_sleep(actor),
            clings: actor.kind.has(crate::state::MovementModes::CLINGS),
        }
    }
}

/// Movement rules bound to one actor and one state snapshot.
pub struct MoveRules<'a> {
    state: &'a GameState,
    map: &'a dyn MapOracle,
    caps: &'a dyn CapabilityOracle,
    actor: &'a ActorState,
    mobility: Mobility,
    believed_player: Option<Position>,
}

impl<'a> MoveRules<'a> {
    /// # Errors
    ///
    /// Fails when the map or capability oracle is missing.
    pub fn new(
        state: &'a GameState,
        env: &MovementEnv<'a>,
        actor: &'a ActorState,
    ) -> Result<Self, OracleError> {
        let map = env.map()?;
        let caps = env.capabilities()?;
        Ok(Self {
            state,
            map,
            caps,
            actor,
            mobility: Mobility::of(actor, caps),
            believed_player: caps.believes_player_location(actor),
        })
    }

    pub fn mobility(&self) -> Mobility {
        self.mobility
    }

    pub fn actor(&self) -> &ActorState {
        self.actor
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Where the actor thinks the player is.
    pub fn believed_player(&self) -> Option<Position> {
        self.believed_player
    }

    pub fn view(&self, position: Position) -> Option<TileView> {
        self.state.tile_view(self.map, position)
    }

    /// The same rules seen from another live actor on the snapshot.
    pub fn for_actor(&self, id: EntityId) -> Option<MoveRules<'a>> {
        let actor = self.state.entities.live_actor(id)?;
        Some(MoveRules {
            state: self.state,
            map: self.map,
            caps: self.caps,
            actor,
            mobility: Mobility::of(actor, self.caps),
            believed_player: self.caps.believes_player_location(actor),
        })
    }

    /// The actor could stand on `position` without using any permission.
    pub fn can_stand_on(&self, position: Position) -> bool {
        self.view(position).is_some_and(|view| {
            self.terrain_access(&view, Permissions::empty(), false) == TerrainAccess::Open
        })
    }

    /// Nothing solid and no shut door lies between `from` and `to`.
    ///
    /// Leaps longer than one step fly over the intermediate cells; wall
    /// phasers ignore walls and amorphous actors seep under doors.
    pub fn line_clear(&self, from: Position, to: Position) -> bool {
        let m = self.mobility;
        from.line_to(to).all(|cell| {
            let Some(view) = self.view(cell) else {
                return false;
            };
            let terrain = view.terrain();
            let solid = terrain.is_solid() && !m.passes_walls;
            let shut = terrain.door().is_some_and(Door::is_shut)
                && !(m.amorphous || m.passes_walls);
            !(solid || shut)
        })
    }

    /// Terrain verdict for entering `view`, given `mask`.
    ///
    /// With `through_doors` every door counts as open, which the pathfinder
    /// uses to plan routes the actor could take once doors are dealt with.
    pub fn terrain_access(
        &self,
        view: &TileView,
        mask: Permissions,
        through_doors: bool,
    ) -> TerrainAccess {
        let m = self.mobility;
        match view.terrain() {
            TerrainKind::Wall | TerrainKind::Rock => {
                if m.passes_walls {
                    TerrainAccess::Open
                } else if mask.contains(Permissions::DIG) && m.tunnels && view.is_diggable() {
                    TerrainAccess::Requires(Permissions::DIG)
                } else {
                    TerrainAccess::Blocked
                }
            }
            TerrainKind::Pool if !(m.swims || m.airborne) => TerrainAccess::Blocked,
            TerrainKind::Lava if !(m.airborne || m.lava_tolerant) => TerrainAccess::Blocked,
            TerrainKind::IronBars if !(m.passes_bars || m.passes_walls) => TerrainAccess::Blocked,
            TerrainKind::Doorway(door) if !through_doors => self.door_access(door, mask),
            _ => TerrainAccess::Open,
        }
    }

    fn door_access(&self, door: Door, mask: Permissions) -> TerrainAccess {
        if !door.is_shut() || self.mobility.amorphous || self.mobility.passes_walls {
            return TerrainAccess::Open;
        }
        let preferred = match door.state {
            DoorState::Locked => Permissions::UNLOCK_DOORS,
            _ => Permissions::OPEN_DOORS,
        };
        if mask.contains(preferred) {
            TerrainAccess::Requires(preferred)
        } else if mask.contains(Permissions::BUST_DOORS) {
            TerrainAccess::Requires(Permissions::BUST_DOORS)
        } else {
            TerrainAccess::Blocked
        }
    }

    /// Diagonal movement restrictions between `from` and `to`.
    ///
    /// Doorways with a door fitted cannot be entered or left diagonally
    /// (amorphous actors flow around the frame). A single diagonal step
    /// between two blocking orthogonal corners is too tight for anything
    /// larger than small.
    pub fn diagonal_refused(&self, from: Position, to: Position) -> bool {
        if !from.is_diagonal_to(to) {
            return false;
        }
        let m = self.mobility;

        if !m.amorphous {
            let leafed = |position| {
                self.view(position)
                    .and_then(|view| view.terrain().door())
                    .is_some_and(Door::has_leaf)
            };
            if leafed(from) || leafed(to) {
                return true;
            }
        }

        if from.chebyshev(to) == 1
            && !(m.amorphous || m.passes_walls || self.actor.kind.size.squeezes_diagonally())
        {
            let blocks = |position| {
                self.view(position)
                    .is_some_and(|view| view.terrain().blocks_squeeze())
            };
            let corner_a = Position::new(to.x, from.y);
            let corner_b = Position::new(from.x, to.y);
            if blocks(corner_a) && blocks(corner_b) {
                return true;
            }
        }

        false
    }

    /// Classifies a trap against this actor.
    pub fn trap_threat(&self, trap: Trap) -> TrapThreat {
        let m = self.mobility;
        use TrapKind::*;
        let harmless = match trap.kind {
            Unrecognized(_) => return TrapThreat::Unknown,
            Pit | SpikedPit | Hole | TrapDoor | LandMine => m.airborne,
            SqueakyBoard => m.airborne || m.clings,
            BearTrap => m.airborne || m.amorphous || self.actor.kind.size.squeezes_diagonally(),
            SleepingGas => m.sleep_resistant,
            Fire => m.fire_resistant,
            Web => m.amorphous,
            Rust | Statue | VibratingSquare => true,
            Arrow | Dart | FallingRock | RollingBoulder | Teleport | LevelTeleport
            | MagicPortal | Magic | AntiMagic | Polymorph => false,
        };
        if harmless {
            TrapThreat::Harmless
        } else {
            TrapThreat::Harmful
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use crate::env::{Env, GridMap, KindCapabilities, NoItemInterest, PcgRng};
    use crate::state::{ActorKind, EntityId, MovementModes, SizeClass};

    fn with_rules<F>(rows: &[&str], kind: ActorKind, at: Position, check: F)
    where
        F: FnOnce(&MoveRules<'_>),
    {
        let map = GridMap::from_rows(rows).expect("valid layout");
        let config = MovementConfig::default();
        let env = Env::with_all(&map, &KindCapabilities, &NoItemInterest, &config, &PcgRng)
            .as_movement_env();
        let state = GameState::new(1, Position::new(0, 0));
        let actor = ActorState::new(EntityId(1), at, kind);
        let rules = MoveRules::new(&state, &env, &actor).expect("oracles present");
        check(&rules);
    }

    #[test]
    fn locked_doors_prefer_unlocking_over_busting() {
        let kind = ActorKind::default();
        with_rules(&[".*"], kind, Position::new(0, 0), |rules| {
            let view = rules.view(Position::new(1, 0)).expect("on map");
            let both = Permissions::UNLOCK_DOORS | Permissions::BUST_DOORS;
            assert_eq!(
                rules.terrain_access(&view, both, false),
                TerrainAccess::Requires(Permissions::UNLOCK_DOORS)
            );
            assert_eq!(
                rules.terrain_access(&view, Permissions::OPEN_DOORS, false),
                TerrainAccess::Blocked
            );
            assert_eq!(
                rules.terrain_access(&view, Permissions::empty(), true),
                TerrainAccess::Open
            );
        });
    }

    #[test]
    fn squeeze_depends_on_size() {
        let rows = ["...", "..|", ".|."];
        let medium = ActorKind::default();
        with_rules(&rows, medium, Position::new(1, 1), |rules| {
            assert!(rules.diagonal_refused(Position::new(1, 1), Position::new(2, 2)));
        });
        let tiny = ActorKind::default().with_size(SizeClass::Tiny);
        with_rules(&rows, tiny, Position::new(1, 1), |rules| {
            assert!(!rules.diagonal_refused(Position::new(1, 1), Position::new(2, 2)));
        });
    }

    #[test]
    fn flyers_ignore_pits_but_not_arrows() {
        let flyer = ActorKind::default().with_modes(MovementModes::FLY);
        with_rules(&["."], flyer, Position::new(0, 0), |rules| {
            assert_eq!(rules.trap_threat(Trap::new(TrapKind::Pit)), TrapThreat::Harmless);
            assert_eq!(rules.trap_threat(Trap::new(TrapKind::Arrow)), TrapThreat::Harmful);
            assert_eq!(
                rules.trap_threat(Trap::new(TrapKind::Unrecognized(200))),
                TrapThreat::Unknown
            );
        });
    }
}
