//! Move arbitration: from a goal to one executed action.
//!
//! 1. Build the permission mask (digging is dropped when closing in).
//! 2. Enumerate candidates and narrow them (status, policy, preferences).
//! 3. Flood a distance field at the goal unless the bias is indifferent.
//! 4. Pick the candidate with the best bias-signed cost change.
//! 5. Let the leash override the pick.
//! 6. Execute it against the state and the collaborators.
mod error;
mod execute;
mod leash;
mod select;

pub use error::ResolveError;

use crate::env::{Collaborators, DecisionRng, MovementEnv};
use crate::movement::enumerate::enumerate_with;
use crate::movement::{MoveRules, PermissionProfile};
use crate::pathfinding::{DistanceField, FieldOptions};
use crate::state::{EntityId, GameState};
use crate::strategy::{Bias, Goal};

/// What one action amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOutcome {
    /// Nothing legal, nothing useful, or a diagnostic no-op.
    NoAction,
    Moved,
    /// Fought, dug or otherwise acted without changing cell.
    Acted,
    /// The actor died during its own action.
    Died,
}

impl TurnOutcome {
    pub fn is_terminal(self) -> bool {
        self == TurnOutcome::Died
    }
}

/// Resolves one action for `actor` towards (or away from) `goal`.
///
/// # Errors
///
/// Returns an error only for configuration faults: a missing oracle or an
/// actor that is unknown or already dead.
pub fn resolve_turn(
    state: &mut GameState,
    env: &MovementEnv<'_>,
    actor: EntityId,
    goal: Goal,
    rng: &mut DecisionRng<'_>,
    collaborators: &mut Collaborators<'_>,
) -> Result<TurnOutcome, ResolveError> {
    let mover = state
        .entities
        .live_actor(actor)
        .cloned()
        .ok_or(ResolveError::UnknownActor(actor))?;
    let caps = env.capabilities()?;
    let config = env.config()?.movement();
    let map = env.map()?;

    let mut mask = PermissionProfile::mask(&mover, caps);
    if goal.bias == Bias::Approach {
        mask = PermissionProfile::suppress_dig_near(
            mask,
            mover.position,
            goal.target,
            config.dig_suppress_range,
        );
    }

    let decision = {
        let rules = MoveRules::new(state, env, &mover)?;
        let radius = u32::from(mover.kind.leap).max(1);
        let mut candidates = enumerate_with(&rules, mask, radius, config.crowd_threshold);
        select::restrict(state, &mover, config, &mut candidates);
        select::soft_filter(&rules, caps, config, rng, &mut candidates);

        let field = (goal.bias != Bias::Indifferent).then(|| {
            DistanceField::build_with(&rules, goal.target, mask, FieldOptions::for_mask(mask))
        });
        let choice = select::choose(
            &candidates,
            mover.position,
            field.as_ref(),
            goal.bias,
            rng,
            config.tie_break_base,
        );
        tracing::debug!(
            actor = %actor,
            goal = %goal.target,
            bias = %goal.bias,
            candidates = candidates.len(),
            choice = ?choice.map(|c| c.position),
            "arbitrated"
        );
        leash::correct(
            &rules,
            &candidates,
            choice,
            state.player_position(),
            config.leash_tether,
        )
    };

    let outcome = execute::apply(state, map, actor, decision, collaborators);
    tracing::debug!(actor = %actor, %outcome, "action resolved");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use crate::env::{
        AttackOutcome, CombatResolver, Door, DoorState, Env, GridMap, HookOutcome, InertResolver,
        KindCapabilities, MoveHooks, NoItemInterest, PcgRng, TerrainKind, TrapOutcome,
        TrapResolver,
    };
    use crate::state::{
        ActorKind, ActorState, Disposition, MovementModes, PlayerBelief, Position, StatusFlags,
        Trap, TrapKind,
    };
    use crate::strategy::GoalSource;

    /// Scripted collaborators that record what they were asked to do.
    #[derive(Default)]
    struct Script {
        attack: Option<AttackOutcome>,
        trap: Option<TrapOutcome>,
        attacks: Vec<Position>,
        springs: Vec<(Position, TrapKind)>,
        door_traps: Vec<Position>,
        moves: Vec<(Position, Position)>,
    }

    impl CombatResolver for Script {
        fn attack(&mut self, _: &mut GameState, _: EntityId, target: Position) -> AttackOutcome {
            self.attacks.push(target);
            self.attack.unwrap_or(AttackOutcome::Hit)
        }
    }

    impl TrapResolver for Script {
        fn spring(
            &mut self,
            _: &mut GameState,
            _: EntityId,
            at: Position,
            trap: Trap,
        ) -> TrapOutcome {
            self.springs.push((at, trap.kind));
            self.trap.unwrap_or(TrapOutcome::Affected)
        }

        fn door_trap(&mut self, _: &mut GameState, _: EntityId, door: Position) -> TrapOutcome {
            self.door_traps.push(door);
            self.trap.unwrap_or(TrapOutcome::Affected)
        }
    }

    impl MoveHooks for Script {
        fn after_move(
            &mut self,
            _: &mut GameState,
            _: EntityId,
            from: Position,
            to: Position,
        ) -> HookOutcome {
            self.moves.push((from, to));
            HookOutcome::Continue
        }

        fn after_dig(&mut self, _: &mut GameState, _: EntityId, _: Position) -> HookOutcome {
            HookOutcome::Continue
        }
    }

    struct Level {
        map: GridMap,
        config: MovementConfig,
        state: GameState,
    }

    impl Level {
        fn new(rows: &[&str], player: Position) -> Self {
            Self {
                map: GridMap::from_rows(rows).expect("valid layout"),
                config: MovementConfig::default(),
                state: GameState::new(5, player),
            }
        }

        fn add(&mut self, actor: ActorState) -> EntityId {
            self.state.add_actor(actor).expect("free cell")
        }

        fn resolve(&mut self, actor: EntityId, goal: Goal, combat: &mut Script) -> TurnOutcome {
            let mut traps = Script::default();
            self.resolve_all(actor, goal, combat, &mut traps)
        }

        fn resolve_all(
            &mut self,
            actor: EntityId,
            goal: Goal,
            combat: &mut Script,
            traps: &mut Script,
        ) -> TurnOutcome {
            let env = Env::with_all(
                &self.map,
                &KindCapabilities,
                &NoItemInterest,
                &self.config,
                &PcgRng,
            )
            .as_movement_env();
            let mut rng = DecisionRng::new(&PcgRng, 5, 0, actor);
            let mut hooks = InertResolver;
            let mut collaborators = Collaborators::new(combat, traps, &mut hooks);
            resolve_turn(&mut self.state, &env, actor, goal, &mut rng, &mut collaborators)
                .expect("configured")
        }
    }

    fn hunter(at: Position, player: Position) -> ActorState {
        ActorState::new(EntityId(1), at, ActorKind::default())
            .with_belief(PlayerBelief::Accurate(player))
    }

    #[test]
    fn adjacent_player_is_attacked_not_walked_past() {
        let player = Position::new(2, 0);
        let mut level = Level::new(&["....."], player);
        let id = level.add(hunter(Position::new(1, 0), player));
        let mut script = Script::default();
        let outcome = level.resolve(id, Goal::approach(player, GoalSource::Belief), &mut script);
        assert_eq!(outcome, TurnOutcome::Acted);
        assert_eq!(script.attacks, vec![player]);
        assert_eq!(level.state.entities.actor(id).map(|a| a.position), Some(Position::new(1, 0)));
    }

    #[test]
    fn approach_steps_closer() {
        let player = Position::new(6, 0);
        let mut level = Level::new(&["......."], player);
        let id = level.add(hunter(Position::new(1, 0), player));
        let mut script = Script::default();
        let outcome = level.resolve(id, Goal::approach(player, GoalSource::Belief), &mut script);
        assert_eq!(outcome, TurnOutcome::Moved);
        assert_eq!(level.state.entities.actor(id).map(|a| a.position), Some(Position::new(2, 0)));
        assert_eq!(level.state.occupant_at(Position::new(1, 0)), None);
        assert_eq!(level.state.occupant_at(Position::new(2, 0)), Some(id));
    }

    #[test]
    fn killing_blow_removes_defender() {
        let mut level = Level::new(&["....."], Position::new(4, 0));
        let pet = level.add(
            ActorState::new(EntityId(2), Position::new(2, 0), ActorKind::default())
                .with_disposition(Disposition::Tame),
        );
        let id = level.add(hunter(Position::new(1, 0), Position::new(4, 0)));
        let mut script = Script {
            attack: Some(AttackOutcome::DefenderDied),
            ..Script::default()
        };
        let goal = Goal::approach(Position::new(2, 0), GoalSource::Belief);
        assert_eq!(level.resolve(id, goal, &mut script), TurnOutcome::Acted);
        assert!(!level.state.entities.actor(pet).is_some_and(|a| a.alive));
        assert_eq!(level.state.occupant_at(Position::new(2, 0)), None);
    }

    #[test]
    fn fatal_counterattack_kills_the_attacker() {
        let player = Position::new(2, 0);
        let mut level = Level::new(&["....."], player);
        let id = level.add(hunter(Position::new(1, 0), player));
        let mut script = Script {
            attack: Some(AttackOutcome::AttackerDied),
            ..Script::default()
        };
        let outcome = level.resolve(id, Goal::approach(player, GoalSource::Belief), &mut script);
        assert_eq!(outcome, TurnOutcome::Died);
        assert_eq!(level.state.occupant_at(Position::new(1, 0)), None);
    }

    #[test]
    fn opening_a_door_moves_into_it() {
        let player = Position::new(4, 1);
        let mut level = Level::new(&["|||||", "|.+..", "|||||"], player);
        let kind = ActorKind::default().with_modes(MovementModes::OPEN_DOORS);
        let id = level.add(
            ActorState::new(EntityId(1), Position::new(1, 1), kind)
                .with_belief(PlayerBelief::Accurate(player)),
        );
        let mut script = Script::default();
        let outcome = level.resolve(id, Goal::approach(player, GoalSource::Belief), &mut script);
        assert_eq!(outcome, TurnOutcome::Moved);
        let door = Position::new(2, 1);
        assert_eq!(level.state.entities.actor(id).map(|a| a.position), Some(door));
        assert_eq!(
            level.state.world.tile_map.terrain_override(door),
            Some(TerrainKind::Doorway(Door::new(DoorState::Open)))
        );
    }

    #[test]
    fn trapped_door_explodes() {
        let player = Position::new(4, 1);
        let mut level = Level::new(&["|||||", "|.+..", "|||||"], player);
        let door = Position::new(2, 1);
        level.map.set_tile(
            door,
            crate::env::StaticTile::new(TerrainKind::Doorway(
                Door::new(DoorState::Closed).trapped(),
            )),
        );
        let kind = ActorKind::default().with_modes(MovementModes::OPEN_DOORS);
        let id = level.add(
            ActorState::new(EntityId(1), Position::new(1, 1), kind)
                .with_belief(PlayerBelief::Accurate(player)),
        );
        let mut combat = Script::default();
        let mut traps = Script {
            trap: Some(TrapOutcome::Died),
            ..Script::default()
        };
        let goal = Goal::approach(player, GoalSource::Belief);
        let outcome = level.resolve_all(id, goal, &mut combat, &mut traps);
        assert_eq!(outcome, TurnOutcome::Died);
        assert_eq!(traps.door_traps, vec![door]);
        assert_eq!(
            level.state.world.tile_map.terrain_override(door),
            Some(TerrainKind::Doorway(Door::new(DoorState::NoDoor)))
        );
    }

    #[test]
    fn unfamiliar_trap_is_sprung_and_learned() {
        let mut level = Level::new(&["|||||", "|...|", "|||||"], Position::new(3, 1));
        let trap_cell = Position::new(2, 1);
        level.state.world.tile_map.set_trap(trap_cell, Trap::new(TrapKind::Arrow));
        let id = level.add(hunter(Position::new(1, 1), Position::new(3, 1)));
        let mut combat = Script::default();
        let mut traps = Script::default();
        let goal = Goal::approach(Position::new(3, 1), GoalSource::Belief);
        let outcome = level.resolve_all(id, goal, &mut combat, &mut traps);
        assert_eq!(outcome, TurnOutcome::Moved);
        assert_eq!(traps.springs, vec![(trap_cell, TrapKind::Arrow)]);
        assert!(
            level
                .state
                .entities
                .actor(id)
                .is_some_and(|a| a.traps_seen.knows(TrapKind::Arrow))
        );
    }

    #[test]
    fn trapped_actor_only_fights() {
        let player = Position::new(6, 0);
        let mut level = Level::new(&["......."], player);
        let mut actor = hunter(Position::new(1, 0), player);
        actor.status.set(StatusFlags::TRAPPED, true);
        let id = level.add(actor);
        let mut script = Script::default();
        let outcome = level.resolve(id, Goal::approach(player, GoalSource::Belief), &mut script);
        assert_eq!(outcome, TurnOutcome::NoAction);
    }

    #[test]
    fn dead_actor_is_a_configuration_fault() {
        let mut level = Level::new(&["..."], Position::new(2, 0));
        let id = level.add(hunter(Position::new(0, 0), Position::new(2, 0)));
        level.state.kill_actor(id);
        let env = Env::with_all(
            &level.map,
            &KindCapabilities,
            &NoItemInterest,
            &level.config,
            &PcgRng,
        )
        .as_movement_env();
        let mut rng = DecisionRng::new(&PcgRng, 5, 0, id);
        let (mut a, mut b, mut c) = (InertResolver, InertResolver, InertResolver);
        let mut collaborators = Collaborators::new(&mut a, &mut b, &mut c);
        let result = resolve_turn(
            &mut level.state,
            &env,
            id,
            Goal::idle(Position::ORIGIN),
            &mut rng,
            &mut collaborators,
        );
        assert_eq!(result, Err(ResolveError::UnknownActor(id)));
    }
}
