//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use game_movement::env::NoItemInterest;
use game_movement::{
    AttackOutcome, Collaborators, CombatResolver, EntityId, Env, GameState, Goal, GridMap,
    HookOutcome, InertResolver, KindCapabilities, MoveHooks, MovementConfig, MovementDriver,
    MovementEnv, PcgRng, Position, TurnOutcome, TurnReport, resolve_turn,
};
use game_movement::{ActorState, DecisionRng};

/// Installs a test-friendly subscriber once; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An open rectangular room of room-floor cells.
pub fn room_rows(width: usize, height: usize) -> Vec<String> {
    vec![".".repeat(width); height]
}

pub struct Level {
    pub map: GridMap,
    pub config: MovementConfig,
    pub state: GameState,
}

impl Level {
    pub fn new(rows: &[&str], seed: u64, player: Position) -> Self {
        Self {
            map: GridMap::from_rows(rows).expect("valid layout"),
            config: MovementConfig::default(),
            state: GameState::new(seed, player),
        }
    }

    pub fn room(width: usize, height: usize, seed: u64, player: Position) -> Self {
        let rows = room_rows(width, height);
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        Self::new(&rows, seed, player)
    }

    pub fn env(&self) -> MovementEnv<'_> {
        Env::with_all(&self.map, &KindCapabilities, &NoItemInterest, &self.config, &PcgRng)
            .as_movement_env()
    }

    pub fn add(&mut self, actor: ActorState) -> EntityId {
        self.state.add_actor(actor).expect("free cell")
    }

    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.state.entities.live_actor(id).map(|actor| actor.position)
    }

    pub fn run_turn(&mut self, log: &mut Log) -> TurnReport {
        let env = Env::with_all(
            &self.map,
            &KindCapabilities,
            &NoItemInterest,
            &self.config,
            &PcgRng,
        )
        .as_movement_env();
        let mut collaborators = log.collaborators();
        MovementDriver::new(&mut self.state)
            .run_turn(&env, &mut collaborators)
            .expect("configured")
    }

    /// Resolves one action with a fixed goal, bypassing goal selection.
    pub fn resolve(&mut self, id: EntityId, goal: Goal, nonce: u64, log: &mut Log) -> TurnOutcome {
        let env = Env::with_all(
            &self.map,
            &KindCapabilities,
            &NoItemInterest,
            &self.config,
            &PcgRng,
        )
        .as_movement_env();
        let mut rng = DecisionRng::new(&PcgRng, self.state.game_seed, nonce, id);
        let mut collaborators = log.collaborators();
        resolve_turn(&mut self.state, &env, id, goal, &mut rng, &mut collaborators)
            .expect("configured")
    }

    /// Roster and occupancy grid agree, and no two entities share a cell.
    pub fn occupancy_consistent(&self) -> bool {
        let grid = self.state.world.tile_map.occupancy();
        let live = self.state.entities.live_actors().count();
        if grid.len() != live + 1 {
            return false;
        }
        if grid.get(&self.state.player_position()) != Some(&EntityId::PLAYER) {
            return false;
        }
        self.state
            .entities
            .live_actors()
            .all(|actor| grid.get(&actor.position) == Some(&actor.id))
    }
}

#[derive(Default)]
pub struct CombatLog {
    pub attacks: Vec<(EntityId, Position)>,
}

impl CombatResolver for CombatLog {
    fn attack(&mut self, _: &mut GameState, attacker: EntityId, target: Position) -> AttackOutcome {
        self.attacks.push((attacker, target));
        AttackOutcome::Miss
    }
}

#[derive(Default)]
pub struct MoveLog {
    pub moves: Vec<(EntityId, Position, Position)>,
}

impl MoveHooks for MoveLog {
    fn after_move(
        &mut self,
        _: &mut GameState,
        actor: EntityId,
        from: Position,
        to: Position,
    ) -> HookOutcome {
        self.moves.push((actor, from, to));
        HookOutcome::Continue
    }

    fn after_dig(&mut self, _: &mut GameState, _: EntityId, _: Position) -> HookOutcome {
        HookOutcome::Continue
    }
}

/// Recording collaborators: attacks always miss, traps never fire.
#[derive(Default)]
pub struct Log {
    pub combat: CombatLog,
    pub traps: InertResolver,
    pub hooks: MoveLog,
}

impl Log {
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators::new(&mut self.combat, &mut self.traps, &mut self.hooks)
    }
}
