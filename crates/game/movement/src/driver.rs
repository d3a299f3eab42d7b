//! Per-turn movement driver.
//!
//! The [`MovementDriver`] runs one global turn for every actor on the level:
//! it advances the clock, ticks timed statuses, then walks a snapshot of the
//! roster. Each actor gets the action budget the scheduler grants it for the
//! turn, and every action is goal selection followed by arbitration.

use crate::arbitration::{ResolveError, TurnOutcome, resolve_turn};
use crate::env::{Collaborators, DecisionRng, MovementEnv};
use crate::schedule::Scheduler;
use crate::state::{EntityId, GameState, Tick};
use crate::strategy::select_goal;

/// Summary of one driver pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: Tick,
    /// Every action taken, in execution order.
    pub actions: Vec<(EntityId, TurnOutcome)>,
    /// Actors purged from the roster at the end of the pass.
    pub removed: Vec<EntityId>,
}

impl TurnReport {
    pub fn actions_by(&self, actor: EntityId) -> usize {
        self.actions.iter().filter(|(id, _)| *id == actor).count()
    }
}

/// Drives actor movement for one level's [`GameState`].
pub struct MovementDriver<'a> {
    state: &'a mut GameState,
}

impl<'a> MovementDriver<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Runs one global turn.
    ///
    /// Actors act in roster order as captured at the start of the pass.
    /// Actors spawned by a collaborator during the pass wait for the next
    /// turn; actors killed before their slot are skipped.
    ///
    /// # Errors
    ///
    /// Fails on configuration faults only (missing oracle, zero quantum).
    pub fn run_turn(
        &mut self,
        env: &MovementEnv<'_>,
        collaborators: &mut Collaborators<'_>,
    ) -> Result<TurnReport, ResolveError> {
        let scheduler = Scheduler::new(env.config()?.quantum())?;
        let caps = env.capabilities()?;

        let turn = self.state.turn.clock.next();
        self.state.turn.clock = turn;
        for actor in self.state.entities.live_actors_mut() {
            actor.status.tick();
        }

        let mut report = TurnReport {
            turn,
            ..TurnReport::default()
        };
        let roster = self.state.entities.roster();
        tracing::debug!(turn = turn.0, actors = roster.len(), "turn started");

        for id in roster {
            let Some(actor) = self.state.entities.live_actor(id) else {
                continue;
            };
            if caps.is_asleep(actor) || caps.is_frozen(actor) {
                tracing::trace!(actor = %id, "inactive, skipping");
                continue;
            }
            let budget = scheduler.actions_available(actor, turn);
            for _ in 0..budget {
                let outcome = self.act(env, id, collaborators)?;
                report.actions.push((id, outcome));
                if outcome.is_terminal() || self.state.entities.live_actor(id).is_none() {
                    break;
                }
            }
        }

        self.state.turn.current_actor = None;
        report.removed = self.state.entities.purge_dead();
        if !report.removed.is_empty() {
            tracing::debug!(turn = turn.0, removed = ?report.removed, "purged dead actors");
        }
        Ok(report)
    }

    /// Runs a single action for `actor`: goal selection, then arbitration.
    ///
    /// # Errors
    ///
    /// Fails when an oracle is missing or the actor is unknown or dead.
    pub fn act(
        &mut self,
        env: &MovementEnv<'_>,
        actor: EntityId,
        collaborators: &mut Collaborators<'_>,
    ) -> Result<TurnOutcome, ResolveError> {
        let mover = self
            .state
            .entities
            .live_actor(actor)
            .cloned()
            .ok_or(ResolveError::UnknownActor(actor))?;
        self.state.turn.current_actor = Some(actor);
        let nonce = self.state.turn.next_nonce();
        let mut rng = DecisionRng::new(env.rng()?, self.state.game_seed, nonce, actor);

        let goal = select_goal(self.state, env, &mover, &mut rng)?;
        resolve_turn(self.state, env, actor, goal, &mut rng, collaborators)
    }
}
