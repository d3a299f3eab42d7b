//! Goal selection: where an actor's legs want to go this action.
//!
//! The result is a plain [`Goal`] value handed to arbitration. Nothing here
//! decides whether to fight; that falls out of which candidates arbitration
//! is allowed to pick.

mod companion;
mod hostile;

use crate::env::{DecisionRng, ItemAppeal, MovementEnv, OracleError};
use crate::policy::MovementPolicy;
use crate::state::{ActorState, GameState, Position, StrategyTag};

/// Which way the distance field should pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Bias {
    Approach,
    Retreat,
    Indifferent,
}

impl Bias {
    /// Multiplier applied to field-cost deltas.
    pub fn sign(self) -> i64 {
        match self {
            Bias::Approach => 1,
            Bias::Retreat => -1,
            Bias::Indifferent => 0,
        }
    }
}

/// Why a goal was chosen. Used for logging and by tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalSource {
    Strategy(StrategyTag),
    Belief,
    Object(ItemAppeal),
    /// Companion trailing the player.
    Player,
    /// Leashed companion pulled back to the player.
    Leash,
    Fleeing,
    Confused,
    /// Stationed actor idling at its post.
    Post,
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub target: Position,
    pub bias: Bias,
    pub source: GoalSource,
}

impl Goal {
    pub const fn new(target: Position, bias: Bias, source: GoalSource) -> Self {
        Self {
            target,
            bias,
            source,
        }
    }

    pub const fn approach(target: Position, source: GoalSource) -> Self {
        Self::new(target, Bias::Approach, source)
    }

    pub const fn retreat(target: Position, source: GoalSource) -> Self {
        Self::new(target, Bias::Retreat, source)
    }

    /// No goal: stay local and wander.
    pub const fn idle(at: Position) -> Self {
        Self::new(at, Bias::Indifferent, GoalSource::Idle)
    }
}

/// Picks the goal for `actor`'s next action.
///
/// Movement policies get the first say; after that companions and everyone
/// else follow their own logic.
///
/// # Errors
///
/// Fails only when a required oracle is missing.
pub fn select_goal(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    rng: &mut DecisionRng<'_>,
) -> Result<Goal, OracleError> {
    if let Some(goal) = actor.policy.preempt_goal(actor) {
        tracing::debug!(actor = %actor.id, ?goal, policy = ?actor.policy, "policy goal");
        return Ok(goal);
    }

    let goal = if actor.is_tame() || actor.policy == MovementPolicy::Companion {
        companion::select(state, env, actor, rng)?
    } else {
        hostile::select(state, env, actor, rng)?
    };
    tracing::debug!(actor = %actor.id, ?goal, "goal selected");
    Ok(goal)
}

/// Shared fallback once the actor has no idea where the player is: the last
/// strategic search point, or nowhere in particular.
fn fallback(actor: &ActorState) -> Goal {
    match actor.strategy {
        Some(strategy) if strategy.tag == StrategyTag::Search => {
            Goal::approach(strategy.target, GoalSource::Strategy(StrategyTag::Search))
        }
        _ => Goal::idle(actor.position),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::MovementConfig;
    use crate::env::{Env, GridMap, ItemInterestOracle, KindCapabilities, MovementEnv, PcgRng};

    /// Owns everything a `MovementEnv` borrows.
    pub(crate) struct Oracles<I: ItemInterestOracle> {
        pub map: GridMap,
        pub config: MovementConfig,
        pub items: I,
    }

    impl<I: ItemInterestOracle> Oracles<I> {
        pub fn new(rows: &[&str], items: I) -> Self {
            Self {
                map: GridMap::from_rows(rows).expect("valid layout"),
                config: MovementConfig::default(),
                items,
            }
        }

        pub fn env(&self) -> MovementEnv<'_> {
            Env::with_all(&self.map, &KindCapabilities, &self.items, &self.config, &PcgRng)
                .as_movement_env()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Oracles;
    use super::*;
    use crate::env::{NoItemInterest, PcgRng};
    use crate::state::{ActorKind, EntityId, StrategicGoal};

    #[test]
    fn search_point_is_the_fallback() {
        let actor = ActorState::new(EntityId(1), Position::new(1, 1), ActorKind::default())
            .with_strategy(StrategicGoal::new(StrategyTag::Search, Position::new(4, 4)));
        assert_eq!(
            fallback(&actor),
            Goal::approach(
                Position::new(4, 4),
                GoalSource::Strategy(StrategyTag::Search)
            )
        );
        let lost = ActorState::new(EntityId(1), Position::new(1, 1), ActorKind::default());
        assert_eq!(fallback(&lost), Goal::idle(Position::new(1, 1)));
    }

    #[test]
    fn sentry_policy_preempts() {
        let oracles = Oracles::new(&["....."], NoItemInterest);
        let env = oracles.env();
        let state = GameState::new(1, Position::new(4, 0));
        let actor = ActorState::new(EntityId(1), Position::new(0, 0), ActorKind::default())
            .with_policy(MovementPolicy::Sentry);
        let mut rng = DecisionRng::new(&PcgRng, 1, 0, actor.id);
        let goal = select_goal(&state, &env, &actor, &mut rng).expect("oracles present");
        assert_eq!(goal.bias, Bias::Indifferent);
        assert_eq!(goal.target, actor.position);
    }
}
