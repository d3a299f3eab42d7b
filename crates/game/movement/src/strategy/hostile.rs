//! Goal selection for hostile and independent actors.

use crate::env::{DecisionRng, ItemAppeal, MovementEnv, OracleError};
use crate::state::{ActorState, GameState, Position, StrategyTag};

use super::{Goal, GoalSource, fallback};

pub(super) fn select(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    rng: &mut DecisionRng<'_>,
) -> Result<Goal, OracleError> {
    let caps = env.capabilities()?;
    let config = env.config()?.movement();

    let mut believed = caps.believes_player_location(actor);
    if actor.is_peaceful() && !rng.one_in(config.peaceful_notice_odds) {
        believed = None;
    }
    let strategic = actor.strategy.filter(|s| s.tag != StrategyTag::Search);

    let threatened = believed.is_some_and(|cell| {
        actor.is_hostile() && !caps.ignores_wards(actor) && protected(state, env, cell)
    });
    let fleeing = caps.is_fleeing(actor)
        || actor.hp.percent() < config.flee_hp_percent
        || threatened;

    if fleeing {
        if let Some(from) = believed.or(strategic.map(|s| s.target)) {
            return Ok(Goal::retreat(from, GoalSource::Fleeing));
        }
        return Ok(fallback(actor));
    }

    if caps.is_confused(actor) || caps.is_stunned(actor) {
        let nominal = believed
            .or(strategic.map(|s| s.target))
            .unwrap_or(actor.position);
        return Ok(Goal::new(nominal, super::Bias::Indifferent, GoalSource::Confused));
    }

    if let Some(strategy) = strategic {
        let source = GoalSource::Strategy(strategy.tag);
        return Ok(match strategy.tag {
            StrategyTag::Flee => Goal::retreat(strategy.target, source),
            _ => Goal::approach(strategy.target, source),
        });
    }

    // Collectors without a fresh sighting go shopping instead.
    let firm = believed.is_some() && actor.belief.is_current();
    if !firm && caps.collects_items(actor) {
        if let Some(object) = nearest_loot(state, env, actor, config.pet_search_radius)? {
            return Ok(Goal::approach(object, GoalSource::Object(ItemAppeal::Loot)));
        }
    }

    Ok(match believed {
        Some(cell) => Goal::approach(cell, GoalSource::Belief),
        None => fallback(actor),
    })
}

/// The cell is warded or consecrated ground.
fn protected(state: &GameState, env: &MovementEnv<'_>, cell: Position) -> bool {
    env.map()
        .ok()
        .and_then(|map| state.tile_view(map, cell))
        .is_some_and(|view| view.is_warded() || view.is_sanctuary())
}

fn nearest_loot(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    radius: u32,
) -> Result<Option<Position>, OracleError> {
    let objects = env.items()?.desired_objects_near(state, actor, radius);
    Ok(objects
        .into_iter()
        .filter(|object| !object.cursed && object.position != actor.position)
        .min_by_key(|object| (object.position.distance_squared(actor.position), object.position))
        .map(|object| object.position))
}
