//! Goal selection for tame companions.
//!
//! Priority: a leashed companion that has strayed too far comes back first,
//! then anything worth fetching nearby, then the player.

use crate::config::MovementConfig;
use crate::env::{DecisionRng, DesiredObject, ItemAppeal, MovementEnv, OracleError};
use crate::state::{ActorState, GameState, Hunger};

use super::{Bias, Goal, GoalSource};

pub(super) fn select(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    rng: &mut DecisionRng<'_>,
) -> Result<Goal, OracleError> {
    let config = env.config()?.movement();
    let player = state.player_position();

    if actor.leashed && actor.position.chebyshev(player) > config.leash_tether {
        return Ok(Goal::approach(player, GoalSource::Leash));
    }

    if let Some(object) = wanted_object(state, env, actor, rng, config)? {
        return Ok(Goal::approach(object.position, GoalSource::Object(object.appeal)));
    }

    let distance_sq = actor.position.distance_squared(player);
    let mut bias = if distance_sq >= config.companion_follow_distance_sq {
        Bias::Approach
    } else if env.capabilities()?.is_fleeing(actor) {
        Bias::Retreat
    } else {
        Bias::Indifferent
    };

    // Outside rooms the player is usually on the move, so keep up.
    if bias == Bias::Indifferent && distance_sq > 1 {
        let player_outside = state
            .tile_view(env.map()?, player)
            .is_some_and(|view| !view.is_room());
        if player_outside || rng.one_in(config.companion_whim_odds) {
            bias = Bias::Approach;
        }
    }

    Ok(Goal::new(player, bias, GoalSource::Player))
}

/// Nearest object the companion currently cares about.
fn wanted_object(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    rng: &mut DecisionRng<'_>,
    config: &MovementConfig,
) -> Result<Option<DesiredObject>, OracleError> {
    let objects = env
        .items()?
        .desired_objects_near(state, actor, config.pet_search_radius);
    if objects.is_empty() {
        return Ok(None);
    }

    let hunger = actor
        .companion
        .map_or(Hunger::Content, |companion| companion.hunger(state.turn.clock));
    let apport = actor.companion.map_or(0, |companion| u32::from(companion.apport));
    let collects = env.capabilities()?.collects_items(actor);
    let fetches = objects.iter().any(|object| object.appeal == ItemAppeal::Plaything)
        && rng.below(10) < apport;

    Ok(objects
        .into_iter()
        .filter(|object| object.position != actor.position)
        .filter(|object| !object.cursed || hunger == Hunger::Starving)
        .filter(|object| match object.appeal {
            ItemAppeal::Treat => true,
            ItemAppeal::Food => hunger >= Hunger::Hungry,
            ItemAppeal::Plaything => fetches,
            ItemAppeal::Loot => collects,
        })
        .min_by_key(|object| (object.position.distance_squared(actor.position), object.position)))
}
