//! Carrying out a decision: the only place movement writes to the state.

use crate::env::{
    AttackOutcome, Collaborators, Door, DoorState, HookOutcome, MapOracle, TerrainKind,
    TrapOutcome,
};
use crate::movement::{CandidateMove, Permissions};
use crate::state::{EntityId, GameState, Position, TrapKind};

use super::TurnOutcome;
use super::leash::Decision;

pub(super) fn apply(
    state: &mut GameState,
    map: &dyn MapOracle,
    actor: EntityId,
    decision: Decision,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    match decision {
        Decision::Stay => TurnOutcome::NoAction,
        Decision::Relocate(cell) => walk(state, actor, cell, collaborators),
        Decision::Take(candidate) if candidate.is_attack() => {
            attack(state, actor, candidate.position, collaborators)
        }
        Decision::Take(candidate) if candidate.is_displacement() => {
            displace(state, actor, candidate.position, collaborators)
        }
        Decision::Take(candidate) if candidate.is_dig() => {
            dig(state, actor, candidate.position, collaborators)
        }
        Decision::Take(candidate) if candidate.is_door_work() => {
            work_door(state, map, actor, candidate, collaborators)
        }
        Decision::Take(candidate) => walk(state, actor, candidate.position, collaborators),
    }
}

fn attack(
    state: &mut GameState,
    actor: EntityId,
    target: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    let defender = state.occupant_at(target);
    let outcome = collaborators.combat.attack(state, actor, target);
    tracing::debug!(%actor, %target, %outcome, "attack resolved");
    match outcome {
        AttackOutcome::AttackerDied => die(state, actor),
        AttackOutcome::DefenderDied => {
            // The player's death is the host's business.
            if let Some(defender) = defender.filter(|id| !id.is_player()) {
                state.kill_actor(defender);
            }
            TurnOutcome::Acted
        }
        AttackOutcome::Miss | AttackOutcome::Hit | AttackOutcome::Interrupted => {
            TurnOutcome::Acted
        }
    }
}

fn displace(
    state: &mut GameState,
    actor: EntityId,
    cell: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    let Some(from) = state.entities.live_actor(actor).map(|a| a.position) else {
        return TurnOutcome::NoAction;
    };
    let target = state
        .occupant_at(cell)
        .filter(|id| !id.is_player() && state.entities.live_actor(*id).is_some());
    let Some(target) = target else {
        tracing::warn!(%actor, %cell, "displacement target missing or dead");
        return TurnOutcome::NoAction;
    };
    if !state.swap_actors(actor, target) {
        tracing::warn!(%actor, %target, "displacement swap refused");
        return TurnOutcome::NoAction;
    }
    tracing::debug!(%actor, %target, %cell, "displaced");
    arrive(state, actor, from, cell, collaborators)
}

fn dig(
    state: &mut GameState,
    actor: EntityId,
    cell: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    state
        .world
        .tile_map
        .set_terrain(cell, TerrainKind::Corridor);
    tracing::debug!(%actor, %cell, "dug through");
    match collaborators.hooks.after_dig(state, actor, cell) {
        HookOutcome::Died => die(state, actor),
        HookOutcome::Continue => TurnOutcome::Acted,
    }
}

fn work_door(
    state: &mut GameState,
    map: &dyn MapOracle,
    actor: EntityId,
    candidate: CandidateMove,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    let cell = candidate.position;
    let Some(door) = state.tile_view(map, cell).and_then(|view| view.terrain().door()) else {
        tracing::warn!(%actor, %cell, "door vanished before it could be worked");
        return TurnOutcome::NoAction;
    };
    let Some(from) = state.entities.live_actor(actor).map(|a| a.position) else {
        return TurnOutcome::NoAction;
    };
    if !state.relocate_actor(actor, cell) {
        tracing::warn!(%actor, %cell, "doorway no longer free");
        return TurnOutcome::NoAction;
    }

    let after = if door.trapped {
        DoorState::NoDoor
    } else if candidate.required.contains(Permissions::BUST_DOORS) {
        DoorState::Broken
    } else {
        DoorState::Open
    };
    state
        .world
        .tile_map
        .set_terrain(cell, TerrainKind::Doorway(Door::new(after)));
    tracing::debug!(%actor, %cell, door = ?after, "door worked");

    if door.trapped && collaborators.traps.door_trap(state, actor, cell) == TrapOutcome::Died {
        return die(state, actor);
    }
    finish(state, actor, from, cell, collaborators)
}

/// Plain step onto a free cell.
fn walk(
    state: &mut GameState,
    actor: EntityId,
    cell: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    let Some(from) = state.entities.live_actor(actor).map(|a| a.position) else {
        return TurnOutcome::NoAction;
    };
    if !state.relocate_actor(actor, cell) {
        tracing::warn!(%actor, %cell, "destination no longer free");
        return TurnOutcome::NoAction;
    }
    arrive(state, actor, from, cell, collaborators)
}

/// Springs the trap at the new cell, then runs the post-move hook.
fn arrive(
    state: &mut GameState,
    actor: EntityId,
    from: Position,
    cell: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    if let Some(trap) = state.world.tile_map.trap(cell) {
        if let TrapKind::Unrecognized(code) = trap.kind {
            tracing::warn!(%actor, %cell, code, "unrecognised trap category, not sprung");
        } else {
            let outcome = collaborators.traps.spring(state, actor, cell, trap);
            tracing::debug!(%actor, %cell, kind = ?trap.kind, %outcome, "trap sprung");
            if let Some(mover) = state.entities.actor_mut(actor) {
                mover.traps_seen.learn(trap.kind);
            }
            if outcome == TrapOutcome::Died {
                return die(state, actor);
            }
        }
    }
    finish(state, actor, from, cell, collaborators)
}

fn finish(
    state: &mut GameState,
    actor: EntityId,
    from: Position,
    cell: Position,
    collaborators: &mut Collaborators<'_>,
) -> TurnOutcome {
    match collaborators.hooks.after_move(state, actor, from, cell) {
        HookOutcome::Died => die(state, actor),
        HookOutcome::Continue => TurnOutcome::Moved,
    }
}

fn die(state: &mut GameState, actor: EntityId) -> TurnOutcome {
    state.kill_actor(actor);
    TurnOutcome::Died
}
