//! Narrowing the candidate list and picking one entry from it.

use crate::config::MovementConfig;
use crate::env::{CapabilityOracle, DecisionRng};
use crate::movement::{CandidateList, CandidateMove, CellNotes, MoveRules};
use crate::pathfinding::DistanceField;
use crate::state::{ActorState, GameState, Position, StatusFlags};
use crate::strategy::Bias;

/// Hard restrictions: status, policy and companion restraint.
pub(super) fn restrict(
    state: &GameState,
    actor: &ActorState,
    config: &MovementConfig,
    candidates: &mut CandidateList,
) {
    if actor.status.has(StatusFlags::TRAPPED) {
        candidates.retain(|candidate| candidate.is_attack());
    }
    candidates.retain(|candidate| actor.policy.permits(actor, candidate));

    if actor.is_tame() {
        let ceiling = actor.kind.level.saturating_add(config.companion_level_margin);
        candidates.retain(|candidate| {
            !candidate.is_attack() || target_level(state, candidate.position) < ceiling
        });
    }
}

fn target_level(state: &GameState, cell: Position) -> u8 {
    state
        .occupant_at(cell)
        .and_then(|id| state.entities.live_actor(id))
        .map_or(0, |other| other.kind.level)
}

/// Preferences that only exclude a cell when the actor can afford it.
///
/// Attacks are never dropped here: they do not enter the cell.
pub(super) fn soft_filter(
    rules: &MoveRules<'_>,
    caps: &dyn CapabilityOracle,
    config: &MovementConfig,
    rng: &mut DecisionRng<'_>,
    candidates: &mut CandidateList,
) {
    let actor = rules.actor();
    let keeps = |candidate: &CandidateMove, notes: CellNotes| {
        candidate.is_attack() || !candidate.notes.intersects(notes)
    };

    if !caps.moves_boulders(actor) {
        candidates.retain(|candidate| keeps(candidate, CellNotes::ROCK));
    }

    if actor.is_hostile() {
        candidates.retain(|candidate| {
            candidate.notes.contains(CellNotes::OCCUPIED)
                || !candidate.notes.contains(CellNotes::SANCTUARY)
        });
    }

    if caps.avoids_player_line(actor)
        && candidates
            .iter()
            .any(|candidate| keeps(candidate, CellNotes::PLAYER_LINE))
    {
        candidates.retain(|candidate| keeps(candidate, CellNotes::PLAYER_LINE));
    }

    let safer_exists = candidates.iter().any(|candidate| !candidate.is_hazardous());
    let risk = !safer_exists
        && (actor.leashed || (actor.is_tame() && rng.one_in(config.trap_risk_odds)));
    if !risk {
        candidates.retain(|candidate| !candidate.is_hazardous());
    }
}

/// Minimises the bias-signed change in field cost.
///
/// Ties are broken with a running counter: the n-th tie replaces the current
/// pick with probability `1 / (n + tie_break_base - 1)`, which with the
/// default base of 2 gives 1/2, 1/3, 1/4 and so on.
pub(super) fn choose(
    candidates: &[CandidateMove],
    here: Position,
    field: Option<&DistanceField>,
    bias: Bias,
    rng: &mut DecisionRng<'_>,
    tie_break_base: u32,
) -> Option<CandidateMove> {
    let cost = |cell: Position| {
        field.map_or(0, |field| i64::from(field.cost_at(cell).unwrap_or(u32::MAX)))
    };
    let from = cost(here);
    let base = tie_break_base.max(1);

    let mut best: Option<(i64, CandidateMove)> = None;
    let mut ties = 0u32;
    for candidate in candidates {
        let delta = (cost(candidate.position) - from) * bias.sign();
        match best {
            Some((current, _)) if delta > current => {}
            Some((current, _)) if delta == current => {
                ties = ties.saturating_add(1);
                if rng.one_in(ties.saturating_add(base - 1)) {
                    best = Some((delta, *candidate));
                }
            }
            _ => {
                best = Some((delta, *candidate));
                ties = 0;
            }
        }
    }
    best.map(|(_, candidate)| candidate)
}
