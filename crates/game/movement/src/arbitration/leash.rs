//! Keeps leashed actors within reach of whoever holds the leash.

use crate::movement::{CandidateMove, MoveRules, Permissions, TerrainAccess, TrapThreat};
use crate::state::Position;

/// What arbitration settled on, before any state is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Decision {
    Stay,
    Take(CandidateMove),
    /// Dragged by the leash onto this cell.
    Relocate(Position),
}

impl Decision {
    fn from_choice(choice: Option<CandidateMove>) -> Self {
        choice.map_or(Decision::Stay, Decision::Take)
    }
}

/// Where the actor stands once `candidate` is carried out.
fn landing(candidate: &CandidateMove, here: Position) -> Position {
    if candidate.is_attack() || candidate.is_dig() {
        here
    } else {
        candidate.position
    }
}

/// Overrides `choice` when it would leave a leashed actor beyond `tether`
/// of `anchor`. Inside candidates win first; failing that the actor is
/// dragged to the nearest free cell inside the tether.
pub(super) fn correct(
    rules: &MoveRules<'_>,
    candidates: &[CandidateMove],
    choice: Option<CandidateMove>,
    anchor: Position,
    tether: u32,
) -> Decision {
    let actor = rules.actor();
    let here = actor.position;
    if !actor.leashed {
        return Decision::from_choice(choice);
    }

    let ends = choice.map_or(here, |candidate| landing(&candidate, here));
    if ends.chebyshev(anchor) <= tether {
        return Decision::from_choice(choice);
    }

    let inside = candidates
        .iter()
        .filter(|candidate| landing(candidate, here).chebyshev(anchor) <= tether)
        .min_by_key(|candidate| (landing(candidate, here).chebyshev(anchor), candidate.position));
    if let Some(candidate) = inside {
        tracing::debug!(actor = %actor.id, to = %candidate.position, "leash overrides choice");
        return Decision::Take(*candidate);
    }

    match nearest_free(rules, here, anchor, tether) {
        Some(cell) => {
            tracing::debug!(actor = %actor.id, %cell, %anchor, "leash drags actor");
            Decision::Relocate(cell)
        }
        None => {
            tracing::debug!(actor = %actor.id, %anchor, "no room inside the tether");
            Decision::from_choice(choice)
        }
    }
}

/// Free cell within `tether` of `anchor` the actor could stand on, nearest
/// to `here`.
fn nearest_free(
    rules: &MoveRules<'_>,
    here: Position,
    anchor: Position,
    tether: u32,
) -> Option<Position> {
    anchor
        .ring(tether)
        .filter(|cell| {
            let Some(view) = rules.view(*cell) else {
                return false;
            };
            !view.is_occupied()
                && !view.is_warded()
                && rules.terrain_access(&view, Permissions::empty(), false) == TerrainAccess::Open
                && view
                    .trap()
                    .is_none_or(|trap| rules.trap_threat(trap) == TrapThreat::Harmless)
        })
        .min_by_key(|cell| (cell.chebyshev(here), cell.distance_squared(here), *cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use crate::env::{Env, GridMap, KindCapabilities, NoItemInterest, PcgRng};
    use crate::movement::CellNotes;
    use crate::state::{ActorKind, ActorState, Disposition, EntityId, GameState};

    fn step(x: i32, y: i32) -> CandidateMove {
        CandidateMove {
            position: Position::new(x, y),
            required: Permissions::empty(),
            notes: CellNotes::empty(),
        }
    }

    fn decide(
        rows: &[&str],
        player: Position,
        actor: ActorState,
        candidates: &[CandidateMove],
        choice: Option<CandidateMove>,
    ) -> Decision {
        let map = GridMap::from_rows(rows).expect("valid layout");
        let config = MovementConfig::default();
        let env = Env::with_all(&map, &KindCapabilities, &NoItemInterest, &config, &PcgRng)
            .as_movement_env();
        let mut state = GameState::new(1, player);
        state.add_actor(actor.clone()).expect("free cell");
        let rules = MoveRules::new(&state, &env, &actor).expect("oracles present");
        correct(&rules, candidates, choice, player, 2)
    }

    fn pet(at: Position) -> ActorState {
        ActorState::new(EntityId(1), at, ActorKind::default())
            .with_disposition(Disposition::Tame)
            .leashed()
    }

    const ROW: [&str; 1] = ["........."];

    #[test]
    fn unleashed_choice_passes_through() {
        let mut actor = pet(Position::new(4, 0));
        actor.leashed = false;
        let decision = decide(&ROW, Position::new(0, 0), actor, &[step(5, 0)], Some(step(5, 0)));
        assert_eq!(decision, Decision::Take(step(5, 0)));
    }

    #[test]
    fn straying_choice_is_replaced_by_inside_candidate() {
        let candidates = [step(1, 0), step(3, 0)];
        let decision = decide(
            &ROW,
            Position::new(0, 0),
            pet(Position::new(2, 0)),
            &candidates,
            Some(step(3, 0)),
        );
        assert_eq!(decision, Decision::Take(step(1, 0)));
    }

    #[test]
    fn stranded_actor_is_dragged_inside() {
        let decision = decide(&ROW, Position::new(0, 0), pet(Position::new(6, 0)), &[], None);
        assert_eq!(decision, Decision::Relocate(Position::new(2, 0)));
    }
}
