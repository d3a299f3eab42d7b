//! Legal-move enumeration.
//!
//! Given an actor, a state snapshot and a permission mask, list every cell the
//! actor could legally try to enter this action. The result is a pure
//! function of its inputs and is always produced in row-major order.

use arrayvec::ArrayVec;

use crate::config::MovementConfig;
use crate::env::{MovementEnv, OracleError};
use crate::state::{ActorState, Disposition, EntityId, GameState, Position};

use super::terrain::{MoveRules, TerrainAccess, TrapThreat};
use super::{CellNotes, Permissions};

/// A cell the actor may try to enter, with what it costs and what is there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateMove {
    pub position: Position,
    /// Permissions used to admit the cell; always a subset of the mask.
    pub required: Permissions,
    pub notes: CellNotes,
}

impl CandidateMove {
    pub fn is_attack(&self) -> bool {
        self.required.intersects(Permissions::ATTACKS)
    }

    pub fn is_displacement(&self) -> bool {
        self.required.intersects(Permissions::DISPLACEMENTS)
    }

    pub fn is_dig(&self) -> bool {
        self.required.contains(Permissions::DIG)
    }

    pub fn is_door_work(&self) -> bool {
        self.required.intersects(Permissions::DOOR_WORK)
    }

    /// Stepping here means walking onto a trap the actor knows is harmful.
    pub fn is_hazardous(&self) -> bool {
        self.required.contains(Permissions::RISK_TRAPS)
    }
}

pub type CandidateList = ArrayVec<CandidateMove, { MovementConfig::MAX_CANDIDATES }>;

/// Lists legal destinations within Chebyshev `radius` of the actor.
///
/// `radius` is clamped to [`MovementConfig::MAX_LEAP_RADIUS`].
///
/// # Errors
///
/// Fails only when a required oracle is missing.
pub fn enumerate(
    state: &GameState,
    env: &MovementEnv<'_>,
    actor: &ActorState,
    mask: Permissions,
    radius: u32,
) -> Result<CandidateList, OracleError> {
    let rules = MoveRules::new(state, env, actor)?;
    let crowd_threshold = env.config()?.movement().crowd_threshold;
    Ok(enumerate_with(&rules, mask, radius, crowd_threshold))
}

pub(crate) fn enumerate_with(
    rules: &MoveRules<'_>,
    mask: Permissions,
    radius: u32,
    crowd_threshold: u32,
) -> CandidateList {
    let here = rules.actor().position;
    let radius = radius.min(MovementConfig::MAX_LEAP_RADIUS);

    let mut candidates: CandidateList = here
        .ring(radius)
        .filter_map(|cell| evaluate(rules, mask, here, cell))
        .collect();

    let neighbours = rules.state().live_neighbor_count(here) as u32;
    if neighbours >= crowd_threshold {
        candidates.retain(|candidate| candidate.is_attack());
        tracing::trace!(
            actor = %rules.actor().id,
            neighbours,
            remaining = candidates.len(),
            "crowded, keeping attacks only"
        );
    }

    tracing::trace!(
        actor = %rules.actor().id,
        %here,
        mask = ?mask,
        count = candidates.len(),
        "enumerated candidates"
    );
    candidates
}

fn evaluate(
    rules: &MoveRules<'_>,
    mask: Permissions,
    here: Position,
    cell: Position,
) -> Option<CandidateMove> {
    let view = rules.view(cell)?;
    let mut required = Permissions::empty();
    let mut notes = CellNotes::empty();

    match rules.terrain_access(&view, mask, false) {
        TerrainAccess::Blocked => return None,
        TerrainAccess::Open => {}
        TerrainAccess::Requires(permissions) => required |= permissions,
    }
    if rules.diagonal_refused(here, cell) {
        return None;
    }
    if here.chebyshev(cell) > 1 && !rules.line_clear(here, cell) {
        return None;
    }

    let believed = rules.believed_player();
    if let Some(occupant) = view.occupant() {
        notes |= CellNotes::OCCUPIED;
        required |= occupant_permission(rules, occupant, here, mask)?;
    } else if view.has_displaced_image()
        && believed == Some(cell)
        && mask.contains(Permissions::ATTACK_PLAYER)
    {
        required |= Permissions::ATTACK_PLAYER;
    }

    if view.is_warded() {
        if !mask.contains(Permissions::IGNORE_WARD) {
            return None;
        }
        required |= Permissions::IGNORE_WARD;
    }

    // Attacks never enter the cell, so its trap does not matter.
    let attack = required.intersects(Permissions::ATTACKS);
    if let Some(trap) = view.trap().filter(|_| !attack) {
        match rules.trap_threat(trap) {
            TrapThreat::Unknown => {
                tracing::warn!(
                    actor = %rules.actor().id,
                    %cell,
                    kind = ?trap.kind,
                    "unrecognised trap category, skipping cell"
                );
                return None;
            }
            TrapThreat::Harmless => {}
            TrapThreat::Harmful if rules.actor().traps_seen.knows(trap.kind) => {
                if !mask.contains(Permissions::RISK_TRAPS) {
                    return None;
                }
                required |= Permissions::RISK_TRAPS;
            }
            TrapThreat::Harmful => notes |= CellNotes::UNFAMILIAR_TRAP,
        }
    }

    if view.has_boulder() {
        notes |= CellNotes::ROCK;
    }
    if believed.is_some_and(|player| cell.shares_line_with(player)) {
        notes |= CellNotes::PLAYER_LINE;
    }
    if view.is_sanctuary() {
        notes |= CellNotes::SANCTUARY;
    }

    Some(CandidateMove {
        position: cell,
        required,
        notes,
    })
}

/// Permission needed to deal with whoever stands in the cell, preferring an
/// attack over a displacement when the mask allows both.
///
/// A displacement puts the occupant on `here`, so it is only offered when the
/// occupant could stand there on its own.
fn occupant_permission(
    rules: &MoveRules<'_>,
    occupant: EntityId,
    here: Position,
    mask: Permissions,
) -> Option<Permissions> {
    if occupant.is_player() {
        return mask
            .contains(Permissions::ATTACK_PLAYER)
            .then_some(Permissions::ATTACK_PLAYER);
    }

    let Some(other) = rules.for_actor(occupant) else {
        tracing::warn!(%occupant, "occupancy references a missing or dead actor");
        return None;
    };

    let (attack, displace) = match other.actor().disposition {
        Disposition::Hostile => (Permissions::ATTACK_HOSTILE, Permissions::empty()),
        Disposition::Peaceful => (Permissions::ATTACK_PEACEFUL, Permissions::DISPLACE_PEACEFUL),
        Disposition::Tame => (Permissions::ATTACK_TAME, Permissions::DISPLACE_TAME),
    };
    if mask.contains(attack) {
        Some(attack)
    } else if !displace.is_empty() && mask.contains(displace) && other.can_stand_on(here) {
        Some(displace)
    } else {
        None
    }
}
