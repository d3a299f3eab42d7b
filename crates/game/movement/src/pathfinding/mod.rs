//! Goal-centred distance fields.
//!
//! A field is a breadth-first flood outward from a goal cell. Every step costs
//! one (diagonal or not), so the cost of a cell is the minimum number of moves
//! the actor needs from there to the goal under its terrain, door and diagonal
//! rules. Occupancy is ignored: actors move, walls do not.

use std::collections::{BTreeMap, VecDeque};

use crate::env::{MovementEnv, OracleError};
use crate::movement::{MoveRules, Permissions, TerrainAccess};
use crate::state::{ActorState, Disposition, GameState, Position, TileView};

/// Options altering how a field floods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldOptions {
    /// Every door counts as passable regardless of the mask.
    pub through_doors: bool,
    /// Peaceful actors the mask cannot act on no longer force a detour.
    pub through_peacefuls: bool,
    /// Stop expanding beyond this cost.
    pub max_cost: Option<u32>,
}

impl FieldOptions {
    /// Options for an actor holding `mask`: door workers plan as if every
    /// door were open, and peacefuls it may attack or displace are no detour.
    pub fn for_mask(mask: Permissions) -> Self {
        Self {
            through_doors: mask.intersects(Permissions::DOOR_WORK),
            through_peacefuls: mask
                .intersects(Permissions::ATTACK_PEACEFUL | Permissions::DISPLACE_PEACEFUL),
            max_cost: None,
        }
    }

    pub fn through_doors(mut self) -> Self {
        self.through_doors = true;
        self
    }

    pub fn through_peacefuls(mut self) -> Self {
        self.through_peacefuls = true;
        self
    }

    pub fn bounded(mut self, max_cost: u32) -> Self {
        self.max_cost = Some(max_cost);
        self
    }
}

/// Cost-to-goal for every cell the flood reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    goal: Position,
    costs: BTreeMap<Position, u32>,
}

impl DistanceField {
    /// Floods from `goal` using `actor`'s movement rules.
    ///
    /// # Errors
    ///
    /// Fails only when the map or capability oracle is missing.
    pub fn build(
        goal: Position,
        actor: &ActorState,
        mask: Permissions,
        options: FieldOptions,
        state: &GameState,
        env: &MovementEnv<'_>,
    ) -> Result<Self, OracleError> {
        let rules = MoveRules::new(state, env, actor)?;
        Ok(Self::build_with(&rules, goal, mask, options))
    }

    pub(crate) fn build_with(
        rules: &MoveRules<'_>,
        goal: Position,
        mask: Permissions,
        options: FieldOptions,
    ) -> Self {
        let mut costs = BTreeMap::new();
        let mut queue = VecDeque::new();
        costs.insert(goal, 0);
        queue.push_back(goal);

        while let Some(current) = queue.pop_front() {
            let cost = costs.get(&current).copied().unwrap_or(0);
            if options.max_cost.is_some_and(|limit| cost >= limit) {
                continue;
            }
            for neighbor in current.neighbors() {
                if costs.contains_key(&neighbor) {
                    continue;
                }
                let Some(view) = rules.view(neighbor) else {
                    continue;
                };
                if !passable(rules, &view, mask, options) {
                    continue;
                }
                // The actor would step from `neighbor` towards `current`.
                if rules.diagonal_refused(neighbor, current) {
                    continue;
                }
                costs.insert(neighbor, cost + 1);
                queue.push_back(neighbor);
            }
        }

        tracing::trace!(
            actor = %rules.actor().id,
            %goal,
            reached = costs.len(),
            "distance field built"
        );
        Self { goal, costs }
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Steps from `cell` to the goal, `None` if unreachable.
    pub fn cost_at(&self, cell: Position) -> Option<u32> {
        self.costs.get(&cell).copied()
    }

    /// Number of cells with a finite cost.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.costs.iter().map(|(position, cost)| (*position, *cost))
    }
}

fn passable(
    rules: &MoveRules<'_>,
    view: &TileView,
    mask: Permissions,
    options: FieldOptions,
) -> bool {
    if rules.terrain_access(view, mask, options.through_doors) == TerrainAccess::Blocked {
        return false;
    }
    if options.through_peacefuls {
        return true;
    }
    !blocking_peaceful(rules, view)
}

/// Another peaceful actor stands here.
fn blocking_peaceful(rules: &MoveRules<'_>, view: &TileView) -> bool {
    let Some(occupant) = view.occupant() else {
        return false;
    };
    if occupant == rules.actor().id || occupant.is_player() {
        return false;
    }
    rules
        .state()
        .entities
        .live_actor(occupant)
        .is_some_and(|other| other.disposition == Disposition::Peaceful)
}
