//! Mutating collaborators invoked while a move is executed.
//!
//! Combat math, trap effects and post-move reactions belong to the host game.
//! The movement core calls into them at fixed points and maps their outcomes
//! onto [`crate::arbitration::TurnOutcome`].

use crate::state::{EntityId, GameState, Position, Trap};

/// Result of a single melee attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Miss,
    Hit,
    DefenderDied,
    /// Passive damage, a cockatrice touch and the like.
    AttackerDied,
    /// Something ended the attack early (teleported away, engulfed).
    Interrupted,
}

pub trait CombatResolver {
    /// Attacks whatever stands at `target`. The cell may hold the player, an
    /// actor, or nothing at all when the attacker swings at a displaced image.
    fn attack(&mut self, state: &mut GameState, attacker: EntityId, target: Position)
    -> AttackOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TrapOutcome {
    /// Nothing happened (or nothing that matters for movement).
    Unaffected,
    /// The actor was hurt, held or moved, but lives.
    Affected,
    Died,
}

pub trait TrapResolver {
    /// Springs the trap the actor just stepped onto.
    fn spring(
        &mut self,
        state: &mut GameState,
        actor: EntityId,
        position: Position,
        trap: Trap,
    ) -> TrapOutcome;

    /// A booby-trapped door at `door` exploded while the actor worked it.
    fn door_trap(&mut self, state: &mut GameState, actor: EntityId, door: Position)
    -> TrapOutcome;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HookOutcome {
    Continue,
    Died,
}

/// Reactions to completed movement: picking up objects, stepping into
/// liquids, shop entry, swallowed-whole checks.
pub trait MoveHooks {
    fn after_move(
        &mut self,
        state: &mut GameState,
        actor: EntityId,
        from: Position,
        to: Position,
    ) -> HookOutcome;

    fn after_dig(&mut self, state: &mut GameState, actor: EntityId, cell: Position)
    -> HookOutcome;
}

/// Collaborators that do nothing: attacks miss, traps fizzle, hooks pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct InertResolver;

impl CombatResolver for InertResolver {
    fn attack(&mut self, _: &mut GameState, _: EntityId, _: Position) -> AttackOutcome {
        AttackOutcome::Miss
    }
}

impl TrapResolver for InertResolver {
    fn spring(&mut self, _: &mut GameState, _: EntityId, _: Position, _: Trap) -> TrapOutcome {
        TrapOutcome::Unaffected
    }

    fn door_trap(&mut self, _: &mut GameState, _: EntityId, _: Position) -> TrapOutcome {
        TrapOutcome::Unaffected
    }
}

impl MoveHooks for InertResolver {
    fn after_move(
        &mut self,
        _: &mut GameState,
        _: EntityId,
        _: Position,
        _: Position,
    ) -> HookOutcome {
        HookOutcome::Continue
    }

    fn after_dig(&mut self, _: &mut GameState, _: EntityId, _: Position) -> HookOutcome {
        HookOutcome::Continue
    }
}

/// Borrowed bundle of the mutating collaborators for one driver pass.
pub struct Collaborators<'a> {
    pub combat: &'a mut dyn CombatResolver,
    pub traps: &'a mut dyn TrapResolver,
    pub hooks: &'a mut dyn MoveHooks,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        combat: &'a mut dyn CombatResolver,
        traps: &'a mut dyn TrapResolver,
        hooks: &'a mut dyn MoveHooks,
    ) -> Self {
        Self {
            combat,
            traps,
            hooks,
        }
    }
}
