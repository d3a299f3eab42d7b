//! Per-kind movement policies.
//!
//! A small closed set of behaviours that run before the generic pipeline:
//! a policy may force the goal and veto candidates, and otherwise leaves the
//! actor to the shared strategy and arbitration code.

use crate::movement::CandidateMove;
use crate::state::{ActorState, Position, StrategyTag};
use crate::strategy::{Bias, Goal, GoalSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementPolicy {
    #[default]
    Standard,
    /// Tame companion trailing the player.
    Companion,
    /// Keeps to a post (shop counter, temple altar) unless angered.
    Stationed { post: Position, radius: u32 },
    /// Holds position and only fights what comes adjacent.
    Sentry,
}

impl MovementPolicy {
    /// Goal imposed by the policy, if it overrides normal goal selection.
    pub fn preempt_goal(&self, actor: &ActorState) -> Option<Goal> {
        match *self {
            MovementPolicy::Standard | MovementPolicy::Companion => None,
            MovementPolicy::Stationed { post, radius } => {
                if actor.is_hostile() {
                    return None;
                }
                if actor.position.chebyshev(post) > radius {
                    Some(Goal::approach(
                        post,
                        GoalSource::Strategy(StrategyTag::ReturnToPost),
                    ))
                } else {
                    Some(Goal::new(post, Bias::Indifferent, GoalSource::Post))
                }
            }
            MovementPolicy::Sentry => Some(Goal::idle(actor.position)),
        }
    }

    /// Whether the policy lets `actor` take `candidate`.
    pub fn permits(&self, actor: &ActorState, candidate: &CandidateMove) -> bool {
        match *self {
            MovementPolicy::Standard | MovementPolicy::Companion => true,
            MovementPolicy::Stationed { post, radius } => {
                if actor.is_hostile() || candidate.is_attack() {
                    return true;
                }
                let after = candidate.position.chebyshev(post);
                after <= radius || after < actor.position.chebyshev(post)
            }
            MovementPolicy::Sentry => candidate.is_attack(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{CellNotes, Permissions};
    use crate::state::{ActorKind, Disposition, EntityId};

    fn step(x: i32, y: i32, required: Permissions) -> CandidateMove {
        CandidateMove {
            position: Position::new(x, y),
            required,
            notes: CellNotes::empty(),
        }
    }

    fn keeper(at: Position) -> ActorState {
        ActorState::new(EntityId(4), at, ActorKind::default())
            .with_disposition(Disposition::Peaceful)
            .with_policy(MovementPolicy::Stationed {
                post: Position::new(5, 5),
                radius: 1,
            })
    }

    #[test]
    fn stationed_actor_returns_to_post() {
        let away = keeper(Position::new(1, 5));
        let goal = away.policy.preempt_goal(&away).expect("policy goal");
        assert_eq!(goal.bias, Bias::Approach);
        assert_eq!(goal.target, Position::new(5, 5));

        let home = keeper(Position::new(5, 4));
        let goal = home.policy.preempt_goal(&home).expect("policy goal");
        assert_eq!(goal.source, GoalSource::Post);
    }

    #[test]
    fn stationed_actor_stays_near_post() {
        let home = keeper(Position::new(5, 4));
        assert!(home.policy.permits(&home, &step(6, 4, Permissions::empty())));
        assert!(!home.policy.permits(&home, &step(5, 3, Permissions::empty())));

        let away = keeper(Position::new(1, 5));
        assert!(away.policy.permits(&away, &step(2, 5, Permissions::empty())));
        assert!(!away.policy.permits(&away, &step(0, 5, Permissions::empty())));
    }

    #[test]
    fn angry_keeper_drops_the_post() {
        let mut angry = keeper(Position::new(5, 4));
        angry.disposition = Disposition::Hostile;
        assert_eq!(angry.policy.preempt_goal(&angry), None);
        assert!(angry.policy.permits(&angry, &step(5, 1, Permissions::empty())));
    }

    #[test]
    fn sentry_only_fights() {
        let sentry = ActorState::new(EntityId(2), Position::new(0, 0), ActorKind::default())
            .with_policy(MovementPolicy::Sentry);
        assert!(!sentry.policy.permits(&sentry, &step(1, 0, Permissions::empty())));
        assert!(sentry.policy.permits(&sentry, &step(1, 0, Permissions::ATTACK_PLAYER)));
    }
}
