//! Legal-move enumeration.
//!
//! - [`permissions`]: the permission mask and informational cell notes
//! - [`terrain`]: terrain, door, diagonal and trap rules for one actor
//! - [`enumerate`]: the candidate list builder
pub mod enumerate;
pub mod permissions;
pub mod terrain;

pub use enumerate::{CandidateList, CandidateMove, enumerate};
pub use permissions::{CellNotes, PermissionProfile, Permissions};
pub use terrain::{Mobility, MoveRules, TerrainAccess, TrapThreat};
