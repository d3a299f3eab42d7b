use super::{EntityId, Tick};

/// Turn bookkeeping for the movement driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Global turn counter. Advanced once per driver pass, before any actor acts.
    pub clock: Tick,

    /// Sequential decision identifier that increments with every actor
    /// decision. Combined with the game seed it keys every random draw, so two
    /// decisions never share a random stream even within one clock tick.
    pub nonce: u64,

    /// The actor whose pipeline is currently running, if any.
    pub current_actor: Option<EntityId>,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current nonce and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);
        nonce
    }
}
