//! Traits describing the world the movement core reads and the collaborators
//! it calls into.
//!
//! Read-only oracles (map, capabilities, item interest, config, RNG) are
//! bundled in [`Env`]. Mutating collaborators (combat, traps, move hooks) are
//! bundled separately in [`Collaborators`] since they need `&mut` access.
mod capabilities;
mod collaborators;
mod config;
mod error;
mod items;
mod map;
mod rng;

pub use capabilities::{CapabilityOracle, KindCapabilities};
pub use collaborators::{
    AttackOutcome, Collaborators, CombatResolver, HookOutcome, InertResolver, MoveHooks,
    TrapOutcome, TrapResolver,
};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use items::{DesiredObject, ItemAppeal, ItemInterestOracle, NoItemInterest, ObjectList};
pub use map::{
    Door, DoorState, FeatureKind, GridMap, MapDimensions, MapOracle, StaticTile, TerrainKind,
    TileFlags,
};
pub use rng::{DecisionRng, PcgRng, RngOracle, compute_seed};

/// Aggregates the read-only oracles required by the movement pipeline.
pub struct Env<'a, M, K, I, C, R>
where
    M: MapOracle + ?Sized,
    K: CapabilityOracle + ?Sized,
    I: ItemInterestOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    capabilities: Option<&'a K>,
    items: Option<&'a I>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

// Manual impls: derives would demand `Clone` on the (possibly unsized) oracles.
impl<M, K, I, C, R> Clone for Env<'_, M, K, I, C, R>
where
    M: MapOracle + ?Sized,
    K: CapabilityOracle + ?Sized,
    I: ItemInterestOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, K, I, C, R> Copy for Env<'_, M, K, I, C, R>
where
    M: MapOracle + ?Sized,
    K: CapabilityOracle + ?Sized,
    I: ItemInterestOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type MovementEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn CapabilityOracle + 'a,
    dyn ItemInterestOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, M, K, I, C, R> Env<'a, M, K, I, C, R>
where
    M: MapOracle + ?Sized,
    K: CapabilityOracle + ?Sized,
    I: ItemInterestOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        capabilities: Option<&'a K>,
        items: Option<&'a I>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            capabilities,
            items,
            config,
            rng,
        }
    }

    pub fn with_all(
        map: &'a M,
        capabilities: &'a K,
        items: &'a I,
        config: &'a C,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(map),
            Some(capabilities),
            Some(items),
            Some(config),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            capabilities: None,
            items: None,
            config: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the CapabilityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CapabilitiesNotAvailable` if no capability oracle was provided.
    pub fn capabilities(&self) -> Result<&'a K, OracleError> {
        self.capabilities
            .ok_or(OracleError::CapabilitiesNotAvailable)
    }

    /// Returns the ItemInterestOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, K, I, C, R> Env<'a, M, K, I, C, R>
where
    M: MapOracle + 'a,
    K: CapabilityOracle + 'a,
    I: ItemInterestOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `MovementEnv`.
    pub fn as_movement_env(&self) -> MovementEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let capabilities: Option<&'a dyn CapabilityOracle> =
            self.capabilities.map(|capabilities| capabilities as _);
        let items: Option<&'a dyn ItemInterestOracle> = self.items.map(|items| items as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, capabilities, items, config, rng)
    }
}
