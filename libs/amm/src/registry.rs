//! Pool registry: canonical pair key → pool record.
//!
//! Concurrency model: lookups run concurrently on the sharded map; each pool
//! sits behind its own mutex, so mutating operations on one pool serialize
//! while distinct pools proceed independently. Registration goes through the
//! map's entry API, which serializes concurrent first-insert attempts on the
//! same key — exactly one succeeds, the rest fail with already-registered.
//!
//! Pools are never de-registered: once a pair has a pool, it persists for
//! the registry's lifetime.

use crate::config::EngineConfig;
use crate::error::AmmError;
use crate::pool::Pool;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, info};
use types::PairTag;

/// Registry of all pools created under one engine instance.
#[derive(Debug)]
pub struct PoolRegistry {
    id: u64,
    default_fee: Option<(u64, u64)>,
    pools: DashMap<String, Mutex<Pool>>,
}

impl PoolRegistry {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            default_fee: None,
            pools: DashMap::new(),
        }
    }

    /// Builds a registry from a validated [`EngineConfig`]. Newly registered
    /// pools start with the configured default fee, if any.
    pub fn from_config(config: &EngineConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            id: config.registry_id,
            default_fee: config.default_fee.map(|fee| (fee.numerator, fee.denominator)),
            pools: DashMap::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn has_registered(&self, pair: &PairTag) -> bool {
        self.pools.contains_key(&pair.registry_key())
    }

    /// Creates an Unfunded pool for `pair`. One-shot: a second registration
    /// of the same pair fails with a state conflict.
    pub fn register(&self, pair: &PairTag) -> Result<(), AmmError> {
        match self.pools.entry(pair.registry_key()) {
            Entry::Occupied(_) => Err(AmmError::AlreadyRegistered(pair.to_string())),
            Entry::Vacant(slot) => {
                let mut pool = Pool::new(self.id);
                if let Some((numerator, denominator)) = self.default_fee {
                    pool.set_fee(numerator, denominator)?;
                }
                slot.insert(Mutex::new(pool));
                info!(pair = %pair, registry = self.id, "pool registered");
                Ok(())
            }
        }
    }

    /// Runs `op` with exclusive access to the pair's pool.
    pub fn with_pool<R>(
        &self,
        pair: &PairTag,
        op: impl FnOnce(&mut Pool) -> Result<R, AmmError>,
    ) -> Result<R, AmmError> {
        let entry = self
            .pools
            .get(&pair.registry_key())
            .ok_or_else(|| AmmError::NotRegistered(pair.to_string()))?;
        let mut pool = entry.lock();
        op(&mut pool)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Clones every pool record under its lock, keyed by registry key.
    /// This is the durable view of the system.
    pub fn snapshot(&self) -> Vec<(String, Pool)> {
        self.pools
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().lock().clone()))
            .collect()
    }
}

static GLOBAL: OnceCell<PoolRegistry> = OnceCell::new();

/// Installs the process-wide registry. May be called exactly once.
pub fn init_global(config: &EngineConfig) -> Result<&'static PoolRegistry, AmmError> {
    let registry = PoolRegistry::from_config(config)?;
    debug!(registry = registry.id(), "initializing global pool registry");
    GLOBAL
        .set(registry)
        .map_err(|_| AmmError::RegistryAlreadyInitialized)?;
    GLOBAL.get().ok_or(AmmError::RegistryUninitialized)
}

/// The process-wide registry installed by [`init_global`].
pub fn global() -> Result<&'static PoolRegistry, AmmError> {
    GLOBAL.get().ok_or(AmmError::RegistryUninitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::AssetId;

    fn pair() -> PairTag {
        PairTag::new(AssetId::new("USDC"), AssetId::new("WETH")).unwrap()
    }

    #[test]
    fn test_registration_is_one_shot() {
        let registry = PoolRegistry::new(1);
        assert!(!registry.has_registered(&pair()));

        registry.register(&pair()).unwrap();
        assert!(registry.has_registered(&pair()));
        assert_eq!(registry.len(), 1);

        assert_eq!(
            registry.register(&pair()).unwrap_err(),
            AmmError::AlreadyRegistered("USDC/WETH".into())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_with_pool_requires_registration() {
        let registry = PoolRegistry::new(1);
        let err = registry.with_pool(&pair(), |_| Ok(())).unwrap_err();
        assert_eq!(err, AmmError::NotRegistered("USDC/WETH".into()));
    }

    #[test]
    fn test_with_pool_mutates_under_lock() {
        let registry = PoolRegistry::new(9);
        registry.register(&pair()).unwrap();

        let report = registry
            .with_pool(&pair(), |pool| pool.add_liquidity(10_000, 0, 20_000, 0))
            .unwrap();
        assert_eq!(report.consumed_a, 10_000);

        let funded = registry.with_pool(&pair(), |pool| Ok(pool.is_funded())).unwrap();
        assert!(funded);
        let id = registry
            .with_pool(&pair(), |pool| Ok(pool.owning_registry_id()))
            .unwrap();
        assert_eq!(id, 9);
    }

    #[test]
    fn test_default_fee_applied_on_registration() {
        let config = EngineConfig::with_default_fee(1, 30, 10_000);
        let registry = PoolRegistry::from_config(&config).unwrap();
        registry.register(&pair()).unwrap();

        let fee = registry.with_pool(&pair(), |pool| Ok(pool.fee())).unwrap();
        assert_eq!(fee, (30, 10_000));
    }

    #[test]
    fn test_concurrent_first_insert_single_winner() {
        let registry = std::sync::Arc::new(PoolRegistry::new(1));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || registry.register(&pair()).is_ok()));
        }
        let wins = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|registered| *registered)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_clones_records() {
        let registry = PoolRegistry::new(1);
        registry.register(&pair()).unwrap();
        registry
            .with_pool(&pair(), |pool| pool.add_liquidity(10_000, 0, 20_000, 0))
            .unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].0, "LP-USDC-WETH");
        assert_eq!(snapshot[0].1.reserves(), (10_000, 20_000));
    }
}
