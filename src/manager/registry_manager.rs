use crate::errors::CoinRegError;
use crate::registry::index::CoinRegistrationIndex;
use crate::registry::pool::{PoolEntry, PoolType};
use alloy_primitives::Address;

/// Admin surface over a [`CoinRegistrationIndex`].
///
/// The index itself assumes valid input; this manager performs the checks the
/// on-chain registry enforces as transaction reverts — duplicate pools,
/// removal of unknown pools, malformed coin lists — and resolves a metapool's
/// base pool from the LP token in its trailing coin slot. Coin arrays arrive
/// padded with the zero address (the contracts use fixed-size arrays); the
/// manager strips those sentinels before anything reaches the index.
#[derive(Debug, Default)]
pub struct RegistryManager {
    index: CoinRegistrationIndex,
}

impl RegistryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &CoinRegistrationIndex {
        &self.index
    }

    /// Registers a base pool.
    pub fn add_pool_without_underlying(
        &mut self,
        address: Address,
        coins: Vec<Address>,
        lp_token: Address,
        timestamp: u64,
    ) -> Result<(), CoinRegError> {
        self.ensure_new(address)?;
        let coins = strip_sentinels(address, coins)?;

        tracing::info!(?address, n_coins = coins.len(), "add base pool");
        self.index
            .add_pool_without_underlying(address, coins, lp_token, timestamp);
        Ok(())
    }

    /// Registers a lending pool. The wrapped and underlying coin lists must
    /// have the same length once sentinel padding is stripped.
    pub fn add_pool(
        &mut self,
        address: Address,
        wrapped_coins: Vec<Address>,
        underlying_coins: Vec<Address>,
        lp_token: Address,
        timestamp: u64,
    ) -> Result<(), CoinRegError> {
        self.ensure_new(address)?;
        let wrapped_coins = strip_sentinels(address, wrapped_coins)?;
        let underlying_coins = strip_sentinels(address, underlying_coins)?;
        if wrapped_coins.len() != underlying_coins.len() {
            return Err(CoinRegError::CoinListMismatch {
                wrapped: wrapped_coins.len(),
                underlying: underlying_coins.len(),
            });
        }

        tracing::info!(?address, n_coins = wrapped_coins.len(), "add lending pool");
        self.index
            .add_pool(address, wrapped_coins, underlying_coins, lp_token, timestamp);
        Ok(())
    }

    /// Registers a metapool. The last element of `meta_coins` must be the LP
    /// token of an already-registered base pool; that pool's coin list is
    /// captured as the metapool's base coins.
    pub fn add_metapool(
        &mut self,
        address: Address,
        meta_coins: Vec<Address>,
        lp_token: Address,
        timestamp: u64,
    ) -> Result<(), CoinRegError> {
        self.ensure_new(address)?;
        let meta_coins = strip_sentinels(address, meta_coins)?;

        let base_lp_token = *meta_coins
            .last()
            .ok_or(CoinRegError::EmptyCoinList(address))?;
        let base_coins = self
            .index
            .pools_of_type(PoolType::Base)
            .find(|p| p.lp_token == base_lp_token)
            .map(|p| p.coins.clone())
            .ok_or(CoinRegError::BasePoolNotFound(base_lp_token))?;

        tracing::info!(?address, n_coins = meta_coins.len(), "add metapool");
        self.index
            .add_metapool(address, meta_coins, lp_token, base_coins, timestamp);
        Ok(())
    }

    /// Removes a pool. A base pool whose LP token is still held by an active
    /// metapool cannot be removed; the metapool must go first.
    pub fn remove_pool(
        &mut self,
        address: Address,
        timestamp: u64,
    ) -> Result<PoolEntry, CoinRegError> {
        let pool = self
            .index
            .get_pool(address)
            .ok_or(CoinRegError::PoolNotFound(address))?;
        if pool.pool_type() == PoolType::Base && self.index.has_dependent_metapool(pool.lp_token)
        {
            return Err(CoinRegError::BasePoolInUse(address));
        }

        tracing::info!(?address, "remove pool");
        self.index
            .remove_pool(address, timestamp)
            .ok_or(CoinRegError::PoolNotFound(address))
    }

    fn ensure_new(&self, address: Address) -> Result<(), CoinRegError> {
        match self.index.get_pool(address) {
            Some(_) => Err(CoinRegError::PoolExists(address)),
            None => Ok(()),
        }
    }
}

/// Drops zero-address padding from a contract-style fixed-size coin array.
fn strip_sentinels(pool: Address, coins: Vec<Address>) -> Result<Vec<Address>, CoinRegError> {
    let coins: Vec<Address> = coins.into_iter().filter(|coin| !coin.is_zero()).collect();
    if coins.is_empty() {
        return Err(CoinRegError::EmptyCoinList(pool));
    }
    Ok(coins)
}
