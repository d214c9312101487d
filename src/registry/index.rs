use crate::registry::pool::{PoolEntry, PoolKind, PoolType};
use alloy_primitives::Address;
use itertools::{Itertools, iproduct};
use std::collections::{BTreeSet, HashMap};

/// Reference-counted index of registered coins and their swap pairings.
///
/// This mirrors the bookkeeping the on-chain registry performs when pools are
/// added and removed: every coin occurrence and every unordered coin pair is
/// counted, so that two pools offering the same market can be removed
/// independently without erasing a pairing the other pool still justifies.
///
/// Mutations take `&mut self`; callers that share an index across threads must
/// serialize writes (single-writer, multi-reader). The cached live-coin and
/// partner views are rebuilt from the raw counters after every mutation rather
/// than adjusted incrementally, so they never drift under interleaved
/// add/remove sequences.
#[derive(Debug, Default)]
pub struct CoinRegistrationIndex {
    pools: Vec<PoolEntry>,
    /// Coin -> signed registration count. A coin is live iff count > 0.
    coin_register_counter: HashMap<Address, i64>,
    /// Coin -> coin -> signed pair count, stored symmetrically.
    coin_swap_register: HashMap<Address, HashMap<Address, i64>>,
    /// Cached view: sorted coins with a positive registration count.
    live_coins: Vec<Address>,
    /// Cached view: coin -> sorted partners with a positive pair count.
    swap_partners: HashMap<Address, Vec<Address>>,
    last_updated: u64,
}

impl CoinRegistrationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base pool: every coin counted once, every unordered pair
    /// of `coins` becomes a swap pairing.
    pub fn add_pool_without_underlying(
        &mut self,
        address: Address,
        coins: Vec<Address>,
        lp_token: Address,
        timestamp: u64,
    ) {
        tracing::debug!(?address, n_coins = coins.len(), "registering base pool");

        self.register_coins(coins.iter().copied());
        self.register_coin_pairs(coins.iter().copied().tuple_combinations());

        self.pools.push(PoolEntry::base_pool(address, coins, lp_token));
        self.last_updated = timestamp;
    }

    /// Registers a lending pool: both coin lists are counted, and pairings
    /// are formed within the wrapped set and within the underlying set.
    /// Wrapped coins are never paired against underlying coins; a mixed swap
    /// is a conversion concern above this index.
    pub fn add_pool(
        &mut self,
        address: Address,
        wrapped_coins: Vec<Address>,
        underlying_coins: Vec<Address>,
        lp_token: Address,
        timestamp: u64,
    ) {
        tracing::debug!(
            ?address,
            n_coins = wrapped_coins.len(),
            "registering lending pool"
        );

        self.register_coins(
            wrapped_coins
                .iter()
                .chain(underlying_coins.iter())
                .copied(),
        );
        self.register_coin_pairs(
            wrapped_coins
                .iter()
                .copied()
                .tuple_combinations()
                .chain(underlying_coins.iter().copied().tuple_combinations()),
        );

        self.pools.push(PoolEntry::lending_pool(
            address,
            wrapped_coins,
            lp_token,
            underlying_coins,
        ));
        self.last_updated = timestamp;
    }

    /// Registers a metapool. The last element of `meta_coins` is the base
    /// pool's LP token by convention; every meta coin except that slot is
    /// additionally paired against every base pool coin, which is what lets
    /// a metapool coin trade against the base pool's markets. Only
    /// `meta_coins` contribute to coin registration counts; `base_coins`
    /// belong to the base pool's own registration.
    pub fn add_metapool(
        &mut self,
        address: Address,
        meta_coins: Vec<Address>,
        lp_token: Address,
        base_coins: Vec<Address>,
        timestamp: u64,
    ) {
        tracing::debug!(?address, n_coins = meta_coins.len(), "registering metapool");

        self.register_coins(meta_coins.iter().copied());
        self.register_coin_pairs(meta_base_pairings(&meta_coins, &base_coins));

        self.pools.push(PoolEntry::meta_pool(
            address,
            meta_coins,
            lp_token,
            base_coins,
        ));
        self.last_updated = timestamp;
    }

    /// Removes a pool and reverses exactly the registrations its addition
    /// performed, using the coin lists captured on the stored entry. Returns
    /// the removed entry, or `None` if no pool with that address is active.
    pub fn remove_pool(&mut self, address: Address, timestamp: u64) -> Option<PoolEntry> {
        let position = self.pools.iter().position(|p| p.address == address)?;
        let pool = self.pools.remove(position);

        tracing::debug!(?address, pool_type = ?pool.pool_type(), "unregistering pool");

        match &pool.kind {
            PoolKind::Base => {
                self.unregister_coins(pool.coins.iter().copied());
                self.unregister_coin_pairs(pool.coins.iter().copied().tuple_combinations());
            }
            PoolKind::Lending { underlying_coins } => {
                self.unregister_coins(pool.coins.iter().chain(underlying_coins.iter()).copied());
                self.unregister_coin_pairs(
                    pool.coins
                        .iter()
                        .copied()
                        .tuple_combinations()
                        .chain(underlying_coins.iter().copied().tuple_combinations()),
                );
            }
            PoolKind::Meta { base_coins } => {
                self.unregister_coins(pool.coins.iter().copied());
                self.unregister_coin_pairs(meta_base_pairings(&pool.coins, base_coins));
            }
        }

        self.last_updated = timestamp;
        Some(pool)
    }

    /// Number of coins with a positive registration count.
    pub fn coin_count(&self) -> usize {
        self.live_coins.len()
    }

    /// The `index`-th live coin, or the zero address when out of range. The
    /// enumeration order is not part of the contract and may change across
    /// mutations.
    pub fn get_coin(&self, index: usize) -> Address {
        self.live_coins.get(index).copied().unwrap_or(Address::ZERO)
    }

    /// Number of distinct coins `coin` can currently be swapped against.
    pub fn get_coin_swap_count(&self, coin: Address) -> usize {
        self.swap_partners.get(&coin).map_or(0, Vec::len)
    }

    /// The `index`-th swap partner of `coin`, or the zero address when the
    /// coin is unknown or the index is out of range.
    pub fn get_coin_swap_complement(&self, coin: Address, index: usize) -> Address {
        self.swap_partners
            .get(&coin)
            .and_then(|partners| partners.get(index))
            .copied()
            .unwrap_or(Address::ZERO)
    }

    /// All current swap partners of `coin`.
    pub fn swap_partners(&self, coin: Address) -> &[Address] {
        self.swap_partners.get(&coin).map_or(&[], Vec::as_slice)
    }

    /// Timestamp of the most recent mutation.
    pub fn last_updated(&self) -> u64 {
        self.last_updated
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn pools(&self) -> &[PoolEntry] {
        &self.pools
    }

    pub fn get_pool(&self, address: Address) -> Option<&PoolEntry> {
        self.pools.iter().find(|p| p.address == address)
    }

    pub fn pools_of_type(&self, pool_type: PoolType) -> impl Iterator<Item = &PoolEntry> {
        self.pools
            .iter()
            .filter(move |p| p.pool_type() == pool_type)
    }

    /// True iff an active metapool holds `lp_token` among its coins, i.e. the
    /// base pool minting that token is still depended upon.
    pub fn has_dependent_metapool(&self, lp_token: Address) -> bool {
        self.pools_of_type(PoolType::Meta)
            .any(|p| p.coins.contains(&lp_token))
    }

    fn register_coins(&mut self, coins: impl IntoIterator<Item = Address>) {
        self.bump_coins(coins, 1);
    }

    fn unregister_coins(&mut self, coins: impl IntoIterator<Item = Address>) {
        self.bump_coins(coins, -1);
    }

    fn register_coin_pairs(&mut self, pairings: impl IntoIterator<Item = (Address, Address)>) {
        self.bump_coin_pairs(pairings, 1);
    }

    fn unregister_coin_pairs(&mut self, pairings: impl IntoIterator<Item = (Address, Address)>) {
        self.bump_coin_pairs(pairings, -1);
    }

    fn bump_coins(&mut self, coins: impl IntoIterator<Item = Address>, delta: i64) {
        for coin in coins {
            *self.coin_register_counter.entry(coin).or_default() += delta;
        }

        let mut live: Vec<Address> = self
            .coin_register_counter
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&coin, _)| coin)
            .collect();
        live.sort_unstable();
        self.live_coins = live;
    }

    fn bump_coin_pairs(
        &mut self,
        pairings: impl IntoIterator<Item = (Address, Address)>,
        delta: i64,
    ) {
        let mut touched = BTreeSet::new();
        for (coin_a, coin_b) in pairings {
            touched.insert(coin_a);
            touched.insert(coin_b);
            *self
                .coin_swap_register
                .entry(coin_a)
                .or_default()
                .entry(coin_b)
                .or_default() += delta;
            *self
                .coin_swap_register
                .entry(coin_b)
                .or_default()
                .entry(coin_a)
                .or_default() += delta;
        }

        for coin in touched {
            let mut partners: Vec<Address> = self
                .coin_swap_register
                .get(&coin)
                .map(|counts| {
                    counts
                        .iter()
                        .filter(|&(_, &count)| count > 0)
                        .map(|(&partner, _)| partner)
                        .collect()
                })
                .unwrap_or_default();
            partners.sort_unstable();
            self.swap_partners.insert(coin, partners);
        }
    }
}

/// Pairings contributed by a metapool: all unordered pairs within
/// `meta_coins`, plus every meta coin except the trailing base-LP slot
/// against every base pool coin.
fn meta_base_pairings<'a>(
    meta_coins: &'a [Address],
    base_coins: &'a [Address],
) -> impl Iterator<Item = (Address, Address)> + 'a {
    let non_lp_coins = meta_coins.split_last().map_or(&[][..], |(_, rest)| rest);
    meta_coins
        .iter()
        .copied()
        .tuple_combinations()
        .chain(iproduct!(non_lp_coins.iter().copied(), base_coins.iter().copied()))
}
