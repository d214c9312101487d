//! Stateful simulation of pool registration.
//!
//! Unit tests confirm the basic add/remove behavior; this test keeps adding
//! and removing random pools and, after every step, checks the incrementally
//! maintained index against a from-scratch recomputation of live coins and
//! pairings derived from the active pool list alone. Any drift in the
//! reference counters shows up as a divergence between the two.

use alloy_primitives::Address;
use coinreg::{PoolEntry, PoolKind, PoolType, RegistryManager};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

const STEPS: usize = 300;

struct Simulation {
    rng: StdRng,
    manager: RegistryManager,
    known_coins: Vec<Address>,
    address_counter: u64,
    timestamp: u64,
    last_mutation: u64,
}

impl Simulation {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            manager: RegistryManager::new(),
            known_coins: Vec::new(),
            address_counter: 0,
            timestamp: 0,
            last_mutation: 0,
        }
    }

    fn fresh_address(&mut self) -> Address {
        self.address_counter += 1;
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&self.address_counter.to_be_bytes());
        Address::from(bytes)
    }

    /// Picks `n` distinct coins, reusing already-known coins about a quarter
    /// of the time so pools share markets and reference counts exceed one.
    fn sample_coins(&mut self, n: usize) -> Vec<Address> {
        let mut picked: Vec<Address> = Vec::with_capacity(n);
        while picked.len() < n {
            let coin = if !self.known_coins.is_empty() && self.rng.random_range(0..4) == 0 {
                self.known_coins[self.rng.random_range(0..self.known_coins.len())]
            } else {
                let fresh = self.fresh_address();
                self.known_coins.push(fresh);
                fresh
            };
            if !picked.contains(&coin) {
                picked.push(coin);
            }
        }
        picked
    }

    fn step(&mut self) {
        self.timestamp += self.rng.random_range(1..=86_400);
        let timestamp = self.timestamp;

        match self.rng.random_range(0..4u32) {
            0 => {
                let n = self.rng.random_range(2..=4);
                let coins = self.sample_coins(n);
                let (address, lp_token) = (self.fresh_address(), self.fresh_address());
                self.manager
                    .add_pool_without_underlying(address, coins, lp_token, timestamp)
                    .unwrap();
                self.last_mutation = timestamp;
            }
            1 => {
                let n = self.rng.random_range(2..=4);
                let underlying = self.sample_coins(n);
                let wrapped: Vec<Address> = (0..n).map(|_| self.fresh_address()).collect();
                self.known_coins.extend(wrapped.iter().copied());
                let (address, lp_token) = (self.fresh_address(), self.fresh_address());
                self.manager
                    .add_pool(address, wrapped, underlying, lp_token, timestamp)
                    .unwrap();
                self.last_mutation = timestamp;
            }
            2 => {
                let base_lp_tokens: Vec<Address> = self
                    .manager
                    .index()
                    .pools_of_type(PoolType::Base)
                    .map(|p| p.lp_token)
                    .collect();
                if base_lp_tokens.is_empty() {
                    return;
                }
                let base_lp = base_lp_tokens[self.rng.random_range(0..base_lp_tokens.len())];

                let n = self.rng.random_range(1..=3);
                let mut meta_coins = self.sample_coins(n);
                meta_coins.push(base_lp);
                let (address, lp_token) = (self.fresh_address(), self.fresh_address());
                self.manager
                    .add_metapool(address, meta_coins, lp_token, timestamp)
                    .unwrap();
                self.last_mutation = timestamp;
            }
            _ => {
                let removable: Vec<Address> = self
                    .manager
                    .index()
                    .pools()
                    .iter()
                    .filter(|p| {
                        p.pool_type() != PoolType::Base
                            || !self.manager.index().has_dependent_metapool(p.lp_token)
                    })
                    .map(|p| p.address)
                    .collect();
                if removable.is_empty() {
                    return;
                }
                let address = removable[self.rng.random_range(0..removable.len())];
                self.manager.remove_pool(address, timestamp).unwrap();
                self.last_mutation = timestamp;
            }
        }
    }

    fn check_invariants(&self) {
        let index = self.manager.index();
        let pools = index.pools();

        let expected_coins = expected_live_coins(pools);
        let actual_coins: HashSet<Address> =
            (0..index.coin_count()).map(|i| index.get_coin(i)).collect();
        assert_eq!(index.coin_count(), expected_coins.len());
        assert_eq!(actual_coins, expected_coins);

        let expected_pairs = expected_pairings(pools);
        let mut checked_coins: HashSet<Address> = self.known_coins.iter().copied().collect();
        checked_coins.extend(expected_pairs.keys().copied());
        for coin in checked_coins {
            let expected = expected_pairs.get(&coin).cloned().unwrap_or_default();
            assert_eq!(index.get_coin_swap_count(coin), expected.len());

            let actual: HashSet<Address> = (0..index.get_coin_swap_count(coin))
                .map(|i| index.get_coin_swap_complement(coin, i))
                .collect();
            assert_eq!(actual, expected, "partner set diverged for {coin}");
        }

        assert_eq!(index.last_updated(), self.last_mutation);
    }
}

/// Live coins recomputed from scratch: every coin held by an active pool,
/// counting a lending pool's wrapped and underlying lists but not a
/// metapool's base coins.
fn expected_live_coins(pools: &[PoolEntry]) -> HashSet<Address> {
    let mut coins = HashSet::new();
    for pool in pools {
        coins.extend(pool.coins.iter().copied());
        if let PoolKind::Lending { underlying_coins } = &pool.kind {
            coins.extend(underlying_coins.iter().copied());
        }
    }
    coins
}

/// Pairings recomputed from scratch with plain nested loops, independent of
/// the iterator pipeline the index uses.
fn expected_pairings(pools: &[PoolEntry]) -> HashMap<Address, HashSet<Address>> {
    fn link(pairs: &mut HashMap<Address, HashSet<Address>>, a: Address, b: Address) {
        pairs.entry(a).or_default().insert(b);
        pairs.entry(b).or_default().insert(a);
    }

    fn link_all(pairs: &mut HashMap<Address, HashSet<Address>>, coins: &[Address]) {
        for i in 0..coins.len() {
            for j in i + 1..coins.len() {
                link(pairs, coins[i], coins[j]);
            }
        }
    }

    let mut pairs = HashMap::new();
    for pool in pools {
        link_all(&mut pairs, &pool.coins);
        match &pool.kind {
            PoolKind::Base => {}
            PoolKind::Lending { underlying_coins } => link_all(&mut pairs, underlying_coins),
            PoolKind::Meta { base_coins } => {
                for &meta_coin in &pool.coins[..pool.coins.len() - 1] {
                    for &base_coin in base_coins {
                        link(&mut pairs, meta_coin, base_coin);
                    }
                }
            }
        }
    }
    pairs
}

#[test]
fn test_simulate_coin_registration() {
    let mut sim = Simulation::new(0x5EED_CAFE);
    for _ in 0..STEPS {
        sim.step();
        sim.check_invariants();
    }

    // The run must actually have exercised the registry.
    assert!(sim.manager.index().last_updated() > 0);
    assert!(!sim.known_coins.is_empty());
}

#[test]
fn test_simulation_drains_back_to_empty() {
    let mut sim = Simulation::new(42);
    for _ in 0..STEPS {
        sim.step();
    }

    // Tear everything down, metapools before their base pools.
    loop {
        let removable: Vec<Address> = sim
            .manager
            .index()
            .pools()
            .iter()
            .filter(|p| {
                p.pool_type() != PoolType::Base
                    || !sim.manager.index().has_dependent_metapool(p.lp_token)
            })
            .map(|p| p.address)
            .collect();
        if removable.is_empty() {
            break;
        }
        for address in removable {
            sim.timestamp += 1;
            sim.manager.remove_pool(address, sim.timestamp).unwrap();
            sim.last_mutation = sim.timestamp;
        }
        sim.check_invariants();
    }

    let index = sim.manager.index();
    assert_eq!(index.pool_count(), 0);
    assert_eq!(index.coin_count(), 0);
    for &coin in &sim.known_coins {
        assert_eq!(index.get_coin_swap_count(coin), 0);
    }
}
