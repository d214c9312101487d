use alloy_primitives::Address;

/// Discriminant for the three pool families the registry tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolType {
    Base,
    Lending,
    Meta,
}

/// Type-specific payload of a registered pool.
///
/// Lending pools carry the underlying coin list (parallel to the wrapped
/// coins); metapools carry the coin list of their base pool, captured at
/// registration time so removal can reverse the exact pairings that were
/// added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolKind {
    Base,
    Lending { underlying_coins: Vec<Address> },
    Meta { base_coins: Vec<Address> },
}

/// One pool as known to the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub address: Address,
    /// Primary coin list: the wrapped coins of a lending pool, or the meta
    /// coins of a metapool (last slot is the base pool's LP token).
    pub coins: Vec<Address>,
    pub lp_token: Address,
    pub kind: PoolKind,
}

impl PoolEntry {
    pub fn base_pool(address: Address, coins: Vec<Address>, lp_token: Address) -> Self {
        Self {
            address,
            coins,
            lp_token,
            kind: PoolKind::Base,
        }
    }

    pub fn lending_pool(
        address: Address,
        coins: Vec<Address>,
        lp_token: Address,
        underlying_coins: Vec<Address>,
    ) -> Self {
        Self {
            address,
            coins,
            lp_token,
            kind: PoolKind::Lending { underlying_coins },
        }
    }

    pub fn meta_pool(
        address: Address,
        coins: Vec<Address>,
        lp_token: Address,
        base_coins: Vec<Address>,
    ) -> Self {
        Self {
            address,
            coins,
            lp_token,
            kind: PoolKind::Meta { base_coins },
        }
    }

    pub fn pool_type(&self) -> PoolType {
        match self.kind {
            PoolKind::Base => PoolType::Base,
            PoolKind::Lending { .. } => PoolType::Lending,
            PoolKind::Meta { .. } => PoolType::Meta,
        }
    }

    /// Underlying coins of a lending pool, `None` for other kinds.
    pub fn underlying_coins(&self) -> Option<&[Address]> {
        match &self.kind {
            PoolKind::Lending { underlying_coins } => Some(underlying_coins),
            _ => None,
        }
    }

    /// Base pool coins of a metapool, `None` for other kinds.
    pub fn base_coins(&self) -> Option<&[Address]> {
        match &self.kind {
            PoolKind::Meta { base_coins } => Some(base_coins),
            _ => None,
        }
    }
}
