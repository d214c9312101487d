use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoinRegError {
    #[error("Pool exists: {0}")]
    PoolExists(Address),

    #[error("Pool does not exist: {0}")]
    PoolNotFound(Address),

    #[error("Pool {0} has no coins after sentinel filtering")]
    EmptyCoinList(Address),

    #[error("Wrapped/underlying coin lists differ in length: {wrapped} vs {underlying}")]
    CoinListMismatch { wrapped: usize, underlying: usize },

    #[error("No active base pool with LP token {0}")]
    BasePoolNotFound(Address),

    #[error("Base pool {0} still backs an active metapool")]
    BasePoolInUse(Address),

    #[error("Value {0} does not fit in one byte")]
    ValueTooLarge(u64),

    #[error("Cannot pack {0} values into a 32 byte word")]
    TooManyValues(usize),

    #[error("Selector of {0} bytes exceeds the 32 byte word")]
    SelectorTooLong(usize),
}
