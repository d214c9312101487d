pub mod index;
pub mod pool;

pub use index::CoinRegistrationIndex;
pub use pool::{PoolEntry, PoolKind, PoolType};
