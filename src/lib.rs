pub mod encoding;
pub mod errors;
pub mod manager;
pub mod registry;

pub use errors::CoinRegError;

pub use manager::RegistryManager;

pub use registry::{CoinRegistrationIndex, PoolEntry, PoolKind, PoolType};
