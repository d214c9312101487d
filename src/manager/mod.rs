pub mod registry_manager;

pub use registry_manager::RegistryManager;
