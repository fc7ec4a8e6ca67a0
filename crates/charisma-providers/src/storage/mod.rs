//! Storage provider implementations

pub mod memory;

pub use memory::{MemoryRoleRepository, MemoryStorageProvider, MemoryUserRepository};
