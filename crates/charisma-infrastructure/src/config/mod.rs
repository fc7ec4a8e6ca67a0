//! Application configuration
//!
//! Layered with figment: built-in defaults, then a TOML file, then
//! `CHARISMA__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, AuthConfig, CacheConfig, JwtConfig, LoggingConfig, ModulesConfig, ServerConfig,
    TasksConfig,
};
