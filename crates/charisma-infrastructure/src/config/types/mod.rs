//! Configuration types

mod app;
mod auth;
mod cache;
mod logging;
mod modules;
mod server;
mod tasks;

pub use app::AppConfig;
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use modules::ModulesConfig;
pub use server::ServerConfig;
pub use tasks::TasksConfig;

use std::time::Duration;

use charisma_domain::error::Result;

use crate::error_ext::ErrorContext;

/// Parse a humantime duration (`15m`, `7d`, `30s`) naming the config key on failure
pub(crate) fn parse_duration(key: &'static str, raw: &str) -> Result<Duration> {
    humantime::parse_duration(raw).config_context(format!("invalid duration for {key}"))
}
