//! Root configuration

use serde::{Deserialize, Serialize};

use super::{AuthConfig, CacheConfig, LoggingConfig, ModulesConfig, ServerConfig, TasksConfig};

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server
    pub server: ServerConfig,
    /// Authentication and credentials
    pub auth: AuthConfig,
    /// Cache sizing
    pub cache: CacheConfig,
    /// Background task queue
    pub tasks: TasksConfig,
    /// Module discovery
    pub modules: ModulesConfig,
    /// Logging
    pub logging: LoggingConfig,
}
