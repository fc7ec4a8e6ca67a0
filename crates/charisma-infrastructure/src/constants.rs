//! Infrastructure layer constants
//!
//! Defaults for configuration, logging, the module scanner and the
//! background task queue. Domain constants live in `charisma-domain`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Environment variable prefix; nested keys are separated by `__`
pub const CONFIG_ENV_PREFIX: &str = "CHARISMA";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "charisma.toml";

/// Project-local configuration directory
pub const LOCAL_CONFIG_DIR: &str = "config";

/// Application directory under the user configuration directory
pub const APP_CONFIG_DIR: &str = "charisma";

// ============================================================================
// SERVER CONSTANTS
// ============================================================================

/// Default bind address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Seconds the server waits for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u32 = 5;

// ============================================================================
// AUTHENTICATION CONSTANTS
// ============================================================================

/// Header carrying the bearer credential
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Minimum length of a JWT signing secret
pub const JWT_SECRET_MIN_LENGTH: usize = 32;

/// Default access credential lifetime
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: &str = "15m";

/// Default refresh credential lifetime
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: &str = "7d";

/// Default signing algorithm
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Default issuer claim
pub const DEFAULT_JWT_ISSUER: &str = "charisma-api";

/// Default audience claim
pub const DEFAULT_JWT_AUDIENCE: &str = "charisma-client";

/// Default clock tolerance for expiry checks
pub const DEFAULT_JWT_CLOCK_TOLERANCE: &str = "30s";

// ============================================================================
// MODULE SCANNER CONSTANTS
// ============================================================================

/// Default module roots
pub const DEFAULT_MODULE_ROOTS: &[&str] = &["modules/application", "modules/domains"];

/// File stem suffix of service modules
pub const SERVICE_SUFFIX: &str = "_service";

/// File stem suffix of controller modules
pub const CONTROLLER_SUFFIX: &str = "_controller";

// ============================================================================
// TASK QUEUE CONSTANTS
// ============================================================================

/// Default number of queued background tasks
pub const DEFAULT_TASK_QUEUE_CAPACITY: usize = 1024;

/// Default time teardown waits for queued tasks
pub const DEFAULT_TASK_SHUTDOWN_TIMEOUT: &str = "10s";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "CHARISMA_LOG";

/// Log file name prefix when no stem is configured
pub const DEFAULT_LOG_FILE_PREFIX: &str = "charisma";
