//! Domain layer constants
//!
//! Contains constants that are part of the domain logic and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `charisma_infrastructure::constants`.

// ============================================================================
// PAGINATION CONSTANTS
// ============================================================================

/// Default page number for list queries
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size for list queries
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Maximum page size accepted by list queries
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Default search radius for geo queries, in kilometres
pub const DEFAULT_GEO_RADIUS_KM: f64 = 10.0;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// TTL for cached list pages (seconds)
pub const LIST_CACHE_TTL_SECS: u64 = 300;

/// TTL for cached single documents (seconds)
pub const SINGLE_CACHE_TTL_SECS: u64 = 600;

/// TTL for the cached current-user document (seconds)
pub const ME_CACHE_TTL_SECS: u64 = 300;

/// Placeholder used in cache keys for absent filters
pub const CACHE_KEY_ANY: &str = "all";

// ============================================================================
// REGISTRATION KEY CONSTANTS
// ============================================================================

/// Registration key of the cache service module
pub const CACHE_SERVICE_KEY: &str = "cacheService";

/// Registration key of the storage service module
pub const STORAGE_SERVICE_KEY: &str = "storageService";

/// Registration key of the tokens service module
pub const TOKENS_SERVICE_KEY: &str = "tokensService";

/// Registration key of the emails service module
pub const EMAILS_SERVICE_KEY: &str = "emailsService";

/// Registration key of the notifications service module
pub const NOTIFICATIONS_SERVICE_KEY: &str = "notificationsService";

/// Registration key of the background tasks module
pub const TASKS_SERVICE_KEY: &str = "tasksService";

/// Registration key of the roles service module
pub const ROLES_SERVICE_KEY: &str = "rolesService";

/// Registration key of the roles controller module
pub const ROLES_CONTROLLER_KEY: &str = "rolesController";

/// Registration key of the users service module
pub const USERS_SERVICE_KEY: &str = "usersService";

/// Registration key of the users controller module
pub const USERS_CONTROLLER_KEY: &str = "usersController";

/// Registration key of the cache settings value
pub const CACHE_SETTINGS_KEY: &str = "cacheSettings";

/// Registration key of the token settings value
pub const TOKEN_SETTINGS_KEY: &str = "tokenSettings";

/// Registration key of the task queue settings value
pub const TASK_SETTINGS_KEY: &str = "taskSettings";

/// Registration key of the password hashing module
pub const PASSWORDS_SERVICE_KEY: &str = "passwordsService";
