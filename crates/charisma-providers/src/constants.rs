//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in charisma-domain) and infrastructure
//! constants.

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default maximum number of cache entries
pub const CACHE_DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Default TTL for cache entries without an explicit one (seconds)
pub const CACHE_DEFAULT_TTL_SECS: u64 = 300;

// ============================================================================
// TOKEN PROVIDER CONSTANTS
// ============================================================================

/// Claims the token service always sets itself
pub const JWT_REGISTERED_CLAIMS: &[&str] = &["iss", "aud", "iat", "exp"];

/// Claims a verified credential must carry
pub const JWT_REQUIRED_CLAIMS: &[&str] = &["exp", "iss", "aud", "sub"];
