//! Settings value objects
//!
//! Registered in the service container as pre-built values so modules can
//! declare them as dependencies.

use std::fmt;
use std::time::Duration;

/// Cache sizing and default expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// TTL applied when a write does not specify one
    pub default_ttl: Duration,
}

/// Credential signing and verification parameters
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// Secret for access credentials
    pub access_secret: String,
    /// Secret for refresh credentials
    pub refresh_secret: String,
    /// Lifetime of access credentials
    pub access_expiry: Duration,
    /// Lifetime of refresh credentials
    pub refresh_expiry: Duration,
    /// Signing algorithm name (e.g. `HS256`)
    pub algorithm: String,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Allowed clock skew when checking time claims
    pub clock_tolerance: Duration,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_expiry", &self.access_expiry)
            .field("refresh_expiry", &self.refresh_expiry)
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("clock_tolerance", &self.clock_tolerance)
            .finish()
    }
}

/// Background task queue parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSettings {
    /// Maximum number of queued tasks
    pub capacity: usize,
    /// How long teardown waits for queued tasks to drain
    pub shutdown_timeout: Duration,
}
