//! Authentication configuration types

use charisma_domain::constants::TOKENS_SERVICE_KEY;
use charisma_domain::error::Result;
use charisma_domain::value_objects::TokenSettings;
use serde::{Deserialize, Serialize};

use super::parse_duration;
use crate::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_AUTH_HEADER, DEFAULT_JWT_ALGORITHM,
    DEFAULT_JWT_AUDIENCE, DEFAULT_JWT_CLOCK_TOLERANCE, DEFAULT_JWT_ISSUER,
    DEFAULT_REFRESH_TOKEN_EXPIRY,
};

/// Request authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header carrying `Bearer <token>`
    pub header: String,
    /// Registration key of the credential verifier
    pub verifier_key: String,
    /// Credential parameters
    pub jwt: JwtConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_AUTH_HEADER.to_string(),
            verifier_key: TOKENS_SERVICE_KEY.to_string(),
            jwt: JwtConfig::default(),
        }
    }
}

/// JWT signing and verification parameters
///
/// Durations use humantime notation (`15m`, `7d`). Secrets have no default
/// and must be supplied, usually through `CHARISMA__AUTH__JWT__ACCESS_SECRET`
/// and `CHARISMA__AUTH__JWT__REFRESH_SECRET`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Access credential secret
    pub access_secret: String,
    /// Refresh credential secret
    pub refresh_secret: String,
    /// Access credential lifetime
    pub access_expiry: String,
    /// Refresh credential lifetime
    pub refresh_expiry: String,
    /// HMAC algorithm
    pub algorithm: String,
    /// Issuer claim
    pub issuer: String,
    /// Audience claim
    pub audience: String,
    /// Allowed clock skew
    pub clock_tolerance: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY.to_string(),
            refresh_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY.to_string(),
            algorithm: DEFAULT_JWT_ALGORITHM.to_string(),
            issuer: DEFAULT_JWT_ISSUER.to_string(),
            audience: DEFAULT_JWT_AUDIENCE.to_string(),
            clock_tolerance: DEFAULT_JWT_CLOCK_TOLERANCE.to_string(),
        }
    }
}

impl JwtConfig {
    /// Settings registered as `tokenSettings`
    pub fn to_settings(&self) -> Result<TokenSettings> {
        Ok(TokenSettings {
            access_secret: self.access_secret.clone(),
            refresh_secret: self.refresh_secret.clone(),
            access_expiry: parse_duration("auth.jwt.access_expiry", &self.access_expiry)?,
            refresh_expiry: parse_duration("auth.jwt.refresh_expiry", &self.refresh_expiry)?,
            algorithm: self.algorithm.clone(),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            clock_tolerance: parse_duration("auth.jwt.clock_tolerance", &self.clock_tolerance)?,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
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
