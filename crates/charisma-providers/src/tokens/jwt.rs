//! JWT token service
//!
//! HMAC-signed access and refresh credentials with issuer, audience,
//! expiry and clock tolerance taken from [`TokenSettings`].

use std::str::FromStr;

use chrono::Utc;
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{TokenKind, TokenService, TokenVerifier};
use charisma_domain::value_objects::{Claims, TokenSettings};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;

use crate::constants::{JWT_REGISTERED_CLAIMS, JWT_REQUIRED_CLAIMS};

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: i64,
}

impl KeyPair {
    fn new(secret: &str, lifetime: std::time::Duration) -> Result<Self> {
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs: i64::try_from(lifetime.as_secs())
                .map_err(|_| Error::configuration("token expiry is too large"))?,
        })
    }
}

/// JWT implementation of [`TokenService`]
pub struct JwtTokenService {
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl JwtTokenService {
    /// Create the service from settings
    ///
    /// Only HMAC algorithms (`HS256`, `HS384`, `HS512`) are accepted.
    pub fn new(settings: &TokenSettings) -> Result<Self> {
        let algorithm = Algorithm::from_str(&settings.algorithm).map_err(|e| {
            Error::configuration_with_source(
                format!("unknown JWT algorithm '{}'", settings.algorithm),
                e,
            )
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(Error::configuration(format!(
                "JWT algorithm '{}' is not an HMAC algorithm",
                settings.algorithm
            )));
        }

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        validation.set_required_spec_claims(JWT_REQUIRED_CLAIMS);
        validation.leeway = settings.clock_tolerance.as_secs();

        Ok(Self {
            algorithm,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            access: KeyPair::new(&settings.access_secret, settings.access_expiry)?,
            refresh: KeyPair::new(&settings.refresh_secret, settings.refresh_expiry)?,
            validation,
        })
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, credential: &str) -> Result<Claims> {
        self.verify_kind(TokenKind::Access, credential)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, kind: TokenKind, mut claims: Claims) -> Result<String> {
        for registered in JWT_REGISTERED_CLAIMS {
            claims.remove(*registered);
        }
        let keys = self.keys(kind);
        let now = Utc::now().timestamp();
        claims.insert("iss".into(), Value::from(self.issuer.clone()));
        claims.insert("aud".into(), Value::from(self.audience.clone()));
        claims.insert("iat".into(), Value::from(now));
        claims.insert("exp".into(), Value::from(now + keys.lifetime_secs));

        encode(&Header::new(self.algorithm), &claims, &keys.encoding)
            .map_err(|e| Error::infrastructure_with_source("failed to sign token", e))
    }

    fn verify_kind(&self, kind: TokenKind, credential: &str) -> Result<Claims> {
        decode::<Claims>(credential, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Error::authentication_with_source("token verification failed", e))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
