//! Caller identity

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Claims carried by a verified credential
pub type Claims = serde_json::Map<String, Value>;

/// Verified identity of the caller of a request
///
/// Attached by the authentication stage and read-only afterwards.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestIdentity {
    /// Subject identifier (`sub` claim)
    pub subject: String,
    /// All claims of the verified credential
    pub claims: Claims,
}

impl RequestIdentity {
    /// Build an identity from verified claims
    ///
    /// The `sub` claim must be a non-empty string.
    pub fn from_claims(claims: Claims) -> Result<Self> {
        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| Error::authentication("credential has no subject"))?;
        Ok(Self { subject, claims })
    }

    /// Look up a single claim
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}
