//! Credential Ports
//!
//! [`TokenVerifier`] is the contract the authentication stage resolves from
//! the container. It is synchronous: verification is pure computation.

use crate::error::Result;
use crate::value_objects::Claims;

/// Kind of credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived credential presented on requests
    Access,
    /// Long-lived credential exchanged for new access credentials
    Refresh,
}

/// Verifies access credentials
pub trait TokenVerifier: Send + Sync {
    /// Verify an access credential and return its claims
    ///
    /// Fails with `Authentication` if the credential is malformed, expired,
    /// has the wrong issuer or audience, or a bad signature.
    fn verify(&self, credential: &str) -> Result<Claims>;
}

/// Issues and verifies credentials of both kinds
pub trait TokenService: TokenVerifier {
    /// Sign a credential of the given kind carrying `claims`
    ///
    /// Registered claims (`iss`, `aud`, `iat`, `exp`) are set by the service.
    fn issue(&self, kind: TokenKind, claims: Claims) -> Result<String>;

    /// Verify a credential of the given kind
    fn verify_kind(&self, kind: TokenKind, credential: &str) -> Result<Claims>;
}
