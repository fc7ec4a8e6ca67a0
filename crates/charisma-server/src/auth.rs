//! Bearer authentication fairing
//!
//! Runs before routing on every request. A request carrying
//! `<header>: Bearer <credential>` is verified by the collaborator
//! registered under the configured verifier key; the resulting identity is
//! stored in the request-local cache. Missing headers, other schemes and
//! every verification failure leave the request anonymous. This stage never
//! answers a request itself; routes that need an identity reject anonymous
//! callers on their own.

use charisma_domain::error::Result;
use charisma_domain::ports::TokenVerifier;
use charisma_domain::value_objects::RequestIdentity;
use charisma_infrastructure::config::AuthConfig;
use charisma_infrastructure::di::Container;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Data, Request};
use tracing::{debug, warn};

use crate::constants::BEARER_PREFIX;
use crate::handle::ContainerHandle;

/// Identity attached to a request, `None` for anonymous callers
#[derive(Debug, Clone, Default)]
pub struct Authenticated(pub Option<RequestIdentity>);

impl Authenticated {
    /// The identity stored for `req`
    ///
    /// Anonymous if the fairing did not run.
    pub fn of(req: &Request<'_>) -> Option<RequestIdentity> {
        req.local_cache(|| Self(None)).0.clone()
    }
}

/// Request fairing resolving bearer credentials to identities
#[derive(Debug, Clone)]
pub struct AuthFairing {
    header: String,
    verifier_key: String,
}

impl AuthFairing {
    /// Create the fairing for a header name and verifier registration key
    pub fn new<H: Into<String>, K: Into<String>>(header: H, verifier_key: K) -> Self {
        Self {
            header: header.into(),
            verifier_key: verifier_key.into(),
        }
    }

    /// Create the fairing from the `auth` config section
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.header, &config.verifier_key)
    }

    fn identify(&self, req: &Request<'_>) -> Option<RequestIdentity> {
        let value = req.headers().get_one(&self.header)?;
        let credential = value.strip_prefix(BEARER_PREFIX)?.trim();
        if credential.is_empty() {
            return None;
        }
        let Some(handle) = req.rocket().state::<ContainerHandle>() else {
            warn!("No container handle managed; treating request as anonymous");
            return None;
        };
        match verify(&handle.load(), &self.verifier_key, credential) {
            Ok(identity) => {
                debug!(subject = %identity.subject, "Request authenticated");
                Some(identity)
            }
            Err(e) => {
                warn!(error = %e, path = %req.uri().path(), "Credential rejected");
                None
            }
        }
    }
}

fn verify(container: &Container, verifier_key: &str, credential: &str) -> Result<RequestIdentity> {
    let verifier = container.resolve_as::<dyn TokenVerifier>(verifier_key)?;
    RequestIdentity::from_claims(verifier.verify(credential)?)
}

#[rocket::async_trait]
impl Fairing for AuthFairing {
    fn info(&self) -> Info {
        Info {
            name: "Bearer Authentication",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let identity = self.identify(req);
        req.local_cache(move || Authenticated(identity));
    }
}
