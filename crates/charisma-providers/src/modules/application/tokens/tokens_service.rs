//! `tokensService` module
//!
//! Exposes the JWT service both as a [`TokenService`] and as the narrower
//! [`TokenVerifier`] the HTTP auth layer uses.

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::constants::TOKEN_SETTINGS_KEY;
use charisma_domain::error::Result;
use charisma_domain::ports::{TokenService, TokenVerifier};
use charisma_domain::value_objects::TokenSettings;

use crate::tokens::JwtTokenService;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|deps| {
        let settings = deps.get::<TokenSettings>(TOKEN_SETTINGS_KEY)?;
        let service = Arc::new(JwtTokenService::new(&settings)?);
        Ok(Instance::of::<dyn TokenService>(service.clone())
            .with_view::<dyn TokenVerifier>(service))
    })
    .depends_on(&[TOKEN_SETTINGS_KEY]))
}

charisma_application::register_module!(load);
