//! `passwordsService` module

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::error::Result;
use charisma_domain::ports::PasswordHasher;

use crate::passwords::Argon2PasswordHasher;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|_| {
        Ok(Instance::of::<dyn PasswordHasher>(Arc::new(
            Argon2PasswordHasher::new(),
        )))
    }))
}

charisma_application::register_module!(load);
