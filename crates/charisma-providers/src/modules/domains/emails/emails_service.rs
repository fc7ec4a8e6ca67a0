//! `emailsService` module

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::error::Result;
use charisma_domain::ports::EmailSender;

use crate::notifications::LogEmailSender;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|_| {
        Ok(Instance::of::<dyn EmailSender>(Arc::new(LogEmailSender::new())))
    }))
}

charisma_application::register_module!(load);
