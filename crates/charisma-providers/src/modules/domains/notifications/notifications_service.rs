//! `notificationsService` module

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::error::Result;
use charisma_domain::ports::NotificationSender;

use crate::notifications::LogNotificationSender;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|_| {
        Ok(Instance::of::<dyn NotificationSender>(Arc::new(
            LogNotificationSender::new(),
        )))
    }))
}

charisma_application::register_module!(load);
