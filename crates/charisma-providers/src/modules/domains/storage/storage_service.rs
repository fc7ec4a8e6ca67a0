//! `storageService` module

use std::sync::Arc;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::error::Result;
use charisma_domain::ports::StorageProvider;

use crate::storage::MemoryStorageProvider;

fn load() -> Result<Constructible> {
    Ok(Constructible::new(|_| {
        Ok(Instance::of::<dyn StorageProvider>(Arc::new(
            MemoryStorageProvider::new(),
        )))
    }))
}

charisma_application::register_module!(load);
